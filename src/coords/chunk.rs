//! Splitting tag batches into pasteable chunks.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

use super::convert::convert_batch;
use super::tag::{Dialect, Faction};

pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// Maximum number of tags per chunk. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ChunkSize(NonZeroUsize);

impl ChunkSize {
    pub fn new(max_per_chunk: usize) -> Option<Self> {
        NonZeroUsize::new(max_per_chunk).map(Self)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_CHUNK_SIZE - 1))
    }
}

impl TryFrom<usize> for ChunkSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| "chunk size must be at least 1".to_string())
    }
}

impl From<ChunkSize> for usize {
    fn from(size: ChunkSize) -> Self {
        size.get()
    }
}

impl FromStr for ChunkSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<usize>()
            .map_err(|err| format!("invalid chunk size '{s}': {err}"))?;
        Self::try_from(value)
    }
}

impl fmt::Display for ChunkSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One pasteable block of newline-joined tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub index: usize,
    pub tag_count: usize,
    pub content: String,
}

/// Partition `tags` into consecutive chunks of at most `size` tags.
/// Empty input yields no chunks.
pub fn chunk<S: AsRef<str>>(tags: &[S], size: ChunkSize) -> Vec<Chunk> {
    tags.chunks(size.get())
        .enumerate()
        .map(|(index, group)| Chunk {
            index,
            tag_count: group.len(),
            content: group
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join("\n"),
        })
        .collect()
}

/// Convert then chunk with the default chunk size.
pub fn process<S: AsRef<str>>(
    tags: &[S],
    dialect: Dialect,
    faction: Option<Faction>,
) -> Result<Vec<Chunk>, ConvertError> {
    process_with(tags, dialect, faction, ChunkSize::default())
}

pub fn process_with<S: AsRef<str>>(
    tags: &[S],
    dialect: Dialect,
    faction: Option<Faction>,
    size: ChunkSize,
) -> Result<Vec<Chunk>, ConvertError> {
    let converted = convert_batch(tags, dialect, faction)?;
    Ok(chunk(&converted, size))
}
