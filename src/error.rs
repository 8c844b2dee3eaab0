use std::path::PathBuf;

use thiserror::Error;

/// Contract violations of the tag converter. Malformed tags are never an
/// error; they pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("a faction is required to add a race digit to '{tag}'")]
    MissingFaction { tag: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse json '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("skill level {0} is outside 1..=499")]
    LevelOutOfRange(u32),

    #[error("a race and a skill must be selected first")]
    NoSelection,
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard support is not compiled in")]
    Unavailable,

    #[error("clipboard write failed: {0}")]
    Backend(String),
}
