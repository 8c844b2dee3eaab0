//! Positional tag conversion and chunking.
//!
//! Tags are parsed into [PositionalTag], rewritten into the requested
//! [Dialect] and split into [Chunk]s small enough to paste into the game
//! client in one go. Unrecognized text is always passed through untouched.

mod chunk;
mod convert;
mod tag;

pub use chunk::{chunk, process, process_with, Chunk, ChunkSize, DEFAULT_CHUNK_SIZE};
pub use convert::{convert, convert_batch, convert_keeping_race};
pub use tag::{extract_faction, Dialect, Faction, PositionalTag, TagFields};
