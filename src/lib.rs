//! Gathering node lookup for Aion: static node catalog, level filtering, map
//! grouping and positional tag conversion into pasteable chunks.

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod coords;
pub mod data;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod prefs;
pub mod render;
