//! Runtime configuration from the environment.

use std::env;
use std::path::PathBuf;

use crate::coords::ChunkSize;
use crate::data::node::DEFAULT_GATHERING_DIR;
use crate::data::registry::DEFAULT_REGISTRY_PATH;
use crate::prefs::DEFAULT_PREFS_PATH;

pub const DATA_DIR_ENV: &str = "AION_COORDS_DATA_DIR";
pub const PREFS_ENV: &str = "AION_COORDS_PREFS";
pub const REGISTRY_ENV: &str = "AION_COORDS_REGISTRY";
pub const CHUNK_SIZE_ENV: &str = "AION_COORDS_CHUNK_SIZE";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub prefs_path: PathBuf,
    pub registry_path: PathBuf,
    pub chunk_size: ChunkSize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_GATHERING_DIR),
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
            registry_path: PathBuf::from(DEFAULT_REGISTRY_PATH),
            chunk_size: ChunkSize::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty values keep the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = get(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = get(PREFS_ENV) {
            config.prefs_path = PathBuf::from(path);
        }
        if let Some(path) = get(REGISTRY_ENV) {
            config.registry_path = PathBuf::from(path);
        }
        if let Some(raw) = get(CHUNK_SIZE_ENV) {
            match raw.parse::<ChunkSize>() {
                Ok(size) => config.chunk_size = size,
                Err(err) => log::warn!("{CHUNK_SIZE_ENV}: {err}, defaulting to {}", config.chunk_size),
            }
        }
        config
    }
}
