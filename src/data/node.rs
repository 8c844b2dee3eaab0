//! Gathering node records as stored in `data/gathering/<skill>-<region>.json`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coords::Faction;
use crate::error::CatalogError;

pub const DEFAULT_GATHERING_DIR: &str = "data/gathering";

pub const MIN_SKILL_LEVEL: u32 = 1;
pub const MAX_SKILL_LEVEL: u32 = 499;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Aethertapping,
    Essencetapping,
}

impl Skill {
    pub const ALL: [Skill; 2] = [Skill::Aethertapping, Skill::Essencetapping];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aethertapping => "aethertapping",
            Self::Essencetapping => "essencetapping",
        }
    }

    /// Short prefix used in node ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Aethertapping => "aeth",
            Self::Essencetapping => "ess",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aethertapping" | "aether" => Ok(Self::Aethertapping),
            "essencetapping" | "essence" => Ok(Self::Essencetapping),
            other => Err(format!(
                "unknown skill '{other}' (expected aethertapping or essencetapping)"
            )),
        }
    }
}

/// Catalog partition. Reshanta nodes are visible to both factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Elyos,
    Asmodian,
    Reshanta,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Elyos, Region::Asmodian, Region::Reshanta];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elyos => "elyos",
            Self::Asmodian => "asmodian",
            Self::Reshanta => "reshanta",
        }
    }

    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Elyos => "ely",
            Self::Asmodian => "asm",
            Self::Reshanta => "resh",
        }
    }

    pub fn home_of(faction: Faction) -> Self {
        match faction {
            Faction::Elyos => Self::Elyos,
            Faction::Asmodian => Self::Asmodian,
        }
    }

    /// Map keys that belong to this region.
    pub fn map_keys(&self) -> &'static [&'static str] {
        match self {
            Self::Elyos => &["poeta", "verteron", "eltnen", "heiron", "theobomos"],
            Self::Asmodian => &["ishalgen", "altgard", "morheim", "beluslan", "brusthonin"],
            Self::Reshanta => &["lower_reshanta", "upper_reshanta"],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: String,
    pub map_key: String,
    pub resource_key: String,
    pub level: u32,
    /// One positional tag, race-less as shipped.
    pub coordinates: String,
}

/// One catalog file. Includes provenance written by the normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_note: Option<String>,
    pub nodes: Vec<ResourceNode>,
}

pub fn node_file_name(skill: Skill, region: Region) -> String {
    format!("{}-{}.json", skill.as_str(), region.as_str())
}

pub fn node_file_path(dir: &Path, skill: Skill, region: Region) -> PathBuf {
    dir.join(node_file_name(skill, region))
}

pub fn load_node_file(path: impl AsRef<Path>) -> Result<NodeFile, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_node_file(path: impl AsRef<Path>, file: &NodeFile) -> Result<(), CatalogError> {
    let path = path.as_ref();
    let payload = serde_json::to_string_pretty(file).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, payload).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Human-readable map name.
pub fn map_display_name(map_key: &str) -> String {
    let known = match map_key {
        "poeta" => "Poeta",
        "verteron" => "Verteron",
        "eltnen" => "Eltnen",
        "heiron" => "Heiron",
        "theobomos" => "Theobomos",
        "ishalgen" => "Ishalgen",
        "altgard" => "Altgard",
        "morheim" => "Morheim",
        "beluslan" => "Beluslan",
        "brusthonin" => "Brusthonin",
        "lower_reshanta" => "Lower Reshanta",
        "upper_reshanta" => "Upper Reshanta",
        _ => "",
    };
    if !known.is_empty() {
        return known.to_string();
    }
    map_key
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn resource_display_name(resource_key: &str) -> String {
    resource_key.replace('_', " ")
}
