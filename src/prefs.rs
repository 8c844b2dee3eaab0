//! Saved user selections: faction, skill, per-(faction, skill) level and
//! output format. Stored as JSON at `data/preferences.json` unless
//! `AION_COORDS_PREFS` points elsewhere.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coords::{Dialect, Faction};
use crate::data::node::{MAX_SKILL_LEVEL, MIN_SKILL_LEVEL};
use crate::data::Skill;
use crate::error::PrefsError;

pub const DEFAULT_PREFS_PATH: &str = "data/preferences.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub race: Option<Faction>,
    #[serde(default)]
    pub skill: Option<Skill>,
    /// Keyed `<race>-<skill>`, e.g. `elyos-aethertapping`.
    #[serde(default)]
    pub skill_levels: BTreeMap<String, u32>,
    #[serde(default)]
    pub format: Dialect,
}

fn level_key(race: Faction, skill: Skill) -> String {
    format!("{race}-{skill}")
}

pub fn validate_level(level: u32) -> Result<u32, PrefsError> {
    if (MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&level) {
        Ok(level)
    } else {
        Err(PrefsError::LevelOutOfRange(level))
    }
}

impl Preferences {
    pub fn level_for(&self, race: Faction, skill: Skill) -> Option<u32> {
        self.skill_levels.get(&level_key(race, skill)).copied()
    }

    /// Level for the saved race and skill.
    pub fn skill_level(&self) -> Option<u32> {
        self.level_for(self.race?, self.skill?)
    }

    pub fn set_skill_level(&mut self, level: u32) -> Result<(), PrefsError> {
        let (Some(race), Some(skill)) = (self.race, self.skill) else {
            return Err(PrefsError::NoSelection);
        };
        self.skill_levels
            .insert(level_key(race, skill), validate_level(level)?);
        Ok(())
    }

    /// Forget the level of the saved race and skill only.
    pub fn clear_skill_level(&mut self) -> Result<(), PrefsError> {
        let (Some(race), Some(skill)) = (self.race, self.skill) else {
            return Err(PrefsError::NoSelection);
        };
        self.skill_levels.remove(&level_key(race, skill));
        Ok(())
    }
}

/// Load preferences. Returns defaults if the file is missing or invalid.
pub fn load_prefs(path: impl AsRef<Path>) -> Preferences {
    let path = path.as_ref();
    if !path.exists() {
        return Preferences::default();
    }
    let raw = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) => {
            log::warn!("unable to read preferences {}: {err}", path.display());
            return Preferences::default();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        log::warn!("ignoring invalid preferences {}: {err}", path.display());
        Preferences::default()
    })
}

pub fn save_prefs(path: impl AsRef<Path>, prefs: &Preferences) -> Result<(), PrefsError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(prefs)?)?;
    log::debug!("saved preferences to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_tracked_per_race_and_skill() {
        let mut prefs = Preferences {
            race: Some(Faction::Elyos),
            skill: Some(Skill::Aethertapping),
            ..Preferences::default()
        };
        prefs.set_skill_level(120).unwrap();
        prefs.skill = Some(Skill::Essencetapping);
        assert_eq!(prefs.skill_level(), None);
        prefs.set_skill_level(80).unwrap();

        assert_eq!(prefs.level_for(Faction::Elyos, Skill::Aethertapping), Some(120));
        prefs.clear_skill_level().unwrap();
        assert_eq!(prefs.skill_level(), None);
        assert_eq!(prefs.level_for(Faction::Elyos, Skill::Aethertapping), Some(120));
    }

    #[test]
    fn level_bounds_and_selection_are_enforced() {
        let mut prefs = Preferences::default();
        assert!(matches!(prefs.set_skill_level(10), Err(PrefsError::NoSelection)));
        prefs.race = Some(Faction::Asmodian);
        prefs.skill = Some(Skill::Essencetapping);
        assert!(matches!(
            prefs.set_skill_level(500),
            Err(PrefsError::LevelOutOfRange(500))
        ));
        assert!(matches!(
            prefs.set_skill_level(0),
            Err(PrefsError::LevelOutOfRange(0))
        ));
        assert!(prefs.set_skill_level(499).is_ok());
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("aion-coords-prefs-{}", std::process::id()))
            .join("preferences.json");
        let prefs = Preferences {
            race: Some(Faction::Asmodian),
            skill: Some(Skill::Aethertapping),
            skill_levels: BTreeMap::from([("asmodian-aethertapping".to_string(), 42)]),
            format: Dialect::Older,
        };
        save_prefs(&path, &prefs).unwrap();
        assert_eq!(load_prefs(&path), prefs);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_or_invalid_file_gives_defaults() {
        assert_eq!(load_prefs("no/such/preferences.json"), Preferences::default());
        let path = std::env::temp_dir().join(format!(
            "aion-coords-bad-prefs-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{\"race\": \"balaur\"}").unwrap();
        assert_eq!(load_prefs(&path), Preferences::default());
        let _ = fs::remove_file(path);
    }
}
