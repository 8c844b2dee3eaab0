//! Conversion of upstream Aion-map gathering JSON into catalog node files.
//! Used by the `normalize_gathering_data` binary.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::data::node::{NodeFile, Region, ResourceNode, Skill};

static UPSTREAM_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[pos:([^;]+);\s*(\d+)\s+([\d.]+)\s+([\d.]+)\s+([\d.]+)\s+(\d+)\]")
        .expect("upstream tag pattern is valid")
});

const AETHER_GATHERING_TYPE: &str = "Aether";

/// One resource entry of an upstream `<map>.json` file (partial).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGatheringEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ru_name: String,
    #[serde(default)]
    pub gathering_type: String,
    #[serde(default)]
    pub gathering_lvl: u32,
    #[serde(default)]
    pub ingame_coords: Option<String>,
}

impl RawGatheringEntry {
    pub fn skill(&self) -> Skill {
        if self.gathering_type == AETHER_GATHERING_TYPE {
            Skill::Aethertapping
        } else {
            Skill::Essencetapping
        }
    }

    /// Label written into tags: the Russian name, or the English one when absent.
    pub fn label(&self) -> &str {
        if self.ru_name.trim().is_empty() {
            &self.name
        } else {
            &self.ru_name
        }
    }
}

/// Region and catalog map key for an upstream file stem.
pub fn classify_map(file_stem: &str) -> Option<(Region, String)> {
    match file_stem {
        "lower" => Some((Region::Reshanta, "lower_reshanta".to_string())),
        "upper" => Some((Region::Reshanta, "upper_reshanta".to_string())),
        stem if Region::Elyos.map_keys().contains(&stem) => Some((Region::Elyos, stem.to_string())),
        stem if Region::Asmodian.map_keys().contains(&stem) => {
            Some((Region::Asmodian, stem.to_string()))
        }
        _ => None,
    }
}

/// Extract every tag from an upstream coordinate blob, dropping duplicates
/// (same map id and coordinates at one decimal) and rewriting each as a
/// race-less tag labelled `label` with a zero trailing flag.
pub fn parse_ingame_coords(raw: &str, label: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut coords = Vec::new();

    for caps in UPSTREAM_TAG_RE.captures_iter(raw) {
        let map_id = &caps[2];
        let (Ok(x), Ok(y), Ok(z)) = (
            caps[3].parse::<f64>(),
            caps[4].parse::<f64>(),
            caps[5].parse::<f64>(),
        ) else {
            log::debug!("skipping tag with unparsable coordinates: {}", &caps[0]);
            continue;
        };

        let key = format!("{map_id}-{x:.1}-{y:.1}-{z:.1}");
        if !seen.insert(key) {
            continue;
        }
        coords.push(format!("[pos:{label};{map_id} {x} {y} {z} 0]"));
    }

    coords
}

/// Lower-case, whitespace to `_`, keep only latin/cyrillic letters, digits and `_`.
pub fn to_resource_key(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| {
            c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || *c == '_'
                || ('а'..='я').contains(c)
                || *c == 'ё'
        })
        .collect()
}

/// Accumulates nodes per (skill, region) across upstream map files.
#[derive(Debug, Default)]
pub struct GatheringNormalizer {
    buckets: BTreeMap<(Skill, Region), Vec<ResourceNode>>,
}

impl GatheringNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one upstream map file. Returns the number of nodes taken, or
    /// `None` when the map is not part of the catalog.
    pub fn add_map(&mut self, file_stem: &str, entries: &[RawGatheringEntry]) -> Option<usize> {
        let (region, map_key) = classify_map(file_stem)?;
        let mut added = 0;

        for entry in entries {
            let Some(raw_coords) = entry.ingame_coords.as_deref() else {
                continue;
            };
            let label = entry.label();
            let coords = parse_ingame_coords(raw_coords, label);
            if coords.is_empty() {
                continue;
            }
            let resource_key = to_resource_key(label);
            let bucket = self.buckets.entry((entry.skill(), region)).or_default();
            for coordinates in coords {
                bucket.push(ResourceNode {
                    id: String::new(),
                    map_key: map_key.clone(),
                    resource_key: resource_key.clone(),
                    level: entry.gathering_lvl,
                    coordinates,
                });
                added += 1;
            }
        }

        Some(added)
    }

    /// Sorted, id-stamped node file for one (skill, region). Always returns a
    /// file, empty when nothing was collected.
    pub fn finish(&self, skill: Skill, region: Region, data_version: &str, source_note: &str) -> NodeFile {
        let mut nodes = self
            .buckets
            .get(&(skill, region))
            .cloned()
            .unwrap_or_default();
        nodes.sort_by(|a, b| {
            a.map_key
                .cmp(&b.map_key)
                .then(a.level.cmp(&b.level))
                .then_with(|| a.resource_key.cmp(&b.resource_key))
        });
        for (index, node) in nodes.iter_mut().enumerate() {
            node.id = format!("{}-{}-{}", skill.id_prefix(), region.id_prefix(), index + 1);
        }

        NodeFile {
            data_version: Some(data_version.to_string()),
            source_note: Some(source_note.to_string()),
            nodes,
        }
    }

    pub fn count(&self, skill: Skill, region: Region) -> usize {
        self.buckets.get(&(skill, region)).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_dedupes_upstream_coordinates() {
        let raw = "[pos:Iron Ore;210010000 100.50 200.0 30.25 0] \
                   [pos:Iron Ore; 210010000 100.54 200.01 30.25 0]\
                   [pos:Iron Ore;210010000 7 8 9 0]";
        let coords = parse_ingame_coords(raw, "Железная руда");
        assert_eq!(
            coords,
            vec![
                "[pos:Железная руда;210010000 100.5 200 30.25 0]",
                "[pos:Железная руда;210010000 7 8 9 0]",
            ]
        );
    }

    #[test]
    fn resource_keys_keep_latin_cyrillic_and_digits() {
        assert_eq!(to_resource_key("Чистый  Эфир (II)"), "чистый_эфир_ii");
        assert_eq!(to_resource_key("Pure Aether-2"), "pure_aether2");
    }

    #[test]
    fn maps_classify_into_regions() {
        assert_eq!(
            classify_map("upper"),
            Some((Region::Reshanta, "upper_reshanta".to_string()))
        );
        assert_eq!(classify_map("morheim").map(|(r, _)| r), Some(Region::Asmodian));
        assert_eq!(classify_map("sarpan"), None);
    }

    #[test]
    fn normalizer_sorts_and_stamps_ids() {
        let entries = vec![
            RawGatheringEntry {
                name: "Herb".to_string(),
                ru_name: "Трава".to_string(),
                gathering_type: "Essence".to_string(),
                gathering_lvl: 20,
                ingame_coords: Some("[pos:x;210030000 1 1 1 0]".to_string()),
            },
            RawGatheringEntry {
                name: "Aether".to_string(),
                ru_name: String::new(),
                gathering_type: "Aether".to_string(),
                gathering_lvl: 5,
                ingame_coords: Some("[pos:x;210030000 2 2 2 0]".to_string()),
            },
            RawGatheringEntry {
                name: "Flower".to_string(),
                ru_name: "Цветок".to_string(),
                gathering_type: "Essence".to_string(),
                gathering_lvl: 10,
                ingame_coords: Some("[pos:x;210030000 3 3 3 0]".to_string()),
            },
            RawGatheringEntry {
                name: "Nothing".to_string(),
                ingame_coords: None,
                ..RawGatheringEntry::default()
            },
        ];

        let mut normalizer = GatheringNormalizer::new();
        assert_eq!(normalizer.add_map("verteron", &entries), Some(3));
        assert_eq!(normalizer.add_map("unknown_map", &entries), None);

        let essence = normalizer.finish(Skill::Essencetapping, Region::Elyos, "v1", "test");
        let ids: Vec<&str> = essence.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["ess-ely-1", "ess-ely-2"]);
        assert_eq!(essence.nodes[0].resource_key, "цветок");
        assert_eq!(essence.nodes[0].level, 10);

        let aether = normalizer.finish(Skill::Aethertapping, Region::Elyos, "v1", "test");
        assert_eq!(aether.nodes[0].coordinates, "[pos:Aether;210030000 2 2 2 0]");
        assert_eq!(aether.nodes[0].id, "aeth-ely-1");

        assert_eq!(normalizer.count(Skill::Aethertapping, Region::Reshanta), 0);
    }
}
