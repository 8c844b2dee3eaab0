//! In-memory node catalog loaded from the per-(skill, region) files.

use std::collections::HashMap;
use std::path::Path;

use crate::coords::Faction;
use crate::data::node::{load_node_file, node_file_path, Region, ResourceNode, Skill};
use crate::error::CatalogError;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    files: HashMap<(Skill, Region), Vec<ResourceNode>>,
}

impl Catalog {
    /// Load every `<skill>-<region>.json` under `dir`. Missing files count as
    /// empty; unreadable or malformed ones are an error.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut catalog = Self::default();
        for skill in Skill::ALL {
            for region in Region::ALL {
                let path = node_file_path(dir, skill, region);
                if !path.is_file() {
                    log::warn!("catalog file missing, treating as empty: {}", path.display());
                    continue;
                }
                let file = load_node_file(&path)?;
                log::debug!("loaded {} nodes from {}", file.nodes.len(), path.display());
                catalog.insert(skill, region, file.nodes);
            }
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, skill: Skill, region: Region, nodes: Vec<ResourceNode>) {
        self.files.insert((skill, region), nodes);
    }

    pub fn region_nodes(&self, skill: Skill, region: Region) -> &[ResourceNode] {
        self.files
            .get(&(skill, region))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Nodes visible to `faction`: its home region followed by Reshanta.
    pub fn nodes_for(&self, faction: Faction, skill: Skill) -> Vec<ResourceNode> {
        let home = self.region_nodes(skill, Region::home_of(faction));
        let shared = self.region_nodes(skill, Region::Reshanta);
        home.iter().chain(shared).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, map_key: &str) -> ResourceNode {
        ResourceNode {
            id: id.to_string(),
            map_key: map_key.to_string(),
            resource_key: "ore".to_string(),
            level: 1,
            coordinates: "[pos:Ore;210010000 1 2 3 0]".to_string(),
        }
    }

    #[test]
    fn faction_sees_home_region_then_reshanta() {
        let mut catalog = Catalog::default();
        catalog.insert(Skill::Aethertapping, Region::Elyos, vec![node("e1", "poeta")]);
        catalog.insert(Skill::Aethertapping, Region::Asmodian, vec![node("a1", "altgard")]);
        catalog.insert(
            Skill::Aethertapping,
            Region::Reshanta,
            vec![node("r1", "lower_reshanta")],
        );

        let ids: Vec<String> = catalog
            .nodes_for(Faction::Elyos, Skill::Aethertapping)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["e1", "r1"]);

        let ids: Vec<String> = catalog
            .nodes_for(Faction::Asmodian, Skill::Aethertapping)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["a1", "r1"]);

        assert!(catalog
            .nodes_for(Faction::Elyos, Skill::Essencetapping)
            .is_empty());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn load_dir_treats_missing_files_as_empty() {
        let dir = std::env::temp_dir().join(format!(
            "aion-coords-empty-catalog-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let catalog = Catalog::load_dir(&dir).unwrap();
        assert!(catalog.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_dir_rejects_malformed_file() {
        let dir = std::env::temp_dir().join(format!(
            "aion-coords-bad-catalog-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("aethertapping-elyos.json"), "{not json").unwrap();
        let err = Catalog::load_dir(&dir).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        let _ = std::fs::remove_dir_all(dir);
    }
}
