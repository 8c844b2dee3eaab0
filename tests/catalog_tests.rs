use std::collections::HashSet;
use std::path::PathBuf;

use aion_coords::coords::{Faction, PositionalTag};
use aion_coords::data::node::{load_node_file, node_file_path};
use aion_coords::data::registry::load_registry;
use aion_coords::data::validate::{validate_catalog_dir, ValidationSeverity};
use aion_coords::data::{Catalog, Region, Skill};

fn repo_path(suffix: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(suffix)
}

#[test]
fn shipped_catalog_loads_every_partition() {
    let dir = repo_path("data/gathering");
    let catalog = Catalog::load_dir(&dir).expect("shipped catalog should load");
    assert!(!catalog.is_empty());

    for skill in Skill::ALL {
        for region in Region::ALL {
            let file = load_node_file(node_file_path(&dir, skill, region))
                .expect("node file should parse");
            assert!(file.data_version.is_some(), "{skill}-{region} has no data_version");
            assert_eq!(file.nodes.len(), catalog.region_nodes(skill, region).len());
            for node in &file.nodes {
                assert!(
                    region.map_keys().contains(&node.map_key.as_str()),
                    "{} is not a {region} map",
                    node.map_key
                );
            }
        }
    }
}

#[test]
fn shipped_coordinates_are_race_less_and_ids_unique() {
    let catalog = Catalog::load_dir(repo_path("data/gathering")).expect("catalog should load");
    let mut ids = HashSet::new();
    for skill in Skill::ALL {
        for region in Region::ALL {
            for node in catalog.region_nodes(skill, region) {
                assert!(ids.insert(node.id.clone()), "duplicate id {}", node.id);
                assert!(
                    matches!(
                        PositionalTag::parse(&node.coordinates),
                        PositionalTag::WithoutRace { .. }
                    ),
                    "{} is not a race-less tag",
                    node.coordinates
                );
            }
        }
    }
}

#[test]
fn reshanta_is_shared_by_both_factions() {
    let catalog = Catalog::load_dir(repo_path("data/gathering")).expect("catalog should load");
    let reshanta = catalog
        .region_nodes(Skill::Aethertapping, Region::Reshanta)
        .len();
    assert!(reshanta > 0);
    for faction in Faction::ALL {
        let nodes = catalog.nodes_for(faction, Skill::Aethertapping);
        let shared = nodes
            .iter()
            .filter(|node| node.map_key.ends_with("_reshanta"))
            .count();
        assert_eq!(shared, reshanta, "{faction}");
    }
}

#[test]
fn shipped_catalog_validates_cleanly() {
    let report = validate_catalog_dir(repo_path("data/gathering"));
    assert!(!report.has_errors(), "{:?}", report.diagnostics);
    assert_eq!(report.count(ValidationSeverity::Warning), 0);
    assert!(report.node_count > 0);
}

#[test]
fn registry_lists_every_data_set() {
    let registry = load_registry(repo_path("data/registry.json"));
    for skill in Skill::ALL {
        for region in Region::ALL {
            let key = format!("{skill}-{region}");
            let entry = registry.get(&key).unwrap_or_else(|| panic!("missing {key}"));
            assert_eq!(entry.path, format!("data/gathering/{key}.json"));
            assert!(repo_path(&entry.path).is_file());
        }
    }
}
