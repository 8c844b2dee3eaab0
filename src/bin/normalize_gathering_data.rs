//! Normalize Aion-map gathering JSON into the aion_coords catalog.
//! Reads data/upstream/aion-map/gathering/<map>.json, writes
//! data/gathering/<skill>-<region>.json and data/registry.json.

use std::fs;
use std::path::PathBuf;

use aion_coords::data::node::{load_node_file, node_file_path, write_node_file};
use aion_coords::data::normalize::{GatheringNormalizer, RawGatheringEntry};
use aion_coords::data::registry::{load_registry, write_registry, DataSetEntry, DEFAULT_REGISTRY_PATH};
use aion_coords::data::{Region, Skill};
use aion_coords::logging;

const UPSTREAM_SUFFIX: &str = "data/upstream/aion-map/gathering";
const OUT_SUFFIX: &str = "data/gathering";
const SOURCE: &str = "https://github.com/Persepha/Aion-map";
const SOURCE_NOTE: &str = "Aion-map gathering data";

/// Resolve path relative to repo root (CARGO_MANIFEST_DIR when run via cargo).
fn repo_data_path(suffix: &str) -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir).join(suffix);
    }
    PathBuf::from(suffix)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let data_version =
        std::env::var("AION_MAP_DATA_VERSION").unwrap_or_else(|_| "aion-map-main".to_string());

    let upstream_dir = repo_data_path(UPSTREAM_SUFFIX);
    let out_dir = repo_data_path(OUT_SUFFIX);
    let registry_path = repo_data_path(DEFAULT_REGISTRY_PATH);

    if !upstream_dir.is_dir() {
        eprintln!(
            "error: upstream gathering directory not found: {}",
            upstream_dir.display()
        );
        eprintln!("Clone https://github.com/Persepha/Aion-map and copy public/data/gathering there first.");
        std::process::exit(1);
    }
    fs::create_dir_all(&out_dir)?;

    let mut paths: Vec<PathBuf> = fs::read_dir(&upstream_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|e| e == "json"))
        .collect();
    paths.sort();

    let mut normalizer = GatheringNormalizer::new();
    for path in &paths {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let content = fs::read_to_string(path)?;
        let entries: Vec<RawGatheringEntry> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                eprintln!("warning: skipping {}: {err}", path.display());
                continue;
            }
        };
        match normalizer.add_map(stem, &entries) {
            Some(added) => println!("Processing {stem}... {added} nodes"),
            None => println!("Skipping unknown map: {stem}"),
        }
    }

    let mut registry = load_registry(&registry_path);
    let now = chrono::Utc::now().to_rfc3339();
    for skill in Skill::ALL {
        for region in Region::ALL {
            let file = normalizer.finish(skill, region, &data_version, SOURCE_NOTE);
            let path = node_file_path(&out_dir, skill, region);
            write_node_file(&path, &file)?;
            println!("  {skill} {region}: {} nodes", file.nodes.len());

            registry.insert(
                format!("{skill}-{region}"),
                DataSetEntry {
                    source: SOURCE.to_string(),
                    data_version: Some(data_version.clone()),
                    last_updated: Some(now.clone()),
                    path: format!("{OUT_SUFFIX}/{skill}-{region}.json"),
                },
            );
        }
    }
    write_registry(&registry_path, &registry)?;

    // Re-load each written file to ensure the schema is loadable.
    for skill in Skill::ALL {
        for region in Region::ALL {
            let path = node_file_path(&out_dir, skill, region);
            let reloaded = load_node_file(&path)?;
            if reloaded.nodes.len() != normalizer.count(skill, region) {
                return Err(format!("node count mismatch after reload: {}", path.display()).into());
            }
        }
    }

    println!(
        "Normalized {} upstream map files. data_version={data_version:?}",
        paths.len()
    );
    Ok(())
}
