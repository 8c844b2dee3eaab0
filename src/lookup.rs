//! Selection → chunked coordinates pipeline.

use serde::Serialize;

use crate::coords::{process_with, Chunk, ChunkSize, Dialect, Faction};
use crate::data::grouping::{filter_by_level, group_by_map, group_by_resource_level};
use crate::data::node::{map_display_name, resource_display_name};
use crate::data::{Catalog, Skill};
use crate::error::ConvertError;

#[derive(Debug, Clone)]
pub struct LookupQuery {
    pub faction: Faction,
    pub skill: Skill,
    pub level: Option<u32>,
    pub map: Option<String>,
    pub dialect: Dialect,
    pub chunk_size: ChunkSize,
}

impl LookupQuery {
    pub fn new(faction: Faction, skill: Skill) -> Self {
        Self {
            faction,
            skill,
            level: None,
            map: None,
            dialect: Dialect::default(),
            chunk_size: ChunkSize::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceGroup {
    pub resource_key: String,
    pub display_name: String,
    pub level: u32,
    pub coordinate_count: usize,
    pub chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapSection {
    pub map_key: String,
    pub display_name: String,
    pub node_count: usize,
    pub groups: Vec<ResourceGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LookupResult {
    pub faction: Faction,
    pub skill: Skill,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    pub dialect: Dialect,
    pub maps: Vec<MapSection>,
}

impl LookupResult {
    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(|section| section.groups.is_empty())
    }
}

/// Map keys and node counts visible for a selection, in display order.
pub fn available_maps(
    catalog: &Catalog,
    faction: Faction,
    skill: Skill,
    level: Option<u32>,
) -> Vec<(String, usize)> {
    let nodes = filter_by_level(&catalog.nodes_for(faction, skill), level);
    group_by_map(&nodes, faction)
        .into_iter()
        .map(|(map_key, nodes)| (map_key, nodes.len()))
        .collect()
}

pub fn lookup(catalog: &Catalog, query: &LookupQuery) -> Result<LookupResult, ConvertError> {
    let nodes = filter_by_level(&catalog.nodes_for(query.faction, query.skill), query.level);
    let mut sections = group_by_map(&nodes, query.faction);
    if let Some(selected) = query.map.as_deref() {
        sections.retain(|(map_key, _)| map_key == selected);
    }
    log::debug!(
        "lookup {} {} level={:?}: {} nodes across {} maps",
        query.faction,
        query.skill,
        query.level,
        nodes.len(),
        sections.len()
    );

    let mut maps = Vec::with_capacity(sections.len());
    for (map_key, map_nodes) in sections {
        let mut groups = Vec::new();
        for group in group_by_resource_level(&map_nodes) {
            let chunks = process_with(
                &group.coordinates,
                query.dialect,
                Some(query.faction),
                query.chunk_size,
            )?;
            groups.push(ResourceGroup {
                display_name: resource_display_name(&group.resource_key),
                resource_key: group.resource_key,
                level: group.level,
                coordinate_count: group.coordinates.len(),
                chunks,
            });
        }
        maps.push(MapSection {
            display_name: map_display_name(&map_key),
            node_count: map_nodes.len(),
            map_key,
            groups,
        });
    }

    Ok(LookupResult {
        faction: query.faction,
        skill: query.skill,
        level: query.level,
        dialect: query.dialect,
        maps,
    })
}
