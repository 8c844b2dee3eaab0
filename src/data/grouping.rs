//! Level filtering and map / resource grouping of catalog nodes.

use crate::coords::Faction;
use crate::data::node::ResourceNode;

/// Nodes more than this many levels below the player's skill are hidden.
pub const LEVEL_WINDOW: u32 = 40;

const ELYOS_MAP_ORDER: &[&str] = &[
    "poeta",
    "verteron",
    "eltnen",
    "heiron",
    "theobomos",
    "lower_reshanta",
    "upper_reshanta",
];

const ASMODIAN_MAP_ORDER: &[&str] = &[
    "ishalgen",
    "altgard",
    "morheim",
    "beluslan",
    "brusthonin",
    "lower_reshanta",
    "upper_reshanta",
];

pub fn map_order(faction: Faction) -> &'static [&'static str] {
    match faction {
        Faction::Elyos => ELYOS_MAP_ORDER,
        Faction::Asmodian => ASMODIAN_MAP_ORDER,
    }
}

/// Keep nodes gatherable at `skill_level` and at most [LEVEL_WINDOW] below it.
/// `None` keeps everything.
pub fn filter_by_level(nodes: &[ResourceNode], skill_level: Option<u32>) -> Vec<ResourceNode> {
    let Some(skill_level) = skill_level else {
        return nodes.to_vec();
    };
    let min_level = skill_level.saturating_sub(LEVEL_WINDOW).max(1);
    nodes
        .iter()
        .filter(|node| node.level >= min_level && node.level <= skill_level)
        .cloned()
        .collect()
}

/// Map keys in display order: the faction's fixed order first, then any
/// other map in order of first appearance.
pub fn unique_maps(nodes: &[ResourceNode], faction: Faction) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    for node in nodes {
        if !seen.contains(&node.map_key.as_str()) {
            seen.push(&node.map_key);
        }
    }

    let order = map_order(faction);
    let mut ordered: Vec<String> = order
        .iter()
        .filter(|key| seen.contains(*key))
        .map(|key| key.to_string())
        .collect();
    ordered.extend(
        seen.into_iter()
            .filter(|key| !order.contains(key))
            .map(str::to_string),
    );
    ordered
}

/// Nodes grouped per map in display order, each group sorted by level.
pub fn group_by_map(nodes: &[ResourceNode], faction: Faction) -> Vec<(String, Vec<ResourceNode>)> {
    unique_maps(nodes, faction)
        .into_iter()
        .map(|map_key| {
            let mut group: Vec<ResourceNode> = nodes
                .iter()
                .filter(|node| node.map_key == map_key)
                .cloned()
                .collect();
            group.sort_by_key(|node| node.level);
            (map_key, group)
        })
        .collect()
}

/// All coordinates of one resource at one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLevelGroup {
    pub resource_key: String,
    pub level: u32,
    pub coordinates: Vec<String>,
}

/// Group by (resource, level) in order of first appearance.
pub fn group_by_resource_level(nodes: &[ResourceNode]) -> Vec<ResourceLevelGroup> {
    let mut groups: Vec<ResourceLevelGroup> = Vec::new();
    for node in nodes {
        match groups
            .iter_mut()
            .find(|g| g.resource_key == node.resource_key && g.level == node.level)
        {
            Some(group) => group.coordinates.push(node.coordinates.clone()),
            None => groups.push(ResourceLevelGroup {
                resource_key: node.resource_key.clone(),
                level: node.level,
                coordinates: vec![node.coordinates.clone()],
            }),
        }
    }
    groups
}
