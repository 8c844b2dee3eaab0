//! Text presentation of lookup results and chunk lists.

use std::fmt::Write as _;

use crate::coords::Chunk;
use crate::lookup::LookupResult;

pub const NO_RESOURCES: &str = "No resources found for this selection.";

/// Chunks one after another, labelled when there is more than one.
pub fn render_chunks(chunks: &[Chunk], indent: &str) -> String {
    let mut out = String::new();
    let total = chunks.len();
    for chunk in chunks {
        if total > 1 {
            let _ = writeln!(out, "{indent}-- chunk {}/{total} --", chunk.index + 1);
        }
        for line in chunk.content.lines() {
            let _ = writeln!(out, "{indent}{line}");
        }
    }
    out
}

pub fn render_lookup(result: &LookupResult) -> String {
    if result.is_empty() {
        return format!("{NO_RESOURCES}\n");
    }

    let mut out = String::new();
    let _ = write!(
        out,
        "{} / {} / {} format",
        result.faction, result.skill, result.dialect
    );
    if let Some(level) = result.level {
        let _ = write!(out, " / skill level {level}");
    }
    out.push('\n');

    for section in result.maps.iter().filter(|s| !s.groups.is_empty()) {
        let _ = writeln!(out, "\n== {} ({}) ==", section.display_name, section.node_count);
        for group in &section.groups {
            let _ = write!(out, "Lv {:>3}  {}", group.level, group.display_name);
            if group.coordinate_count > 1 {
                let _ = write!(out, " ({})", group.coordinate_count);
            }
            out.push('\n');
            out.push_str(&render_chunks(&group.chunks, "  "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{chunk, ChunkSize, Dialect, Faction};
    use crate::data::Skill;
    use crate::lookup::{MapSection, ResourceGroup};

    #[test]
    fn multiple_chunks_are_labelled() {
        let tags = ["a", "b", "c"];
        let chunks = chunk(&tags, ChunkSize::new(2).unwrap());
        assert_eq!(
            render_chunks(&chunks, ""),
            "-- chunk 1/2 --\na\nb\n-- chunk 2/2 --\nc\n"
        );
        let single = chunk(&tags, ChunkSize::default());
        assert_eq!(render_chunks(&single, "  "), "  a\n  b\n  c\n");
    }

    #[test]
    fn lookup_text_lists_maps_and_groups() {
        let result = LookupResult {
            faction: Faction::Asmodian,
            skill: Skill::Aethertapping,
            level: Some(50),
            dialect: Dialect::Newer,
            maps: vec![MapSection {
                map_key: "altgard".to_string(),
                display_name: "Altgard".to_string(),
                node_count: 2,
                groups: vec![ResourceGroup {
                    resource_key: "pure_aether".to_string(),
                    display_name: "pure aether".to_string(),
                    level: 25,
                    coordinate_count: 2,
                    chunks: chunk(&["t1", "t2"], ChunkSize::default()),
                }],
            }],
        };
        let text = render_lookup(&result);
        assert!(text.starts_with("asmodian / aethertapping / newer format / skill level 50\n"));
        assert!(text.contains("== Altgard (2) =="));
        assert!(text.contains("Lv  25  pure aether (2)\n  t1\n  t2\n"));
    }

    #[test]
    fn empty_lookup_says_so() {
        let result = LookupResult {
            faction: Faction::Elyos,
            skill: Skill::Essencetapping,
            level: None,
            dialect: Dialect::Older,
            maps: Vec::new(),
        };
        assert_eq!(render_lookup(&result), format!("{NO_RESOURCES}\n"));
    }
}
