use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::coords::PositionalTag;
use crate::data::node::{
    load_node_file, node_file_name, node_file_path, Region, ResourceNode, Skill, MAX_SKILL_LEVEL,
    MIN_SKILL_LEVEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
    pub node_count: usize,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

/// Check every catalog file under `dir`. Never fails; problems with a file
/// are reported as diagnostics.
pub fn validate_catalog_dir(dir: impl AsRef<Path>) -> ValidationReport {
    let dir = dir.as_ref();
    let mut report = ValidationReport::default();
    let mut seen_ids = HashSet::new();

    for skill in Skill::ALL {
        for region in Region::ALL {
            let file_name = node_file_name(skill, region);
            let path = node_file_path(dir, skill, region);
            if !path.is_file() {
                report.push(ValidationSeverity::Info, file_name, "file not present");
                continue;
            }
            match load_node_file(&path) {
                Ok(file) => {
                    for (index, node) in file.nodes.iter().enumerate() {
                        let context = format!("{file_name} nodes[{index}]");
                        validate_node(&mut report, &mut seen_ids, region, node, &context);
                    }
                    report.node_count += file.nodes.len();
                }
                Err(err) => report.push(ValidationSeverity::Error, file_name, err.to_string()),
            }
        }
    }

    report
}

fn validate_node(
    report: &mut ValidationReport,
    seen_ids: &mut HashSet<String>,
    region: Region,
    node: &ResourceNode,
    context: &str,
) {
    if node.id.trim().is_empty() {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.id"),
            "missing non-empty 'id'",
        );
    } else if !seen_ids.insert(node.id.clone()) {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.id"),
            format!("duplicate id '{}'", node.id),
        );
    }

    if node.map_key.trim().is_empty() {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.map_key"),
            "missing non-empty 'map_key'",
        );
    } else if !region.map_keys().contains(&node.map_key.as_str()) {
        report.push(
            ValidationSeverity::Warning,
            format!("{context}.map_key"),
            format!("map '{}' does not belong to region '{region}'", node.map_key),
        );
    }

    if node.resource_key.trim().is_empty() {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.resource_key"),
            "missing non-empty 'resource_key'",
        );
    }

    if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&node.level) {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.level"),
            format!(
                "level {} outside {MIN_SKILL_LEVEL}..={MAX_SKILL_LEVEL}",
                node.level
            ),
        );
    }

    match PositionalTag::parse(&node.coordinates) {
        PositionalTag::WithoutRace { .. } => {}
        PositionalTag::WithRace { .. } => report.push(
            ValidationSeverity::Warning,
            format!("{context}.coordinates"),
            "tag carries a race digit; catalog tags are stored race-less",
        ),
        PositionalTag::Unrecognized(raw) => report.push(
            ValidationSeverity::Error,
            format!("{context}.coordinates"),
            format!("unrecognized positional tag '{raw}'"),
        ),
    }
}
