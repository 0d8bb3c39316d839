use std::collections::BTreeMap;

use serde::Serialize;

use crate::section::Section;

use super::filters::{COORDINATOR_ROLE, EXECUTOR_ROLE};

/// Role distribution of a section list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContentAnalysis {
    pub total: usize,
    pub coordinator: usize,
    pub executor: usize,
    pub shared: usize,
    pub unmarked: usize,
    pub percentage_coordinator: u32,
    pub percentage_executor: u32,
    pub percentage_shared: u32,
    pub percentage_unmarked: u32,
}

/// Count sections per view and express each count as a rounded percentage
/// of the total. Empty input yields the all-zero analysis.
pub fn analyze_content(sections: &[Section]) -> ContentAnalysis {
    let total = sections.len();
    if total == 0 {
        return ContentAnalysis::default();
    }

    let coordinator = sections
        .iter()
        .filter(|s| s.has_role(COORDINATOR_ROLE))
        .count();
    let executor = sections.iter().filter(|s| s.has_role(EXECUTOR_ROLE)).count();
    let shared = sections
        .iter()
        .filter(|s| s.has_role(COORDINATOR_ROLE) && s.has_role(EXECUTOR_ROLE))
        .count();
    let unmarked = sections.iter().filter(|s| s.roles.is_none()).count();

    ContentAnalysis {
        total,
        coordinator,
        executor,
        shared,
        unmarked,
        percentage_coordinator: percentage(coordinator, total),
        percentage_executor: percentage(executor, total),
        percentage_shared: percentage(shared, total),
        percentage_unmarked: percentage(unmarked, total),
    }
}

/// Occurrences of every role tag across `sections`.
pub fn role_stats(sections: &[Section]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for section in sections {
        if let Some(roles) = &section.roles {
            for role in roles {
                *stats.entry(role.clone()).or_insert(0) += 1;
            }
        }
    }
    stats
}

/// Advisory notes for content authors based on an analysis.
pub fn authoring_notes(analysis: &ContentAnalysis) -> Vec<&'static str> {
    let mut notes = Vec::new();
    if analysis.total == 0 {
        return notes;
    }
    if analysis.percentage_unmarked > 50 {
        notes.push("Most sections are unmarked; role views will miss them.");
    }
    if analysis.shared == 0 {
        notes.push("No shared sections; roles have no common ground.");
    }
    if analysis.coordinator == 0 {
        notes.push("No coordinator sections; strategic context is missing.");
    }
    if analysis.executor == 0 {
        notes.push("No executor sections; task context is missing.");
    }
    if notes.is_empty() {
        notes.push("Role coverage looks well distributed.");
    }
    notes
}

/// Nearest-integer percentage of `part` in `total`.
fn percentage(part: usize, total: usize) -> u32 {
    ((part as f64 / total as f64) * 100.0).round() as u32
}
