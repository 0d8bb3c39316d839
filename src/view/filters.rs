use crate::section::Section;

/// First-class role tags. Any tag is legal in markup; only these two have
/// dedicated views.
pub const COORDINATOR_ROLE: &str = "coordinator";
pub const EXECUTOR_ROLE: &str = "executor";

/// Sections tagged with `role`, case-insensitively. Sections without role
/// markup never match any role.
pub fn by_role(sections: &[Section], role: &str) -> Vec<Section> {
    sections
        .iter()
        .filter(|s| s.has_role(role))
        .cloned()
        .collect()
}

pub fn coordinator_sections(sections: &[Section]) -> Vec<Section> {
    by_role(sections, COORDINATOR_ROLE)
}

pub fn executor_sections(sections: &[Section]) -> Vec<Section> {
    by_role(sections, EXECUTOR_ROLE)
}

/// Sections tagged for both first-class roles.
pub fn shared_sections(sections: &[Section]) -> Vec<Section> {
    sections
        .iter()
        .filter(|s| s.has_role(COORDINATOR_ROLE) && s.has_role(EXECUTOR_ROLE))
        .cloned()
        .collect()
}

/// Sections carrying no role markup at all. Role filters never return
/// these; this accessor is the only way to reach them short of the full
/// section list.
pub fn unassigned_sections(sections: &[Section]) -> Vec<Section> {
    sections
        .iter()
        .filter(|s| s.roles.is_none())
        .cloned()
        .collect()
}

/// Sections tagged only with roles outside the first-class pair.
pub fn foreign_role_sections(sections: &[Section]) -> Vec<Section> {
    sections
        .iter()
        .filter(|s| {
            s.roles.is_some() && !s.has_role(COORDINATOR_ROLE) && !s.has_role(EXECUTOR_ROLE)
        })
        .cloned()
        .collect()
}
