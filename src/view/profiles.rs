use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::section::Section;

/// A section set failed profile validation.
#[derive(Debug, Error)]
#[error("missing required sections for {}: {}", .profile, .missing.join(", "))]
pub struct ValidationError {
    pub profile: String,
    pub missing: Vec<String>,
}

/// An enumerated title-keyword filter for one role.
///
/// Profiles are fixed values, not ad-hoc predicates: each one lists include
/// and exclude keywords for section titles, plus the keywords a valid
/// context must contain. Keywords match titles case-insensitively as
/// substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub name: String,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub required: Vec<String>,
}

impl RoleProfile {
    /// Strategic view: objectives, architecture, progress. No implementation
    /// detail.
    pub fn coordinator() -> Self {
        Self {
            name: "coordinator".into(),
            include: vec![
                "objectives".into(),
                "architecture".into(),
                "progress".into(),
                "success criteria".into(),
                "current phase".into(),
            ],
            exclude: vec!["implementation details".into(), "technical specs".into()],
            required: vec![
                "objectives".into(),
                "current phase".into(),
                "success criteria".into(),
            ],
        }
    }

    /// Task view: the current task and its constraints. No strategic layer.
    pub fn executor() -> Self {
        Self {
            name: "executor".into(),
            include: vec![
                "current task".into(),
                "technical specs".into(),
                "success criteria".into(),
                "constraints".into(),
                "deliverables".into(),
            ],
            exclude: vec!["strategic decisions".into(), "human approvals".into()],
            required: vec![
                "current task".into(),
                "deliverables".into(),
                "constraints".into(),
            ],
        }
    }

    /// Sections this profile lets through: some include keyword matches the
    /// title and no exclude keyword does. Order is preserved.
    pub fn apply(&self, sections: &[Section]) -> Vec<Section> {
        sections
            .iter()
            .filter(|s| {
                self.include.iter().any(|k| matches(k, &s.title))
                    && !self.exclude.iter().any(|k| matches(k, &s.title))
            })
            .cloned()
            .collect()
    }

    /// Check that every required keyword matches at least one section title.
    pub fn validate(&self, sections: &[Section]) -> Result<(), ValidationError> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|k| !sections.iter().any(|s| matches(k, &s.title)))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                profile: self.name.clone(),
                missing,
            })
        }
    }
}

fn matches(keyword: &str, title: &str) -> bool {
    title.to_lowercase().contains(&keyword.to_lowercase())
}
