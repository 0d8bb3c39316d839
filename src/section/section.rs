use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The atomic unit of context: one headed block of a markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading depth, 1 through 6.
    pub level: u8,
    /// Heading text with role markup stripped, trimmed.
    pub title: String,
    /// Body lines joined with `\n`, untrimmed.
    pub content: String,
    /// 0-based line of the heading in the source file.
    pub start_line: usize,
    /// 0-based last line belonging to this section.
    pub end_line: usize,
    /// Lower-cased role tags. `None` means the section carries no role
    /// markup at all, which is distinct from an empty set.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub roles: Option<BTreeSet<String>>,
    /// Source file name, set by directory loads and merges.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file_name: Option<String>,
    /// True only for the synthetic separators produced by a merge.
    #[serde(skip_serializing_if = "is_false", default)]
    pub is_file_separator: bool,
}

fn is_false(value: &bool) -> bool {
    !value
}

impl Section {
    /// Whether this section is tagged with `role`, case-insensitively.
    /// Sections without role markup match no role.
    pub fn has_role(&self, role: &str) -> bool {
        let role = role.to_lowercase();
        self.roles.as_ref().is_some_and(|roles| roles.contains(&role))
    }
}

/// The sections of a single file, as returned by a directory load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSections {
    pub file_name: String,
    pub sections: Vec<Section>,
}
