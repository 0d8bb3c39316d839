use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use super::section::Section;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static ROLE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[roles?:\s*([^\]]+)\]").unwrap());
static ROLE_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!--\s*roles?:\s*(.*?)\s*-->").unwrap());

/// Split markdown into headed sections.
///
/// A section runs from an ATX heading (up to six `#` followed by whitespace
/// and text) to the line before the next heading, or to the end of input.
/// Role tags come from `[role: x]` / `[roles: x, y]` brackets in the heading
/// and from the first `<!-- roles: ... -->` comment on each body line. Lines
/// before the first heading belong to no section and are dropped.
///
/// Never fails: malformed markup simply contributes no roles.
pub fn parse(content: &str) -> Vec<Section> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut sections = Vec::new();
    let mut open: Option<OpenSection> = None;

    for (index, line) in lines.iter().enumerate() {
        if let Some(caps) = HEADING_RE.captures(line) {
            if let Some(section) = open.take() {
                sections.push(section.close(index - 1));
            }
            let heading = &caps[2];
            open = Some(OpenSection {
                level: caps[1].len() as u8,
                title: strip_role_tags(heading),
                roles: heading_roles(heading),
                start_line: index,
                body: Vec::new(),
            });
        } else if let Some(section) = open.as_mut() {
            if let Some(found) = comment_roles(line) {
                section.roles.get_or_insert_with(BTreeSet::new).extend(found);
            }
            section.body.push(line);
        }
    }

    if let Some(section) = open.take() {
        sections.push(section.close(lines.len() - 1));
    }

    sections
}

struct OpenSection<'a> {
    level: u8,
    title: String,
    roles: Option<BTreeSet<String>>,
    start_line: usize,
    body: Vec<&'a str>,
}

impl OpenSection<'_> {
    fn close(self, end_line: usize) -> Section {
        Section {
            level: self.level,
            title: self.title,
            content: self.body.join("\n"),
            start_line: self.start_line,
            end_line,
            roles: self.roles,
            file_name: None,
            is_file_separator: false,
        }
    }
}

/// Union of every role bracket in a heading. `None` when the heading has no
/// usable tags.
fn heading_roles(heading: &str) -> Option<BTreeSet<String>> {
    let mut roles = BTreeSet::new();
    for caps in ROLE_TAG_RE.captures_iter(heading) {
        collect_roles(&caps[1], &mut roles);
    }
    (!roles.is_empty()).then_some(roles)
}

/// Roles from the first role comment on a body line, if any.
fn comment_roles(line: &str) -> Option<BTreeSet<String>> {
    let caps = ROLE_COMMENT_RE.captures(line)?;
    let mut roles = BTreeSet::new();
    collect_roles(&caps[1], &mut roles);
    (!roles.is_empty()).then_some(roles)
}

fn collect_roles(list: &str, into: &mut BTreeSet<String>) {
    for role in list.split(',') {
        let role = role.trim().to_lowercase();
        if !role.is_empty() {
            into.insert(role);
        }
    }
}

fn strip_role_tags(heading: &str) -> String {
    ROLE_TAG_RE.replace_all(heading, "").trim().to_string()
}
