use crate::section::{FileSections, Section};

/// Join per-file section lists into a single sequence.
///
/// Each file contributes one synthetic separator section (level 1, flagged
/// with [`Section::is_file_separator`]) followed by its own sections pushed
/// one level deeper, capped at 6. Input order is preserved exactly as given;
/// callers control it.
pub fn merge_context(files: &[FileSections]) -> Vec<Section> {
    let mut merged = Vec::new();
    for file in files {
        merged.push(separator(&file.file_name));
        for section in &file.sections {
            let mut section = section.clone();
            section.level = (section.level + 1).min(6);
            section.file_name = Some(file.file_name.clone());
            merged.push(section);
        }
    }
    merged
}

fn separator(file_name: &str) -> Section {
    Section {
        level: 1,
        title: file_name.to_string(),
        content: format!("Contents from {file_name}"),
        start_line: 0,
        end_line: 0,
        roles: None,
        file_name: Some(file_name.to_string()),
        is_file_separator: true,
    }
}
