use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use serde::Serialize;

use crate::section::Section;

/// One cached parse, keyed in [`SectionCache`] by canonical file path.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub file_path: PathBuf,
    pub last_modified: SystemTime,
    pub sections: Vec<Section>,
    pub cached_at: Instant,
}

/// Mtime- and age-checked cache of parsed files.
///
/// An entry is served only while the file's mtime still equals the recorded
/// one and the entry is younger than the store's max age. Stale entries are
/// replaced on the next load, never proactively evicted.
#[derive(Debug, Default)]
pub struct SectionCache {
    entries: HashMap<PathBuf, CacheEntry>,
    hits: u64,
    misses: u64,
}

/// Snapshot of cache occupancy and probe traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    /// Cached file paths, sorted for stable output.
    pub entries: Vec<String>,
    pub max_age_ms: u64,
    pub hits: u64,
    pub misses: u64,
}

impl SectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `path`, counting the probe as a hit or a miss.
    pub fn lookup(
        &mut self,
        path: &Path,
        modified: SystemTime,
        max_age: Duration,
    ) -> Option<Vec<Section>> {
        match self.entries.get(path) {
            Some(entry)
                if entry.last_modified == modified && entry.cached_at.elapsed() < max_age =>
            {
                self.hits += 1;
                Some(entry.sections.clone())
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, path: PathBuf, modified: SystemTime, sections: Vec<Section>) {
        let entry = CacheEntry {
            file_path: path.clone(),
            last_modified: modified,
            sections,
            cached_at: Instant::now(),
        };
        self.entries.insert(path, entry);
    }

    pub fn remove(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self, max_age: Duration) -> CacheStats {
        let mut entries: Vec<String> = self
            .entries
            .values()
            .map(|entry| entry.file_path.display().to_string())
            .collect();
        entries.sort();
        CacheStats {
            size: self.entries.len(),
            entries,
            max_age_ms: max_age.as_millis() as u64,
            hits: self.hits,
            misses: self.misses,
        }
    }
}
