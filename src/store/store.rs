use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::section::{parse, FileSections, Section};
use crate::view::analysis::{self, ContentAnalysis};
use crate::view::filters;

use super::cache::{CacheStats, SectionCache};
use super::merge;

/// Failure surfaced by a store operation.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("context not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },
    #[error("io error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ContextError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => ContextError::NotFound { path },
            io::ErrorKind::PermissionDenied => ContextError::PermissionDenied { path },
            _ => ContextError::Io { path, source },
        }
    }
}

/// Store construction options.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long a cache entry may be served before the file is re-read.
    pub cache_max_age: Duration,
    /// Swallow load failures and return empty results instead.
    pub silent_errors: bool,
    /// Emit per-load diagnostics at debug level.
    pub verbose_logging: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cache_max_age: Duration::from_secs(300),
            silent_errors: false,
            verbose_logging: true,
        }
    }
}

/// Owner of the section cache and entry point for every load.
///
/// One store, one cache: entries belong to the instance and change only
/// through `&mut` methods. The cache is an optimization; every answer can
/// be recomputed from the filesystem.
#[derive(Debug, Default)]
pub struct ContextStore {
    config: StoreConfig,
    cache: SectionCache,
}

impl ContextStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            cache: SectionCache::new(),
        }
    }

    /// Load and section one markdown file, serving from cache when fresh.
    ///
    /// A cached parse is reused only while the file's mtime is unchanged and
    /// the entry is younger than [`StoreConfig::cache_max_age`]. With
    /// `silent_errors`, failures are logged and an empty list is returned.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<Section>, ContextError> {
        let path = path.as_ref();
        match self.read_with_cache(path) {
            Ok(sections) => Ok(sections),
            Err(e) => self.absorb(path, e),
        }
    }

    /// Section every markdown file directly inside `dir`.
    ///
    /// Only plain files with a literal `.md` suffix are read. A file that
    /// fails to load is logged and skipped; the rest of the directory still
    /// loads. Entries come back in directory listing order, which the OS
    /// does not guarantee to be stable; callers wanting a fixed order sort
    /// the result.
    pub fn load_directory(
        &mut self,
        dir: impl AsRef<Path>,
    ) -> Result<Vec<FileSections>, ContextError> {
        let dir = dir.as_ref();
        match self.read_directory(dir) {
            Ok(files) => Ok(files),
            Err(e) => self.absorb(dir, e),
        }
    }

    /// Merge per-file section lists into one sequence with separator
    /// sections, in the order given. See [`merge::merge_context`].
    pub fn merge_context(&self, files: &[FileSections]) -> Vec<Section> {
        merge::merge_context(files)
    }

    /// Sections of `path` visible to the coordinator role.
    pub fn coordinator_context(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Section>, ContextError> {
        let sections = self.load_file(path)?;
        Ok(filters::coordinator_sections(&sections))
    }

    /// Sections of `path` visible to the executor role.
    pub fn executor_context(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Section>, ContextError> {
        let sections = self.load_file(path)?;
        Ok(filters::executor_sections(&sections))
    }

    /// Sections of `path` tagged for both first-class roles.
    pub fn shared_context(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Section>, ContextError> {
        let sections = self.load_file(path)?;
        Ok(filters::shared_sections(&sections))
    }

    /// Every section of `path`, regardless of role markup.
    pub fn all_context(&mut self, path: impl AsRef<Path>) -> Result<Vec<Section>, ContextError> {
        self.load_file(path)
    }

    /// Sections of `path` carrying no role markup at all.
    pub fn unassigned_context(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<Section>, ContextError> {
        let sections = self.load_file(path)?;
        Ok(filters::unassigned_sections(&sections))
    }

    /// Role distribution of one file's sections.
    pub fn analyze_content(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<ContentAnalysis, ContextError> {
        let sections = self.load_file(path)?;
        Ok(analysis::analyze_content(&sections))
    }

    /// Append a timestamped update section to `path` and drop its cache
    /// entry, so the next load re-reads the file.
    pub fn append_update(
        &mut self,
        path: impl AsRef<Path>,
        note: &str,
    ) -> Result<(), ContextError> {
        let path = path.as_ref();
        match self.write_update(path, note) {
            Ok(()) => Ok(()),
            Err(e) => self.absorb(path, e),
        }
    }

    /// Drop every cache entry.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        if self.config.verbose_logging {
            debug!("cache cleared");
        }
    }

    /// Change the freshness window for future cache probes. Existing entries
    /// are not evicted; they simply stop qualifying as fresh.
    pub fn set_cache_max_age(&mut self, max_age: Duration) {
        self.config.cache_max_age = max_age;
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats(self.config.cache_max_age)
    }

    fn read_with_cache(&mut self, path: &Path) -> Result<Vec<Section>, ContextError> {
        let metadata = fs::metadata(path).map_err(|e| ContextError::from_io(path, e))?;
        let modified = metadata
            .modified()
            .map_err(|e| ContextError::from_io(path, e))?;
        let key = cache_key(path);

        if let Some(sections) = self.cache.lookup(&key, modified, self.config.cache_max_age) {
            if self.config.verbose_logging {
                debug!(path = %path.display(), sections = sections.len(), "cache hit");
            }
            return Ok(sections);
        }

        let content = fs::read_to_string(path).map_err(|e| ContextError::from_io(path, e))?;
        let sections = parse(&content);
        if self.config.verbose_logging {
            debug!(
                path = %path.display(),
                bytes = content.len(),
                sections = sections.len(),
                "parsed file"
            );
        }
        self.cache.insert(key, modified, sections.clone());
        Ok(sections)
    }

    fn read_directory(&mut self, dir: &Path) -> Result<Vec<FileSections>, ContextError> {
        let entries = fs::read_dir(dir).map_err(|e| ContextError::from_io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ContextError::from_io(dir, e))?;
            let path = entry.path();
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Some(file_name) = markdown_file_name(&path) else {
                continue;
            };
            match self.read_with_cache(&path) {
                Ok(mut sections) => {
                    for section in &mut sections {
                        section.file_name = Some(file_name.clone());
                    }
                    files.push(FileSections {
                        file_name,
                        sections,
                    });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable file");
                }
            }
        }
        if self.config.verbose_logging {
            debug!(dir = %dir.display(), files = files.len(), "directory loaded");
        }
        Ok(files)
    }

    fn write_update(&mut self, path: &Path, note: &str) -> Result<(), ContextError> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let block = format!("\n\n## Update - {timestamp}\n{note}\n");

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| ContextError::from_io(path, e))?;
        file.write_all(block.as_bytes())
            .map_err(|e| ContextError::from_io(path, e))?;

        self.cache.remove(&cache_key(path));
        if self.config.verbose_logging {
            debug!(path = %path.display(), "appended update, cache entry dropped");
        }
        Ok(())
    }

    fn absorb<T: Default>(&self, path: &Path, error: ContextError) -> Result<T, ContextError> {
        if self.config.silent_errors {
            warn!(path = %path.display(), error = %error, "load failed, returning empty context");
            Ok(T::default())
        } else {
            Err(error)
        }
    }
}

/// Canonical path where possible, so aliases of one file share an entry.
fn cache_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn markdown_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.ends_with(".md").then(|| name.to_string())
}
