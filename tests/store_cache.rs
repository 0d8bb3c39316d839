use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tempfile::TempDir;

use context_roles::store::{ContextError, ContextStore, StoreConfig};

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn quiet_store() -> ContextStore {
    ContextStore::new(StoreConfig {
        verbose_logging: false,
        ..StoreConfig::default()
    })
}

#[test]
fn second_load_within_max_age_is_a_hit() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "notes.md", "# A [role: coordinator]\nbody");
    let mut store = quiet_store();

    let first = store.load_file(&path).expect("first load");
    let second = store.load_file(&path).expect("second load");
    assert_eq!(first, second);

    let stats = store.cache_stats();
    assert_eq!(stats.size, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn zero_max_age_forces_reread() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "notes.md", "# A\nbody");
    let mut store = quiet_store();
    store.set_cache_max_age(Duration::ZERO);

    store.load_file(&path).expect("first load");
    store.load_file(&path).expect("second load");

    let stats = store.cache_stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.max_age_ms, 0);
}

#[test]
fn modified_file_is_reparsed() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "notes.md", "# Old\nbody");
    let mut store = quiet_store();

    let first = store.load_file(&path).expect("first load");
    assert_eq!(first[0].title, "Old");

    thread::sleep(Duration::from_millis(50));
    fs::write(&path, "# New\nbody").expect("rewrite");

    let second = store.load_file(&path).expect("second load");
    assert_eq!(second[0].title, "New");
    assert_eq!(store.cache_stats().misses, 2);
}

#[test]
fn clear_cache_empties_the_store() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "notes.md", "# A\nbody");
    let mut store = quiet_store();

    store.load_file(&path).expect("load");
    assert_eq!(store.cache_stats().size, 1);

    store.clear_cache();
    let stats = store.cache_stats();
    assert_eq!(stats.size, 0);
    assert!(stats.entries.is_empty());

    store.load_file(&path).expect("reload");
    assert_eq!(store.cache_stats().misses, 2);
}

#[test]
fn stats_list_cached_paths() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "notes.md", "# A\nbody");
    let mut store = quiet_store();

    store.load_file(&path).expect("load");
    let stats = store.cache_stats();
    assert_eq!(stats.entries.len(), 1);
    assert!(stats.entries[0].ends_with("notes.md"));
}

#[test]
fn default_max_age_is_five_minutes() {
    let store = ContextStore::default();
    assert_eq!(store.cache_stats().max_age_ms, 300_000);
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = quiet_store();
    let result = store.load_file(dir.path().join("absent.md"));
    assert!(matches!(result, Err(ContextError::NotFound { .. })));
}

#[test]
fn silent_errors_swallow_load_failures() {
    let dir = TempDir::new().expect("tempdir");
    let mut store = ContextStore::new(StoreConfig {
        silent_errors: true,
        verbose_logging: false,
        ..StoreConfig::default()
    });
    let sections = store
        .load_file(dir.path().join("absent.md"))
        .expect("silent mode returns Ok");
    assert!(sections.is_empty());
}

#[test]
fn append_update_invalidates_and_lands_in_next_load() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "notes.md", "# Plan\nbody\n");
    let mut store = quiet_store();

    let before = store.load_file(&path).expect("load");
    assert_eq!(before.len(), 1);
    assert_eq!(store.cache_stats().size, 1);

    store
        .append_update(&path, "Phase 1 complete")
        .expect("append");
    assert_eq!(store.cache_stats().size, 0);

    let after = store.load_file(&path).expect("reload");
    assert_eq!(after.len(), 2);
    assert_eq!(after[1].level, 2);
    assert!(after[1].title.starts_with("Update - "));
    assert!(after[1].content.contains("Phase 1 complete"));
    assert_eq!(store.cache_stats().misses, 2);
}

#[test]
fn store_views_filter_one_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(
        &dir,
        "notes.md",
        "# A [role: coordinator]\na\n# B [roles: coordinator, executor]\nb\n# C\nc",
    );
    let mut store = quiet_store();

    assert_eq!(store.coordinator_context(&path).expect("coordinator").len(), 2);
    assert_eq!(store.executor_context(&path).expect("executor").len(), 1);
    assert_eq!(store.shared_context(&path).expect("shared").len(), 1);
    assert_eq!(store.all_context(&path).expect("all").len(), 3);
    assert_eq!(store.unassigned_context(&path).expect("unassigned").len(), 1);

    let analysis = store.analyze_content(&path).expect("analysis");
    assert_eq!(analysis.total, 3);
    assert_eq!(analysis.shared, 1);
}
