//! Tests for the per-analyzer result cache: idempotence, invalidation,
//! path-set sensitivity, and self-healing.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use lintmux_runner::ResultCache;

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

fn path_set(paths: &[&PathBuf]) -> BTreeSet<PathBuf> {
    paths.iter().map(|p| (*p).clone()).collect()
}

/// Keep file mtimes strictly before the cache timestamp.
fn settle() {
    std::thread::sleep(Duration::from_millis(20));
}

#[test]
fn put_then_get_is_a_hit_when_nothing_changed() {
    let dir = tempdir();
    let a = write(dir.path(), "a.py", "print(1)");
    let b = write(dir.path(), "b.py", "print(2)");
    let paths = path_set(&[&a, &b]);

    let cache = ResultCache::new(dir.path().join("cache")).unwrap();
    settle();
    cache
        .put("toolx", "1.0.0", &paths, "raw output", SystemTime::now())
        .unwrap();

    assert_eq!(cache.get("toolx", "1.0.0", &paths).as_deref(), Some("raw output"));
    // Still a hit: get is read-only.
    assert_eq!(cache.get("toolx", "1.0.0", &paths).as_deref(), Some("raw output"));
}

#[test]
fn touching_any_input_invalidates() {
    let dir = tempdir();
    let a = write(dir.path(), "a.py", "print(1)");
    let b = write(dir.path(), "b.py", "print(2)");
    let paths = path_set(&[&a, &b]);

    let cache = ResultCache::new(dir.path().join("cache")).unwrap();
    settle();
    cache
        .put("toolx", "1.0.0", &paths, "raw output", SystemTime::now())
        .unwrap();

    settle();
    std::fs::write(&b, "print(3)").unwrap();

    assert_eq!(cache.get("toolx", "1.0.0", &paths), None);
}

#[test]
fn requesting_a_different_path_set_is_a_miss() {
    let dir = tempdir();
    let a = write(dir.path(), "a.py", "print(1)");
    let b = write(dir.path(), "b.py", "print(2)");

    let cache = ResultCache::new(dir.path().join("cache")).unwrap();
    settle();
    cache
        .put(
            "toolx",
            "1.0.0",
            &path_set(&[&a, &b]),
            "raw output",
            SystemTime::now(),
        )
        .unwrap();

    assert_eq!(cache.get("toolx", "1.0.0", &path_set(&[&a])), None);
}

#[test]
fn version_mismatch_is_a_miss() {
    let dir = tempdir();
    let a = write(dir.path(), "a.py", "print(1)");
    let paths = path_set(&[&a]);

    let cache = ResultCache::new(dir.path().join("cache")).unwrap();
    settle();
    cache
        .put("toolx", "1.0.0", &paths, "raw output", SystemTime::now())
        .unwrap();

    assert_eq!(cache.get("toolx", "2.0.0", &paths), None);
}

#[test]
fn corrupt_metadata_self_heals() {
    let dir = tempdir();
    let a = write(dir.path(), "a.py", "print(1)");
    let paths = path_set(&[&a]);
    let cache_dir = dir.path().join("cache");

    let cache = ResultCache::new(&cache_dir).unwrap();
    settle();
    cache
        .put("toolx", "1.0.0", &paths, "raw output", SystemTime::now())
        .unwrap();

    std::fs::write(cache_dir.join("toolx-meta.json"), "{not json").unwrap();

    assert_eq!(cache.get("toolx", "1.0.0", &paths), None);
    // Both files were deleted, not just distrusted.
    assert!(!cache_dir.join("toolx-meta.json").exists());
    assert!(!cache_dir.join("toolx.data").exists());
}

#[test]
fn orphaned_data_file_is_cleaned_up() {
    let dir = tempdir();
    let a = write(dir.path(), "a.py", "print(1)");
    let paths = path_set(&[&a]);
    let cache_dir = dir.path().join("cache");

    let cache = ResultCache::new(&cache_dir).unwrap();
    cache
        .put("toolx", "1.0.0", &paths, "raw output", SystemTime::now())
        .unwrap();
    std::fs::remove_file(cache_dir.join("toolx-meta.json")).unwrap();

    assert_eq!(cache.get("toolx", "1.0.0", &paths), None);
    assert!(!cache_dir.join("toolx.data").exists());
}

#[test]
fn put_replaces_prior_entry() {
    let dir = tempdir();
    let a = write(dir.path(), "a.py", "print(1)");
    let paths = path_set(&[&a]);

    let cache = ResultCache::new(dir.path().join("cache")).unwrap();
    settle();
    cache
        .put("toolx", "1.0.0", &paths, "first", SystemTime::now())
        .unwrap();
    settle();
    cache
        .put("toolx", "1.0.0", &paths, "second", SystemTime::now())
        .unwrap();

    assert_eq!(cache.get("toolx", "1.0.0", &paths).as_deref(), Some("second"));
}

#[test]
fn input_modified_during_a_run_is_never_served_stale() {
    let dir = tempdir();
    let a = write(dir.path(), "a.py", "print(1)");
    let paths = path_set(&[&a]);

    let cache = ResultCache::new(dir.path().join("cache")).unwrap();
    settle();

    // The run started, then the input changed while it was in flight, and
    // only afterwards did the output land in the cache.
    let started = SystemTime::now();
    settle();
    std::fs::write(&a, "print(2)").unwrap();
    settle();
    cache
        .put("toolx", "1.0.0", &paths, "stale output", started)
        .unwrap();

    assert_eq!(cache.get("toolx", "1.0.0", &paths), None);
}

#[test]
fn directory_paths_are_probed_recursively() {
    let dir = tempdir();
    let src = dir.path().join("src");
    write(dir.path(), "src/deep/a.py", "print(1)");
    let paths = path_set(&[&src]);

    let cache = ResultCache::new(dir.path().join("cache")).unwrap();
    settle();
    cache
        .put("toolx", "1.0.0", &paths, "raw output", SystemTime::now())
        .unwrap();
    assert_eq!(cache.get("toolx", "1.0.0", &paths).as_deref(), Some("raw output"));

    settle();
    write(dir.path(), "src/deep/b.py", "print(2)");
    assert_eq!(cache.get("toolx", "1.0.0", &paths), None);
}
