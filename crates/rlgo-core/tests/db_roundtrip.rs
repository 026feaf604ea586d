//! DBファイルの保存・読み込み

use rlgo_core::db::level_path;
use rlgo_core::{Database, DatabaseConfig, Outcome};

#[test]
fn test_store_and_reload_levels() {
    let dir = tempfile::tempdir().unwrap();
    let mut built = Database::new(3);
    built.build(3, Some(dir.path())).unwrap();
    for k in 1..=3 {
        assert!(level_path(dir.path(), k).exists());
    }

    let reloaded = Database::open(&DatabaseConfig {
        dir: dir.path().to_path_buf(),
        max_empty: 3,
    })
    .unwrap();

    assert_eq!(reloaded.len(), built.len());
    for key in 0..built.len() {
        let entry = built.entry(key).unwrap();
        assert_eq!(reloaded.entry(key), Some(entry), "key {key}");
        assert_ne!(entry.outcome, Outcome::Unknown);
        assert_eq!(entry.eq_idx, None);
    }
}

#[test]
fn test_partial_directory_loads_available_levels() {
    let dir = tempfile::tempdir().unwrap();
    let mut built = Database::new(2);
    built.build(2, None).unwrap();
    built.store_level(dir.path(), 1).unwrap();

    let mut db = Database::new(3);
    assert_eq!(db.load(dir.path(), 3).unwrap(), 1);
    assert!(db.is_level_loaded(1));
    assert!(!db.is_level_loaded(2));
    assert!(db.get(&".x.".parse().unwrap()).is_none());
    assert_eq!(db.get(&".".parse().unwrap()).map(|e| e.outcome), Some(Outcome::P));
}

#[test]
fn test_store_skips_unbuilt_levels() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(2);
    db.store(dir.path()).unwrap();
    assert!(!level_path(dir.path(), 1).exists());
}
