use asset_cache::cache::entry::{CacheEntry, TEXTURE_FILENAME};
use asset_cache::cache::{build_image_cache, build_mesh_cache};
use asset_cache::config::Settings;
use asset_cache::error::CacheError;
use std::fs;
use tempfile::tempdir;

use super::fixtures::{entry_names, write_image, write_plain_obj};

#[test]
fn test_decode_failure_stops_batch() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    for id in ["a", "b", "d", "e"] {
        write_image(&assets.path().join(format!("{id}.jpg")), 12, 12);
    }
    fs::write(assets.path().join("c.jpg"), b"definitely not a jpeg").unwrap();

    let err = build_image_cache(
        assets.path(),
        false,
        None,
        Some(cache.path()),
        &Settings::default(),
    )
    .unwrap_err();

    match &err {
        CacheError::AssetDecode { path, .. } => assert!(path.ends_with("c.jpg")),
        other => panic!("Expected AssetDecode, got: {:?}", other),
    }
    assert!(!err.is_fatal_startup());

    for id in ["a", "b"] {
        assert!(CacheEntry::inspect(cache.path(), id).unwrap().has_image_files());
    }
    // The failing asset's directory was created before decoding.
    let partial = CacheEntry::inspect(cache.path(), "c").unwrap();
    assert!(!partial.has_texture);
    assert!(CacheEntry::inspect(cache.path(), "d").is_none());
    assert!(CacheEntry::inspect(cache.path(), "e").is_none());
}

#[test]
fn test_partial_entry_is_not_retried() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    fs::write(assets.path().join("a.png"), b"garbage").unwrap();
    let settings = Settings::default();

    assert!(build_image_cache(assets.path(), false, None, Some(cache.path()), &settings).is_err());

    // Fixing the source does not help: "a" already has a directory.
    write_image(&assets.path().join("a.png"), 8, 8);
    build_image_cache(assets.path(), false, None, Some(cache.path()), &settings).unwrap();
    assert!(!cache.path().join("a").join(TEXTURE_FILENAME).exists());
}

#[test]
fn test_malformed_mesh_fails() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    write_plain_obj(&assets.path().join("a.obj"));
    fs::write(assets.path().join("b.obj"), "v 0 0 0\nf 1 2 3\n").unwrap();

    let err = build_mesh_cache(
        assets.path(),
        false,
        None,
        Some(cache.path()),
        &Settings::default(),
    )
    .unwrap_err();

    assert!(matches!(err, CacheError::AssetDecode { .. }));
    assert_eq!(entry_names(cache.path()), vec!["a", "b"]);
}
