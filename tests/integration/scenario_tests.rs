use asset_cache::cache::entry::{
    read_image_info, CacheEntry, ImageInfo, MESH_FILENAME, TEXTURE_FILENAME, THUMBNAIL_FILENAME,
};
use asset_cache::cache::{build_image_cache, build_mesh_cache};
use asset_cache::config::Settings;
use std::fs;
use tempfile::tempdir;

use super::fixtures::{entry_names, read_image, write_image, write_plain_obj, write_textured_obj};

#[test]
fn test_photo_and_plain_mesh_share_cache_dir() {
    let assets = tempdir().unwrap();
    let root = tempdir().unwrap();
    let cache = root.path().join("cache");
    write_image(&assets.path().join("photo1.jpg"), 800, 600);
    write_plain_obj(&assets.path().join("mesh1.obj"));
    let settings = Settings::default();

    let returned =
        build_image_cache(assets.path(), false, None, Some(&cache), &settings).unwrap();
    assert_eq!(returned, cache);
    build_mesh_cache(assets.path(), false, None, Some(&cache), &settings).unwrap();

    assert_eq!(entry_names(&cache), vec!["mesh1", "photo1"]);

    assert_eq!(
        read_image_info(&cache, "photo1").unwrap(),
        ImageInfo {
            width: 800,
            height: 600
        }
    );
    let photo = cache.join("photo1");
    assert_eq!(
        fs::read(photo.join(TEXTURE_FILENAME)).unwrap(),
        fs::read(assets.path().join("photo1.jpg")).unwrap()
    );
    let thumb = read_image(&photo.join(THUMBNAIL_FILENAME));
    assert_eq!((thumb.width(), thumb.height()), (640, 480));

    assert_eq!(entry_names(&cache.join("mesh1")), vec![MESH_FILENAME]);
}

#[test]
fn test_textured_mesh_entry_has_all_files() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    write_textured_obj(assets.path(), "head", 320, 200);

    build_mesh_cache(
        assets.path(),
        false,
        None,
        Some(cache.path()),
        &Settings::default(),
    )
    .unwrap();

    let entry = CacheEntry::inspect(cache.path(), "head").unwrap();
    assert!(entry.has_image_files());
    assert!(entry.has_mesh);
    assert_eq!(
        read_image_info(cache.path(), "head").unwrap(),
        ImageInfo {
            width: 320,
            height: 200
        }
    );
    // Smaller textures are scaled up to the thumbnail width.
    let thumb = read_image(&cache.path().join("head").join(THUMBNAIL_FILENAME));
    assert_eq!((thumb.width(), thumb.height()), (640, 400));
}

#[test]
fn test_empty_asset_dir_creates_cache_dir_only() {
    let assets = tempdir().unwrap();
    let root = tempdir().unwrap();
    let cache = root.path().join("fresh_cache");
    assert!(!cache.exists());

    let returned =
        build_image_cache(assets.path(), true, None, Some(&cache), &Settings::default()).unwrap();

    assert_eq!(returned, cache);
    assert!(cache.is_dir());
    assert!(entry_names(&cache).is_empty());
}

#[test]
fn test_thumbnail_geometry_for_various_sizes() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    write_image(&assets.path().join("wide.png"), 1000, 333);
    write_image(&assets.path().join("tiny.png"), 64, 48);
    write_image(&assets.path().join("tall.png"), 300, 900);

    build_image_cache(
        assets.path(),
        false,
        None,
        Some(cache.path()),
        &Settings::default(),
    )
    .unwrap();

    for (id, expected) in [("wide", (640, 213)), ("tiny", (640, 480)), ("tall", (640, 1920))] {
        let thumb = read_image(&cache.path().join(id).join(THUMBNAIL_FILENAME));
        assert_eq!((thumb.width(), thumb.height()), expected, "thumbnail of {id}");
    }
}

#[test]
fn test_png_texture_is_reencoded_as_jpeg() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    write_image(&assets.path().join("scan.png"), 50, 40);

    build_image_cache(
        assets.path(),
        false,
        None,
        Some(cache.path()),
        &Settings::default(),
    )
    .unwrap();

    let texture = fs::read(cache.path().join("scan").join(TEXTURE_FILENAME)).unwrap();
    assert_eq!(
        image::guess_format(&texture).unwrap(),
        image::ImageFormat::Jpeg
    );
    let decoded = image::load_from_memory(&texture).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (50, 40));
}

#[test]
fn test_texture_name_with_space_is_resolved() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    fs::write(
        assets.path().join("bust.obj"),
        "mtllib bust.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nusemtl skin\nf 1/1 2/2 3/3\n",
    )
    .unwrap();
    fs::write(
        assets.path().join("bust.mtl"),
        "newmtl skin\nmap_Kd -s 1 1 1 head skin.jpg\n",
    )
    .unwrap();
    write_image(&assets.path().join("head skin.jpg"), 64, 32);

    build_mesh_cache(
        assets.path(),
        false,
        None,
        Some(cache.path()),
        &Settings::default(),
    )
    .unwrap();

    assert_eq!(
        entry_names(&cache.path().join("bust")),
        vec!["image-info", "mesh", "texture", "thumbnail"]
    );
}
