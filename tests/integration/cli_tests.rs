use asset_cache::cache::{plan_cache, BuildOptions};
use asset_cache::cli::Cli;
use asset_cache::config::Settings;
use asset_cache::error::ExitCode;
use asset_cache::run_app;
use asset_cache::scanner::ImagePaths;
use clap::Parser;
use std::fs;
use tempfile::tempdir;

use super::fixtures::{entry_names, write_image, write_plain_obj};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("asset-cache").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_image_command_builds_cache() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    write_image(&assets.path().join("photo1.jpg"), 32, 24);

    let cli = parse(&[
        "-q",
        "image",
        assets.path().to_str().unwrap(),
        "--cache-dir",
        cache.path().to_str().unwrap(),
    ]);
    let code = run_app(cli).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(entry_names(cache.path()), vec!["photo1"]);
}

#[test]
fn test_mesh_command_with_filters() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    write_plain_obj(&assets.path().join("scans").join("bust.obj"));
    write_plain_obj(&assets.path().join("ignored.obj"));
    fs::write(assets.path().join("scene.gltf"), "{}").unwrap();

    let cli = parse(&[
        "mesh",
        assets.path().to_str().unwrap(),
        "-r",
        "-e",
        "obj",
        "-c",
        cache.path().to_str().unwrap(),
        "--no-progress",
    ]);
    run_app(cli).unwrap();

    assert_eq!(entry_names(cache.path()), vec!["bust", "ignored"]);
}

#[test]
fn test_dry_run_writes_no_entries() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    write_image(&assets.path().join("a.png"), 8, 8);

    let cli = parse(&[
        "image",
        assets.path().to_str().unwrap(),
        "--cache-dir",
        cache.path().to_str().unwrap(),
        "--dry-run",
    ]);
    assert_eq!(run_app(cli).unwrap(), ExitCode::Success);
    assert!(entry_names(cache.path()).is_empty());
}

#[test]
fn test_dry_run_lists_uncached_ids_and_paths() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    write_image(&assets.path().join("b.png"), 8, 8);
    write_image(&assets.path().join("a.jpg"), 8, 8);
    write_image(&assets.path().join("done.png"), 8, 8);
    fs::create_dir(cache.path().join("done")).unwrap();

    let options = BuildOptions::new(assets.path()).cache_dir(Some(cache.path()));
    let plan = plan_cache(&ImagePaths, &options, &Settings::default()).unwrap();

    let asset_dir = assets.path();
    assert_eq!(
        plan.listing(),
        format!(
            "a\t{}\nb\t{}\n",
            asset_dir.join("a.jpg").display(),
            asset_dir.join("b.png").display()
        )
    );
    assert_eq!(entry_names(cache.path()), vec!["done"]);
}

#[test]
fn test_invalid_asset_dir_maps_to_invalid_input() {
    let root = tempdir().unwrap();
    let missing = root.path().join("missing");

    let cli = parse(&[
        "-q",
        "image",
        missing.to_str().unwrap(),
        "--cache-dir",
        root.path().to_str().unwrap(),
    ]);
    let err = run_app(cli).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidInput);
    assert!(err.to_string().contains("is not a directory"));
}

#[test]
fn test_decode_failure_maps_to_general_error() {
    let assets = tempdir().unwrap();
    let cache = tempdir().unwrap();
    fs::write(assets.path().join("broken.png"), b"nope").unwrap();

    let cli = parse(&[
        "-q",
        "image",
        assets.path().to_str().unwrap(),
        "--cache-dir",
        cache.path().to_str().unwrap(),
    ]);
    let err = run_app(cli).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
}

#[test]
fn test_missing_config_file_is_error() {
    let assets = tempdir().unwrap();

    let cli = parse(&[
        "--config",
        "/nonexistent/asset-cache.toml",
        "image",
        assets.path().to_str().unwrap(),
    ]);
    assert!(run_app(cli).is_err());
}
