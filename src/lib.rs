//! asset-cache - Incremental cache of normalized image and mesh assets
//!
//! Scans a directory of source images or meshes and writes, for every asset
//! not yet cached, a directory of derived files (metadata, JPEG texture,
//! thumbnail, compressed geometry) that a serving layer can hand out
//! without decoding the source files again.

pub mod cache;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod progress;
pub mod scanner;

use std::sync::Arc;

use anyhow::Result;

use cache::{build_cache, plan_cache, AssetCacher, BuildOptions, ImageCacher, MeshCacher, SerialDriver};
use cli::Cli;
use config::Settings;
use error::ExitCode;
use progress::Progress;
use scanner::{AssetKind, ImagePaths, MeshPaths, PathEnumerator};

/// Run the application for parsed CLI arguments.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let settings = Settings::load(cli.config.as_deref())?;
    let (kind, args) = cli.command.parts();
    let options = BuildOptions::new(&args.asset_dir)
        .recursive(args.recursive)
        .ext(args.ext.as_deref())
        .cache_dir(args.cache_dir.as_deref());

    let (enumerator, cacher): (Box<dyn PathEnumerator>, Box<dyn AssetCacher>) = match kind {
        AssetKind::Image => (Box::new(ImagePaths), Box::new(ImageCacher::new(&settings))),
        AssetKind::Mesh => (Box::new(MeshPaths), Box::new(MeshCacher::new(&settings))),
    };

    if args.dry_run {
        let plan = plan_cache(enumerator.as_ref(), &options, &settings)?;
        print!("{}", plan.listing());
        return Ok(ExitCode::Success);
    }

    let mut driver = SerialDriver::new();
    if !cli.quiet && !args.no_progress {
        driver = driver.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let cache_dir = build_cache(
        enumerator.as_ref(),
        cacher.as_ref(),
        &driver,
        &options,
        &settings,
    )?;
    println!("{}", cache_dir.display());
    Ok(ExitCode::Success)
}
