//! Entry points that build the image and mesh caches.

use std::path::{Path, PathBuf};

use super::batch::{BatchDriver, CacheJob, SerialDriver};
use super::diff::{existing_entries, uncached_jobs};
use super::dirs::{ensure_asset_dir, ensure_cache_dir};
use super::image::ImageCacher;
use super::mapping::{build_asset_mapping, AssetMapping};
use super::mesh::MeshCacher;
use super::AssetCacher;
use crate::config::Settings;
use crate::error::CacheError;
use crate::scanner::{GlobPattern, ImagePaths, MeshPaths, PathEnumerator};

/// Where to look for assets and where to cache them.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Directory holding the source assets
    pub asset_dir: PathBuf,
    /// Search subdirectories too
    pub recursive: bool,
    /// Only consider files with this extension
    pub ext: Option<String>,
    /// Cache directory; defaults to `settings.cache_dir_name` in the cwd
    pub cache_dir: Option<PathBuf>,
}

impl BuildOptions {
    #[must_use]
    pub fn new(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn ext(mut self, ext: Option<&str>) -> Self {
        self.ext = ext.map(str::to_string);
        self
    }

    #[must_use]
    pub fn cache_dir(mut self, cache_dir: Option<&Path>) -> Self {
        self.cache_dir = cache_dir.map(Path::to_path_buf);
        self
    }
}

/// The work a build would do, computed before any asset is cached.
#[derive(Debug, Clone)]
pub struct CachePlan {
    /// Resolved asset directory
    pub asset_dir: PathBuf,
    /// Resolved (and created) cache directory
    pub cache_dir: PathBuf,
    /// Every asset found, by id
    pub mapping: AssetMapping,
    /// The uncached assets, in id order
    pub jobs: Vec<CacheJob>,
}

impl CachePlan {
    /// One `id<TAB>path` line per job, as printed by a dry run.
    #[must_use]
    pub fn listing(&self) -> String {
        self.jobs
            .iter()
            .map(|job| format!("{}\t{}\n", job.asset_id, job.path.display()))
            .collect()
    }
}

/// Validate directories, map the assets and compute the uncached set.
pub fn plan_cache(
    enumerator: &dyn PathEnumerator,
    options: &BuildOptions,
    settings: &Settings,
) -> Result<CachePlan, CacheError> {
    let asset_dir = ensure_asset_dir(&options.asset_dir)?;
    let cache_dir = ensure_cache_dir(options.cache_dir.as_deref(), &settings.cache_dir_name)?;

    let pattern = GlobPattern::new(options.ext.as_deref(), options.recursive);
    if pattern.is_recursive() {
        log::info!("assets dir will be searched recursively.");
    }
    if let Some(ext) = pattern.extension() {
        log::info!("only assets of type .{} will be loaded.", ext);
    }

    let paths = enumerator.enumerate(&asset_dir, &pattern)?;
    let mapping = build_asset_mapping(enumerator.kind(), paths)?;
    let existing = existing_entries(&cache_dir)?;
    let jobs = uncached_jobs(&mapping, &existing);
    log::info!("{} assets need to be added to the cache", jobs.len());

    Ok(CachePlan {
        asset_dir,
        cache_dir,
        mapping,
        jobs,
    })
}

/// Build the cache for one asset kind and return the cache directory.
pub fn build_cache(
    enumerator: &dyn PathEnumerator,
    cacher: &dyn AssetCacher,
    driver: &dyn BatchDriver,
    options: &BuildOptions,
    settings: &Settings,
) -> Result<PathBuf, CacheError> {
    debug_assert_eq!(enumerator.kind(), cacher.kind());
    let plan = plan_cache(enumerator, options, settings)?;
    let cache_dir = driver.run(cacher, &plan.cache_dir, &plan.jobs)?;
    if !plan.jobs.is_empty() {
        log::info!("{} assets cached.", plan.jobs.len());
    }
    Ok(cache_dir)
}

/// Cache every uncached image under `asset_dir`.
pub fn build_image_cache(
    asset_dir: &Path,
    recursive: bool,
    ext: Option<&str>,
    cache_dir: Option<&Path>,
    settings: &Settings,
) -> Result<PathBuf, CacheError> {
    let options = BuildOptions::new(asset_dir)
        .recursive(recursive)
        .ext(ext)
        .cache_dir(cache_dir);
    build_cache(
        &ImagePaths,
        &ImageCacher::new(settings),
        &SerialDriver::new(),
        &options,
        settings,
    )
}

/// Cache every uncached mesh under `asset_dir`.
pub fn build_mesh_cache(
    asset_dir: &Path,
    recursive: bool,
    ext: Option<&str>,
    cache_dir: Option<&Path>,
    settings: &Settings,
) -> Result<PathBuf, CacheError> {
    let options = BuildOptions::new(asset_dir)
        .recursive(recursive)
        .ext(ext)
        .cache_dir(cache_dir);
    build_cache(
        &MeshPaths,
        &MeshCacher::new(settings),
        &SerialDriver::new(),
        &options,
        settings,
    )
}
