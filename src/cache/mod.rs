//! Incremental asset caching engine.
//!
//! A run maps every source asset to a unique id, diffs those ids against the
//! entries already present in the cache directory and converts only the
//! missing ones.
//!
//! # Architecture
//!
//! * [`dirs`]: Asset/cache directory validation.
//! * [`mapping`]: Asset ids and the uniqueness-checked id → path mapping.
//! * [`diff`]: The uncached set.
//! * [`entry`]: On-disk layout of a cache entry.
//! * [`image`] / [`mesh`]: The per-asset conversion pipelines.
//! * [`batch`]: Drivers running a pipeline over the uncached set.
//! * [`builder`]: The `build_*_cache` entry points tying it all together.
//!
//! # Cache Invalidation
//!
//! There is none. An asset is considered cached as soon as a directory
//! named after its id exists, whatever that directory contains.

pub mod batch;
pub mod builder;
pub mod diff;
pub mod dirs;
pub mod entry;
pub mod image;
pub mod mapping;
pub mod mesh;

use std::path::Path;

use crate::error::CacheError;
use crate::scanner::AssetKind;

pub use batch::{BatchDriver, CacheJob, SerialDriver};
pub use builder::{build_cache, build_image_cache, build_mesh_cache, plan_cache, BuildOptions, CachePlan};
pub use entry::{CacheEntry, EntryDir, ImageInfo};
pub use self::image::ImageCacher;
pub use mapping::{asset_id_for_path, build_asset_mapping, AssetMapping, AssetRecord};
pub use mesh::MeshCacher;

/// Converts one source asset into the files of its cache entry.
pub trait AssetCacher {
    /// The kind of asset this cacher accepts.
    fn kind(&self) -> AssetKind;

    /// Write the entry files for `source`. The entry directory exists.
    fn cache(&self, entry: &EntryDir, source: &Path) -> Result<(), CacheError>;
}

/// Cache a single asset, creating its entry directory first.
pub fn cache_asset(
    cacher: &dyn AssetCacher,
    cache_dir: &Path,
    source: &Path,
    asset_id: &str,
) -> Result<(), CacheError> {
    log::debug!("Caching asset {} from {}", asset_id, source.display());
    let entry = EntryDir::new(cache_dir, asset_id);
    if entry.ensure()? {
        log::debug!("Cache for {} does not exist - creating...", asset_id);
    }
    cacher.cache(&entry, source)
}
