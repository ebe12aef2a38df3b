//! Set difference between the scanned assets and the existing cache.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use super::batch::CacheJob;
use super::mapping::AssetMapping;
use crate::error::CacheError;

/// Names of the entries directly inside `cache_dir`.
pub fn existing_entries(cache_dir: &Path) -> Result<BTreeSet<String>, CacheError> {
    let read_dir = fs::read_dir(cache_dir).map_err(|e| CacheError::write(cache_dir, e))?;
    let mut names = BTreeSet::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| CacheError::write(cache_dir, e))?;
        match entry.file_name().into_string() {
            Ok(name) => {
                names.insert(name);
            }
            Err(name) => log::debug!("Ignoring non UTF-8 cache entry {:?}", name),
        }
    }
    Ok(names)
}

/// Ids in `mapping` with no entry in `existing`, sorted.
#[must_use]
pub fn uncached_ids(mapping: &AssetMapping, existing: &BTreeSet<String>) -> Vec<String> {
    mapping
        .ids()
        .filter(|id| !existing.contains(*id))
        .map(str::to_string)
        .collect()
}

/// The (path, id) jobs for every uncached asset, in id order.
#[must_use]
pub fn uncached_jobs(mapping: &AssetMapping, existing: &BTreeSet<String>) -> Vec<CacheJob> {
    uncached_ids(mapping, existing)
        .into_iter()
        .filter_map(|id| {
            mapping.get(&id).map(|path| CacheJob {
                path: path.to_path_buf(),
                asset_id: id,
            })
        })
        .collect()
}
