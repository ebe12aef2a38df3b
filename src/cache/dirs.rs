//! Validation and creation of the asset and cache directories.

use std::fs;
use std::path::{Component, Path, PathBuf};

use directories::BaseDirs;

use crate::error::CacheError;

/// Expand a leading `~` to the user's home directory.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Expand `~`, make `path` absolute against the working directory and
/// collapse `.` and `..` components.
fn resolve(path: &Path) -> PathBuf {
    let expanded = expand_tilde(path);
    let absolute = std::path::absolute(&expanded).unwrap_or(expanded);
    normalize(&absolute)
}

/// Lexically remove `.` and `..` components. `..` never climbs above the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !path.has_root() {
                    out.push(component);
                }
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => out.push(component),
        }
    }
    out
}

/// Resolve the asset directory, which must already exist.
pub fn ensure_asset_dir(asset_dir: &Path) -> Result<PathBuf, CacheError> {
    let asset_dir = resolve(asset_dir);
    if !asset_dir.is_dir() {
        return Err(CacheError::InvalidAssetDirectory(asset_dir));
    }
    log::info!("assets:    {}", asset_dir.display());
    Ok(asset_dir)
}

/// Resolve the cache directory, creating it when missing.
///
/// Without an explicit path the cache lives in `default_name` under the
/// current working directory.
pub fn ensure_cache_dir(cache_dir: Option<&Path>, default_name: &str) -> Result<PathBuf, CacheError> {
    let cache_dir = match cache_dir {
        Some(path) => resolve(path),
        None => {
            let cwd = std::env::current_dir().map_err(|e| CacheError::write(default_name, e))?;
            cwd.join(default_name)
        }
    };

    if cache_dir.exists() && !cache_dir.is_dir() {
        return Err(CacheError::InvalidCacheDirectory(cache_dir));
    }
    if !cache_dir.exists() {
        log::warn!(
            "Cache directory {} does not exist - creating...",
            cache_dir.display()
        );
        fs::create_dir_all(&cache_dir).map_err(|e| CacheError::write(&cache_dir, e))?;
    }
    log::info!("cache:     {}", cache_dir.display());
    Ok(cache_dir)
}
