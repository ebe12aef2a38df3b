//! Cache entry layout and file writers.
//!
//! Each asset owns one directory `<cache_dir>/<id>/`. Its existence alone
//! marks the asset as cached; there is no completeness marker, so an entry
//! interrupted mid-write is still treated as complete on the next run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Image metadata record (`{"width": .., "height": ..}`).
pub const IMAGE_INFO_FILENAME: &str = "image-info";
/// Normalized JPEG texture.
pub const TEXTURE_FILENAME: &str = "texture";
/// Low quality, fixed width JPEG preview.
pub const THUMBNAIL_FILENAME: &str = "thumbnail";
/// Gzip-compressed JSON geometry.
pub const MESH_FILENAME: &str = "mesh";

/// Pixel size of the image an entry's texture was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

/// Handle on one asset's cache directory.
#[derive(Debug, Clone)]
pub struct EntryDir {
    path: PathBuf,
}

impl EntryDir {
    /// The entry for `asset_id` inside `cache_dir`.
    #[must_use]
    pub fn new(cache_dir: &Path, asset_id: &str) -> Self {
        Self {
            path: cache_dir.join(asset_id),
        }
    }

    /// Directory of this entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a file inside this entry.
    #[must_use]
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Create the entry directory if it does not exist yet.
    ///
    /// Returns `true` when the directory was created.
    pub fn ensure(&self) -> Result<bool, CacheError> {
        if self.path.is_dir() {
            return Ok(false);
        }
        fs::create_dir(&self.path).map_err(|e| CacheError::write(&self.path, e))?;
        Ok(true)
    }

    /// Write the image metadata record.
    pub fn write_image_info(&self, info: ImageInfo) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(&info)
            .map_err(|e| CacheError::write(self.file(IMAGE_INFO_FILENAME), e.into()))?;
        self.write_file(IMAGE_INFO_FILENAME, &bytes)
    }

    /// Write `bytes` to the named file, replacing any previous content.
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> Result<(), CacheError> {
        let path = self.file(name);
        fs::write(&path, bytes).map_err(|e| CacheError::write(path, e))
    }

    /// Copy `source` verbatim into the named file.
    pub fn copy_file(&self, name: &str, source: &Path) -> Result<(), CacheError> {
        let path = self.file(name);
        fs::copy(source, &path).map_err(|e| CacheError::write(path, e))?;
        Ok(())
    }
}

/// Which derived files an existing cache entry holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheEntry {
    pub has_image_info: bool,
    pub has_texture: bool,
    pub has_thumbnail: bool,
    pub has_mesh: bool,
}

impl CacheEntry {
    /// Inspect the entry for `asset_id`, or `None` if it is not cached.
    #[must_use]
    pub fn inspect(cache_dir: &Path, asset_id: &str) -> Option<Self> {
        let dir = EntryDir::new(cache_dir, asset_id);
        if !dir.path().is_dir() {
            return None;
        }
        Some(Self {
            has_image_info: dir.file(IMAGE_INFO_FILENAME).is_file(),
            has_texture: dir.file(TEXTURE_FILENAME).is_file(),
            has_thumbnail: dir.file(THUMBNAIL_FILENAME).is_file(),
            has_mesh: dir.file(MESH_FILENAME).is_file(),
        })
    }

    /// Whether the texture, thumbnail and image-info files are all present.
    #[must_use]
    pub fn has_image_files(&self) -> bool {
        self.has_image_info && self.has_texture && self.has_thumbnail
    }
}

/// Read back an entry's image metadata record.
pub fn read_image_info(cache_dir: &Path, asset_id: &str) -> Result<ImageInfo, CacheError> {
    let path = EntryDir::new(cache_dir, asset_id).file(IMAGE_INFO_FILENAME);
    let bytes = fs::read(&path).map_err(|e| CacheError::write(&path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| CacheError::write(path, e.into()))
}
