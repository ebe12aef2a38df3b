//! Scanner module for asset discovery.
//!
//! This module provides functionality for:
//! - Building glob-style match patterns from an extension filter
//! - Walking the asset directory in deterministic order
//! - Per-kind path enumerators that keep only files their codec can read
//!
//! # Example
//!
//! ```no_run
//! use asset_cache::scanner::{GlobPattern, ImagePaths, PathEnumerator};
//! use std::path::Path;
//!
//! let pattern = GlobPattern::new(Some("jpg"), true);
//! let paths = ImagePaths.enumerate(Path::new("/data/faces"), &pattern).unwrap();
//! println!("Found {} images", paths.len());
//! ```

pub mod pattern;
pub mod walker;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::image::is_supported_image;
use crate::codec::mesh::is_supported_mesh;

// Re-export main types
pub use pattern::GlobPattern;
pub use walker::Walker;

/// The kind of asset a source file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A 2D raster image.
    Image,
    /// A 3D triangle mesh, optionally textured.
    Mesh,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Mesh => write!(f, "mesh"),
        }
    }
}

/// Lists the candidate source files of one asset kind.
pub trait PathEnumerator {
    /// The kind of asset this enumerator finds.
    fn kind(&self) -> AssetKind;

    /// Whether the codec for this kind recognizes the file.
    fn recognizes(&self, path: &Path) -> bool;

    /// All recognized files under `root` matching `pattern`, in walk order.
    fn enumerate(&self, root: &Path, pattern: &GlobPattern) -> Result<Vec<PathBuf>, ScanError> {
        let mut paths = Vec::new();
        for entry in Walker::new(root, pattern.clone()).walk() {
            let path = entry?;
            if self.recognizes(&path) {
                paths.push(path);
            } else {
                log::debug!("Not a recognized {} file: {}", self.kind(), path.display());
            }
        }
        log::debug!(
            "Found {} {} files under {} matching {}",
            paths.len(),
            self.kind(),
            root.display(),
            pattern
        );
        Ok(paths)
    }
}

/// Enumerates raster images readable by the image codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagePaths;

impl PathEnumerator for ImagePaths {
    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    fn recognizes(&self, path: &Path) -> bool {
        is_supported_image(path)
    }
}

/// Enumerates meshes readable by the mesh codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshPaths;

impl PathEnumerator for MeshPaths {
    fn kind(&self) -> AssetKind {
        AssetKind::Mesh
    }

    fn recognizes(&self, path: &Path) -> bool {
        is_supported_mesh(path)
    }
}

/// Errors that can occur during asset discovery.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing the asset directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while walking the asset directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
