//! Directory walker used by the path enumerators.
//!
//! Walks the asset directory with [`walkdir`] in file-name order so that
//! enumeration, and therefore duplicate-id reporting, is deterministic.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::pattern::GlobPattern;
use super::ScanError;

/// Walks the files under a root that match a [`GlobPattern`].
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Depth and name filter
    pattern: GlobPattern,
}

impl Walker {
    /// Create a new walker for the given root and pattern.
    #[must_use]
    pub fn new(root: &Path, pattern: GlobPattern) -> Self {
        Self {
            root: root.to_path_buf(),
            pattern,
        }
    }

    /// Walk the tree, yielding matching file paths.
    ///
    /// A failure to read the root itself is returned as an error. Failures
    /// below the root are logged and skipped, the same way a shell glob
    /// ignores unreadable directories.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(self.pattern.max_depth())
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }
                    let path = entry.into_path();
                    if self.pattern.matches_name(&path) {
                        Some(Ok(path))
                    } else {
                        log::trace!("Skipping unmatched file: {}", path.display());
                        None
                    }
                }
                Err(e) => self.handle_walk_error(e),
            })
    }

    fn handle_walk_error(&self, error: walkdir::Error) -> Option<Result<PathBuf, ScanError>> {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if error.depth() > 0 {
            log::warn!("Skipping {}: {}", path.display(), error);
            return None;
        }

        let scan_error = match error.into_io_error() {
            Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
                ScanError::PermissionDenied(path)
            }
            Some(io) if io.kind() == std::io::ErrorKind::NotFound => ScanError::NotFound(path),
            Some(io) => ScanError::Io { path, source: io },
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        };
        Some(Err(scan_error))
    }
}
