//! Batch drivers that run an [`AssetCacher`] over the uncached assets.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{cache_asset, AssetCacher};
use crate::error::CacheError;
use crate::progress::ProgressCallback;

/// One asset to cache: its source path and asset id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheJob {
    pub path: PathBuf,
    pub asset_id: String,
}

/// Drives a cacher over a list of jobs.
///
/// Implementations return the cache directory once every job is done, or
/// the first error. Jobs after a failing one are not attempted.
pub trait BatchDriver {
    fn run(
        &self,
        cacher: &dyn AssetCacher,
        cache_dir: &Path,
        jobs: &[CacheJob],
    ) -> Result<PathBuf, CacheError>;
}

/// Progress line emitted before caching the `index`-th (1-based) asset.
#[must_use]
pub fn progress_message(index: usize, total: usize, asset_id: &str) -> String {
    format!("{}/{} – {}", index, total, asset_id)
}

/// Caches assets one at a time, in job order.
#[derive(Clone, Default)]
pub struct SerialDriver {
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for SerialDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialDriver")
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl SerialDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

impl BatchDriver for SerialDriver {
    fn run(
        &self,
        cacher: &dyn AssetCacher,
        cache_dir: &Path,
        jobs: &[CacheJob],
    ) -> Result<PathBuf, CacheError> {
        let total = jobs.len();
        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_start("caching", total);
        }

        let result = jobs.iter().enumerate().try_for_each(|(idx, job)| {
            let message = progress_message(idx + 1, total, &job.asset_id);
            log::info!("{}", message);
            if let Some(ref callback) = self.progress_callback {
                callback.on_progress(idx + 1, &message);
            }
            cache_asset(cacher, cache_dir, &job.path, &job.asset_id)
        });

        if let Some(ref callback) = self.progress_callback {
            callback.on_phase_end("caching");
        }
        result.map(|()| cache_dir.to_path_buf())
    }
}
