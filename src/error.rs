//! Error types, exit codes and structured error reporting.

use std::path::PathBuf;

use serde::Serialize;

use crate::codec::CodecError;
use crate::scanner::ScanError;

/// Errors raised while building the asset cache.
///
/// Validation and mapping errors ([`CacheError::is_fatal_startup`]) are raised
/// before any asset is cached. Per-asset errors abort the remainder of the
/// batch but leave entries that were already written in place.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// The asset directory does not exist or is not a directory.
    #[error("{0} is not a directory")]
    InvalidAssetDirectory(PathBuf),

    /// The cache directory path exists but is not a directory.
    #[error("cache path {0} exists and is not a directory")]
    InvalidCacheDirectory(PathBuf),

    /// Two source files share the same filename stem.
    #[error("asset_id {id} is not unique - links to {} and {}", first.display(), second.display())]
    DuplicateAssetId {
        /// The conflicting asset id
        id: String,
        /// Path that first claimed the id
        first: PathBuf,
        /// Path that tried to claim it again
        second: PathBuf,
    },

    /// Enumerating the asset directory failed.
    #[error(transparent)]
    Enumeration(#[from] ScanError),

    /// A source asset could not be decoded or re-encoded.
    #[error("failed to decode asset {}: {source}", path.display())]
    AssetDecode {
        /// Source file that failed
        path: PathBuf,
        /// The underlying codec error
        #[source]
        source: CodecError,
    },

    /// Reading or writing the cache directory failed.
    #[error("cache I/O error on {}: {source}", path.display())]
    CacheWrite {
        /// Cache path being written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    /// Shorthand for wrapping an I/O error on a cache path.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWrite {
            path: path.into(),
            source,
        }
    }

    /// Shorthand for wrapping a codec error on a source path.
    pub fn decode(path: impl Into<PathBuf>, source: CodecError) -> Self {
        Self::AssetDecode {
            path: path.into(),
            source,
        }
    }

    /// Whether this error aborts a run before any caching work starts.
    #[must_use]
    pub fn is_fatal_startup(&self) -> bool {
        matches!(
            self,
            Self::InvalidAssetDirectory(_)
                | Self::InvalidCacheDirectory(_)
                | Self::DuplicateAssetId { .. }
                | Self::Enumeration(_)
        )
    }
}

/// Exit codes for the asset-cache binary.
///
/// - 0: Success (all uncached assets were written)
/// - 1: General error (an asset failed to decode or write)
/// - 2: Invalid input (bad directories or duplicate asset ids)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the cache is up to date.
    Success = 0,
    /// General error: caching stopped part way through.
    GeneralError = 1,
    /// Invalid input: the run was rejected before caching started.
    InvalidInput = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "AC000",
            Self::GeneralError => "AC001",
            Self::InvalidInput => "AC002",
        }
    }

    /// Pick the exit code matching an application error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<CacheError>() {
            Some(e) if e.is_fatal_startup() => Self::InvalidInput,
            _ => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "AC001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
