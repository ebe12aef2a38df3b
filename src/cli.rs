//! Command-line interface definitions for asset-cache.
//!
//! # Example
//!
//! ```bash
//! # Cache every image directly inside ~/faces into ./asset_cache
//! asset-cache image ~/faces
//!
//! # Cache OBJ meshes from a whole tree into a chosen cache directory
//! asset-cache mesh ./scans --recursive --ext obj --cache-dir /srv/cache
//!
//! # Show what would be cached without writing anything
//! asset-cache -v image ~/faces --dry-run
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::scanner::AssetKind;

/// Build an on-disk cache of normalized image and mesh assets.
#[derive(Debug, Parser)]
#[command(name = "asset-cache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file (TOML) overriding the built-in defaults
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Asset kind to cache
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cache 2D image assets
    Image(BuildArgs),
    /// Cache 3D mesh assets
    Mesh(BuildArgs),
}

impl Commands {
    /// The asset kind and arguments of the subcommand.
    #[must_use]
    pub fn parts(&self) -> (AssetKind, &BuildArgs) {
        match self {
            Self::Image(args) => (AssetKind::Image, args),
            Self::Mesh(args) => (AssetKind::Mesh, args),
        }
    }
}

/// Arguments shared by the image and mesh subcommands.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Directory holding the source assets
    #[arg(value_name = "ASSET_DIR")]
    pub asset_dir: PathBuf,

    /// Search the asset directory recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Only load assets with this file extension (e.g. jpg, obj)
    #[arg(short, long, value_name = "EXT")]
    pub ext: Option<String>,

    /// Cache directory (default: ./asset_cache)
    #[arg(short, long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// List the uncached assets without caching them
    #[arg(long)]
    pub dry_run: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}
