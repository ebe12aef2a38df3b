//! Application configuration management.
//!
//! Settings are layered with figment, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config`, else `asset-cache.toml` in the platform
//!    config directory, if present)
//! 3. Environment variables prefixed with `ASSET_CACHE_`
//!    (e.g. `ASSET_CACHE_THUMBNAIL_QUALITY=30`)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Name of the cache directory created under the working directory when
/// none is given.
pub const DEFAULT_CACHE_DIRNAME: &str = "asset_cache";

/// Encoding parameters and defaults for cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Width every thumbnail is scaled to.
    pub thumbnail_width: u32,
    /// JPEG quality for thumbnails (1-100).
    pub thumbnail_quality: u8,
    /// JPEG quality for re-encoded textures (1-100).
    pub texture_quality: u8,
    /// Gzip level for serialized geometry (0-9).
    pub mesh_compression_level: u32,
    /// Cache directory name used when no cache directory is given.
    pub cache_dir_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thumbnail_width: 640,
            thumbnail_quality: 20,
            texture_quality: 75,
            mesh_compression_level: 1,
            cache_dir_name: DEFAULT_CACHE_DIRNAME.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional TOML file and the environment.
    ///
    /// An explicitly given `config_file` must exist; the platform default
    /// file is only read when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        match config_file {
            Some(path) => {
                if !path.is_file() {
                    anyhow::bail!("config file {} does not exist", path.display());
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(path) = Self::default_config_path().filter(|p| p.is_file()) {
                    log::debug!("Reading settings from {}", path.display());
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        let settings: Settings = figment
            .merge(Env::prefixed("ASSET_CACHE_"))
            .extract()
            .context("invalid asset-cache configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the encoders cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.thumbnail_width == 0 {
            anyhow::bail!("thumbnail_width must be positive");
        }
        for (name, quality) in [
            ("thumbnail_quality", self.thumbnail_quality),
            ("texture_quality", self.texture_quality),
        ] {
            if !(1..=100).contains(&quality) {
                anyhow::bail!("{} must be between 1 and 100, got {}", name, quality);
            }
        }
        if self.mesh_compression_level > 9 {
            anyhow::bail!(
                "mesh_compression_level must be between 0 and 9, got {}",
                self.mesh_compression_level
            );
        }
        if self.cache_dir_name.trim().is_empty() {
            anyhow::bail!("cache_dir_name must not be empty");
        }
        Ok(())
    }

    /// Platform-specific default configuration file.
    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "asset-cache", "asset-cache")
            .map(|dirs| dirs.config_dir().join("asset-cache.toml"))
    }
}
