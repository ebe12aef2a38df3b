//! Image caching pipeline.
//!
//! Writes `image-info`, `texture` and `thumbnail` for a decoded image. The
//! mesh pipeline reuses [`write_image_files`] for textured meshes.

use std::path::Path;

use super::entry::{EntryDir, ImageInfo, TEXTURE_FILENAME, THUMBNAIL_FILENAME};
use super::AssetCacher;
use crate::codec::{decode_image, DecodedImage};
use crate::config::Settings;
use crate::error::CacheError;
use crate::scanner::AssetKind;

/// JPEG parameters shared by image and textured-mesh entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageEncoding {
    pub thumbnail_width: u32,
    pub thumbnail_quality: u8,
    pub texture_quality: u8,
}

impl From<&Settings> for ImageEncoding {
    fn from(settings: &Settings) -> Self {
        Self {
            thumbnail_width: settings.thumbnail_width,
            thumbnail_quality: settings.thumbnail_quality,
            texture_quality: settings.texture_quality,
        }
    }
}

impl Default for ImageEncoding {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Caches standalone image assets.
#[derive(Debug, Clone, Default)]
pub struct ImageCacher {
    encoding: ImageEncoding,
}

impl ImageCacher {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            encoding: ImageEncoding::from(settings),
        }
    }
}

impl AssetCacher for ImageCacher {
    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    fn cache(&self, entry: &EntryDir, source: &Path) -> Result<(), CacheError> {
        let image = decode_image(source).map_err(|e| CacheError::decode(source, e))?;
        write_image_files(entry, &image, &self.encoding, source)
    }
}

/// Write metadata, texture and thumbnail for `image` into `entry`.
///
/// `source` names the asset in decode errors; for textured meshes it is the
/// mesh file.
pub fn write_image_files(
    entry: &EntryDir,
    image: &DecodedImage,
    encoding: &ImageEncoding,
    source: &Path,
) -> Result<(), CacheError> {
    entry.write_image_info(ImageInfo {
        width: image.width(),
        height: image.height(),
    })?;

    match image.jpeg_source() {
        Some(jpeg) => entry.copy_file(TEXTURE_FILENAME, jpeg)?,
        None => {
            let bytes = image
                .encode_jpeg(encoding.texture_quality)
                .map_err(|e| CacheError::decode(source, e))?;
            entry.write_file(TEXTURE_FILENAME, &bytes)?;
        }
    }

    let thumbnail = image
        .encode_thumbnail(encoding.thumbnail_width, encoding.thumbnail_quality)
        .map_err(|e| CacheError::decode(source, e))?;
    entry.write_file(THUMBNAIL_FILENAME, &thumbnail)
}
