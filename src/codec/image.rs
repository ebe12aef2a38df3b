//! Raster image decoding, JPEG encoding and thumbnail sizing.

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use super::CodecError;

/// A decoded raster image plus where it came from.
///
/// Textures embedded in mesh files have no source path; they are always
/// re-encoded when cached.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    image: DynamicImage,
    native_format: Option<ImageFormat>,
    source: Option<PathBuf>,
}

impl DecodedImage {
    /// Wrap an in-memory image.
    #[must_use]
    pub fn new(image: DynamicImage, native_format: Option<ImageFormat>, source: Option<PathBuf>) -> Self {
        Self {
            image,
            native_format,
            source,
        }
    }

    /// Pixel width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The format the source was stored in, if known.
    #[must_use]
    pub fn native_format(&self) -> Option<ImageFormat> {
        self.native_format
    }

    /// The file this image was decoded from, if any.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The source file when it can be copied verbatim as a JPEG texture.
    #[must_use]
    pub fn jpeg_source(&self) -> Option<&Path> {
        match self.native_format {
            Some(ImageFormat::Jpeg) => self.source_path(),
            _ => None,
        }
    }

    /// Re-encode the full image as JPEG.
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, CodecError> {
        encode_jpeg(&self.image, quality)
    }

    /// Resize to `width` keeping the aspect ratio and encode as JPEG.
    ///
    /// Narrow sources are upscaled.
    pub fn encode_thumbnail(&self, width: u32, quality: u8) -> Result<Vec<u8>, CodecError> {
        let (w, h) = thumbnail_dimensions(self.width(), self.height(), width);
        let thumb = self.image.resize_exact(w, h, FilterType::Triangle);
        encode_jpeg(&thumb, quality)
    }
}

/// Decode the image at `path`, detecting its format from the contents.
pub fn decode_image(path: &Path) -> Result<DecodedImage, CodecError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let native_format = reader.format();
    let image = reader.decode()?;
    log::trace!(
        "Decoded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        native_format
    );
    Ok(DecodedImage::new(image, native_format, Some(path.to_path_buf())))
}

/// Whether the image codec can read files with this path's extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

/// Thumbnail size for a `width` x `height` source scaled to `target_width`.
///
/// The height is `round(height * target_width / width)`, never below 1.
#[must_use]
pub fn thumbnail_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    if width == 0 {
        return (target_width, 1);
    }
    let scaled = (f64::from(height) * f64::from(target_width) / f64::from(width)).round();
    (target_width, (scaled as u32).max(1))
}

/// Encode any image as a baseline RGB JPEG.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CodecError> {
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder.encode_image(&rgb)?;
    }
    Ok(bytes)
}
