//! Decoding and re-encoding of source assets.
//!
//! The caching pipeline only needs a small surface from the codecs:
//!
//! * [`image`]: raster images through the `image` crate, JPEG encoding and
//!   thumbnail sizing.
//! * [`mesh`]: triangle meshes, either plain or carrying a texture image.
//! * [`obj`]: Wavefront OBJ/MTL reader.
//! * [`gltf`]: glTF / GLB reader.

pub mod gltf;
pub mod image;
pub mod mesh;
pub mod obj;

pub use self::image::{decode_image, thumbnail_dimensions, DecodedImage};
pub use self::mesh::{decode_mesh, DecodedMesh, TriMesh};

/// Errors that can occur while decoding or encoding an asset.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    /// The image crate failed to decode or encode.
    #[error("image codec error: {0}")]
    Image(#[from] ::image::ImageError),

    /// The glTF importer failed.
    #[error("glTF import error: {0}")]
    Gltf(#[from] ::gltf::Error),

    /// Reading the source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Geometry could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The source is malformed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The file type is not handled by any codec.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}
