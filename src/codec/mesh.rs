//! Triangle meshes and mesh file dispatch.

use std::path::Path;

use serde::Serialize;

use super::image::DecodedImage;
use super::CodecError;

/// File extensions the mesh codecs can read.
pub const MESH_EXTENSIONS: &[&str] = &["obj", "gltf", "glb"];

/// An indexed triangle mesh.
///
/// Serializes to the interchange form stored in the cache: `points`,
/// `trilist` and, when every vertex carries them, `tcoords` and `normals`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TriMesh {
    pub points: Vec<[f32; 3]>,
    pub trilist: Vec<[u32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcoords: Option<Vec<[f32; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<[f32; 3]>>,
}

impl TriMesh {
    /// Number of vertices.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.points.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn n_tris(&self) -> usize {
        self.trilist.len()
    }

    /// Structured JSON representation of the geometry.
    pub fn to_structured(&self) -> Result<serde_json::Value, CodecError> {
        Ok(serde_json::to_value(self)?)
    }

    /// The structured representation as compact JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// A decoded mesh, with or without an embedded texture.
#[derive(Debug, Clone)]
pub enum DecodedMesh {
    /// Geometry only.
    Plain(TriMesh),
    /// Geometry plus the texture map it references.
    Textured { mesh: TriMesh, texture: DecodedImage },
}

impl DecodedMesh {
    /// The geometry, regardless of variant.
    #[must_use]
    pub fn mesh(&self) -> &TriMesh {
        match self {
            Self::Plain(mesh) | Self::Textured { mesh, .. } => mesh,
        }
    }

    /// The texture map, if any.
    #[must_use]
    pub fn texture(&self) -> Option<&DecodedImage> {
        match self {
            Self::Plain(_) => None,
            Self::Textured { texture, .. } => Some(texture),
        }
    }
}

/// Lowercased extension of `path`, if it has one.
fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Whether a mesh codec can read files with this path's extension.
#[must_use]
pub fn is_supported_mesh(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| MESH_EXTENSIONS.contains(&ext.as_str()))
}

/// Decode the mesh at `path`, picking the reader from the file extension.
pub fn decode_mesh(path: &Path) -> Result<DecodedMesh, CodecError> {
    let decoded = match extension_of(path).as_deref() {
        Some("obj") => super::obj::load_obj(path)?,
        Some("gltf") | Some("glb") => super::gltf::load_gltf(path)?,
        _ => return Err(CodecError::UnsupportedFormat(path.display().to_string())),
    };
    log::trace!(
        "Decoded {} ({} points, {} triangles, textured: {})",
        path.display(),
        decoded.mesh().n_points(),
        decoded.mesh().n_tris(),
        decoded.texture().is_some()
    );
    Ok(decoded)
}
