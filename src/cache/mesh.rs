//! Mesh caching pipeline.

use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use super::entry::{EntryDir, MESH_FILENAME};
use super::image::{write_image_files, ImageEncoding};
use super::AssetCacher;
use crate::codec::{decode_mesh, DecodedMesh, TriMesh};
use crate::config::Settings;
use crate::error::CacheError;
use crate::scanner::AssetKind;

/// Caches mesh assets, plus the texture files of textured meshes.
#[derive(Debug, Clone)]
pub struct MeshCacher {
    encoding: ImageEncoding,
    compression_level: u32,
}

impl MeshCacher {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            encoding: ImageEncoding::from(settings),
            compression_level: settings.mesh_compression_level,
        }
    }
}

impl Default for MeshCacher {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AssetCacher for MeshCacher {
    fn kind(&self) -> AssetKind {
        AssetKind::Mesh
    }

    fn cache(&self, entry: &EntryDir, source: &Path) -> Result<(), CacheError> {
        let decoded = decode_mesh(source).map_err(|e| CacheError::decode(source, e))?;
        match &decoded {
            DecodedMesh::Textured { texture, .. } => {
                write_image_files(entry, texture, &self.encoding, source)?;
            }
            DecodedMesh::Plain(_) => {}
        }
        write_geometry(entry, decoded.mesh(), self.compression_level, source)
    }
}

/// Serialize `mesh` to JSON, gzip it and write the `mesh` file.
fn write_geometry(
    entry: &EntryDir,
    mesh: &TriMesh,
    level: u32,
    source: &Path,
) -> Result<(), CacheError> {
    let json = mesh
        .to_json_bytes()
        .map_err(|e| CacheError::decode(source, e))?;
    let compressed =
        gzip(&json, level).map_err(|e| CacheError::write(entry.file(MESH_FILENAME), e))?;
    entry.write_file(MESH_FILENAME, &compressed)
}

fn gzip(data: &[u8], level: u32) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    encoder.finish()
}
