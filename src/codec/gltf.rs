//! glTF / GLB import.
//!
//! All triangle primitives of all meshes are merged into one [`TriMesh`].
//! The base colour texture of the first textured primitive becomes the
//! mesh texture.

use std::path::Path;

use gltf::image::Format;
use gltf::mesh::Mode;
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use super::image::DecodedImage;
use super::mesh::{DecodedMesh, TriMesh};
use super::CodecError;

/// Load a `.gltf` or `.glb` file.
pub fn load_gltf(path: &Path) -> Result<DecodedMesh, CodecError> {
    let (document, buffers, images) = gltf::import(path)?;

    let mut mesh = TriMesh::default();
    let mut tcoords: Option<Vec<[f32; 2]>> = Some(Vec::new());
    let mut normals: Option<Vec<[f32; 3]>> = Some(Vec::new());
    let mut texture = None;

    for gltf_mesh in document.meshes() {
        for primitive in gltf_mesh.primitives() {
            if primitive.mode() != Mode::Triangles {
                log::debug!(
                    "Skipping non-triangle primitive in {} ({:?})",
                    path.display(),
                    primitive.mode()
                );
                continue;
            }

            let reader = primitive.reader(|b| Some(&buffers[b.index()]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let base = mesh.points.len() as u32;
            mesh.points.extend(positions);
            let count = mesh.points.len() as u32 - base;

            match (tcoords.as_mut(), reader.read_tex_coords(0)) {
                (Some(out), Some(read)) => out.extend(read.into_f32()),
                _ => tcoords = None,
            }
            match (normals.as_mut(), reader.read_normals()) {
                (Some(out), Some(read)) => out.extend(read),
                _ => normals = None,
            }

            let indices: Vec<u32> = match reader.read_indices() {
                Some(read) => read.into_u32().collect(),
                None => (0..count).collect(),
            };
            mesh.trilist.extend(
                indices
                    .chunks_exact(3)
                    .map(|t| [base + t[0], base + t[1], base + t[2]]),
            );

            if texture.is_none() {
                if let Some(info) = primitive
                    .material()
                    .pbr_metallic_roughness()
                    .base_color_texture()
                {
                    let index = info.texture().source().index();
                    texture = Some(texture_image(&images, index, path)?);
                }
            }
        }
    }

    mesh.tcoords = tcoords.filter(|t| !t.is_empty());
    mesh.normals = normals.filter(|n| !n.is_empty());

    Ok(match texture {
        Some(image) => DecodedMesh::Textured {
            mesh,
            texture: DecodedImage::new(image, None, None),
        },
        None => DecodedMesh::Plain(mesh),
    })
}

/// The imported image at `index`, as an image buffer.
fn texture_image(
    images: &[gltf::image::Data],
    index: usize,
    path: &Path,
) -> Result<DynamicImage, CodecError> {
    let data = images.get(index).ok_or_else(|| {
        CodecError::Parse(format!("image {} missing from {}", index, path.display()))
    })?;
    to_dynamic(data)
}

/// Convert decoded glTF pixels into an image buffer.
fn to_dynamic(data: &gltf::image::Data) -> Result<DynamicImage, CodecError> {
    let (w, h) = (data.width, data.height);
    let pixels = data.pixels.clone();
    let image = match data.format {
        Format::R8 => GrayImage::from_raw(w, h, pixels).map(DynamicImage::ImageLuma8),
        Format::R8G8B8 => RgbImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgb8),
        Format::R8G8B8A8 => RgbaImage::from_raw(w, h, pixels).map(DynamicImage::ImageRgba8),
        other => {
            return Err(CodecError::UnsupportedFormat(format!(
                "glTF texture pixel format {:?}",
                other
            )))
        }
    };
    image.ok_or_else(|| CodecError::Parse("glTF texture size does not match its pixels".to_string()))
}
