//! Source asset fixtures generated on the fly.

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage};

/// Write a solid-colour image; the format follows the extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, Rgb([120, 80, 40]))
        .save(path)
        .unwrap();
}

/// Write an untextured single-triangle OBJ.
pub fn write_plain_obj(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
}

/// Write an OBJ with an MTL file and a JPEG diffuse texture next to it.
pub fn write_textured_obj(dir: &Path, stem: &str, tex_width: u32, tex_height: u32) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join(format!("{stem}.obj")),
        format!(
            "mtllib {stem}.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nusemtl mat\nf 1/1 2/2 3/3\n"
        ),
    )
    .unwrap();
    fs::write(
        dir.join(format!("{stem}.mtl")),
        format!("newmtl mat\nmap_Kd {stem}_diffuse.jpg\n"),
    )
    .unwrap();
    write_image(&dir.join(format!("{stem}_diffuse.jpg")), tex_width, tex_height);
}

/// Sorted names of the entries directly inside `dir`.
pub fn entry_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Decode a cache file; cache files carry no extension, so sniff the format.
pub fn read_image(path: &Path) -> image::DynamicImage {
    image::load_from_memory(&fs::read(path).unwrap()).unwrap()
}

/// A 4x2 RGBA PNG: an opaque red row over a half-transparent blue row.
const TEXTURE_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAQAAAACCAYAAAB/qH1jAAAAFElEQVR4nGP4z8DwHxkzAHEDMgYA+TYN9Syb8YYAAAAASUVORK5CYII=";

/// Positions followed by texture coordinates of a single triangle.
const TRIANGLE_BUFFER_BASE64: &str =
    "AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAIA/";

/// Write a single-triangle glTF whose base colour texture is embedded as a
/// data URI.
pub fn write_textured_gltf(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let document = format!(
        r#"{{
  "asset": {{"version": "2.0"}},
  "scenes": [{{"nodes": [0]}}],
  "nodes": [{{"mesh": 0}}],
  "meshes": [{{"primitives": [{{"attributes": {{"POSITION": 0, "TEXCOORD_0": 1}}, "material": 0}}]}}],
  "materials": [{{"pbrMetallicRoughness": {{"baseColorTexture": {{"index": 0}}}}}}],
  "textures": [{{"source": 0}}],
  "images": [{{"uri": "data:image/png;base64,{TEXTURE_PNG_BASE64}"}}],
  "buffers": [{{"byteLength": 60, "uri": "data:application/octet-stream;base64,{TRIANGLE_BUFFER_BASE64}"}}],
  "bufferViews": [
    {{"buffer": 0, "byteOffset": 0, "byteLength": 36}},
    {{"buffer": 0, "byteOffset": 36, "byteLength": 24}}
  ],
  "accessors": [
    {{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]}},
    {{"bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC2"}}
  ]
}}"#
    );
    fs::write(path, document).unwrap();
}
