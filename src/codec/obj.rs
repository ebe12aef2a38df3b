//! Wavefront OBJ import.
//!
//! Supports vertices (`v`), texture coordinates (`vt`), normals (`vn`) and
//! polygonal faces (`f`, fan-triangulated). A texture is looked up through
//! `mtllib` / `usemtl` and the material's `map_Kd` entry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::image::decode_image;
use super::mesh::{DecodedMesh, TriMesh};
use super::CodecError;

/// Geometry and material references parsed from one OBJ file.
#[derive(Debug, Default)]
pub struct ObjData {
    pub mesh: TriMesh,
    /// Material libraries named by `mtllib`, in file order.
    pub mtllibs: Vec<String>,
    /// First material selected with `usemtl`.
    pub material: Option<String>,
}

/// Load an OBJ file, attaching its diffuse texture when one resolves.
pub fn load_obj(path: &Path) -> Result<DecodedMesh, CodecError> {
    let contents = std::fs::read_to_string(path)?;
    let data = parse_obj(&contents)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    match find_texture(base_dir, &data) {
        Some(texture_path) => {
            log::debug!(
                "Mesh {} uses texture {}",
                path.display(),
                texture_path.display()
            );
            let texture = decode_image(&texture_path)?;
            Ok(DecodedMesh::Textured {
                mesh: data.mesh,
                texture,
            })
        }
        None => Ok(DecodedMesh::Plain(data.mesh)),
    }
}

/// Parse OBJ text into a triangle mesh.
pub fn parse_obj(contents: &str) -> Result<ObjData, CodecError> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut tex_coords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();

    let mut data = ObjData::default();
    let mut corners: Vec<Corner> = Vec::new();
    let mut corner_index: HashMap<Corner, u32> = HashMap::new();

    for (line_num, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match keyword {
            "v" => positions.push(parse_floats::<3>(&args, line_num)?),
            "vt" => tex_coords.push(parse_floats::<2>(&args, line_num)?),
            "vn" => normals.push(parse_floats::<3>(&args, line_num)?),
            "f" => {
                if args.len() < 3 {
                    return Err(parse_error(line_num, "face must have at least 3 vertices"));
                }
                let mut face = Vec::with_capacity(args.len());
                for token in &args {
                    let corner = parse_corner(
                        token,
                        line_num,
                        positions.len(),
                        tex_coords.len(),
                        normals.len(),
                    )?;
                    let next = corners.len() as u32;
                    let index = *corner_index.entry(corner).or_insert_with(|| {
                        corners.push(corner);
                        next
                    });
                    face.push(index);
                }
                for i in 1..face.len() - 1 {
                    data.mesh.trilist.push([face[0], face[i], face[i + 1]]);
                }
            }
            "mtllib" => data.mtllibs.extend(args.iter().map(|s| s.to_string())),
            "usemtl" => {
                if data.material.is_none() {
                    data.material = args.first().map(|s| s.to_string());
                }
            }
            // o, g, s, l, ...
            _ => {}
        }
    }

    if corners.is_empty() {
        // Point clouds: keep raw positions with no faces.
        data.mesh.points = positions;
        return Ok(data);
    }

    data.mesh.points = corners.iter().map(|c| positions[c.position]).collect();
    if corners.iter().all(|c| c.tex_coord.is_some()) {
        data.mesh.tcoords = Some(
            corners
                .iter()
                .filter_map(|c| c.tex_coord.map(|t| tex_coords[t]))
                .collect(),
        );
    }
    if corners.iter().all(|c| c.normal.is_some()) {
        data.mesh.normals = Some(
            corners
                .iter()
                .filter_map(|c| c.normal.map(|n| normals[n]))
                .collect(),
        );
    }
    Ok(data)
}

/// One `v/vt/vn` face corner, as zero-based indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Corner {
    position: usize,
    tex_coord: Option<usize>,
    normal: Option<usize>,
}

fn parse_corner(
    token: &str,
    line_num: usize,
    n_positions: usize,
    n_tex_coords: usize,
    n_normals: usize,
) -> Result<Corner, CodecError> {
    let mut fields = token.split('/');
    let position = fields
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_error(line_num, "face vertex without position"))?;
    let position = resolve_index(position, n_positions, line_num)?;
    let tex_coord = match fields.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, n_tex_coords, line_num)?),
        _ => None,
    };
    let normal = match fields.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, n_normals, line_num)?),
        _ => None,
    };
    Ok(Corner {
        position,
        tex_coord,
        normal,
    })
}

/// Turn a 1-based (or negative, relative) OBJ index into a 0-based one.
fn resolve_index(token: &str, len: usize, line_num: usize) -> Result<usize, CodecError> {
    let raw: i64 = token
        .parse()
        .map_err(|_| parse_error(line_num, &format!("invalid index '{}'", token)))?;
    let resolved = match raw {
        r if r > 0 => r - 1,
        r if r < 0 => len as i64 + r,
        _ => -1,
    };
    if resolved < 0 || resolved >= len as i64 {
        return Err(parse_error(
            line_num,
            &format!("index {} out of range ({} defined)", raw, len),
        ));
    }
    Ok(resolved as usize)
}

fn parse_floats<const N: usize>(args: &[&str], line_num: usize) -> Result<[f32; N], CodecError> {
    if args.len() < N {
        return Err(parse_error(line_num, &format!("expected {} values", N)));
    }
    let mut out = [0.0f32; N];
    for (slot, token) in out.iter_mut().zip(args) {
        *slot = token
            .parse()
            .map_err(|_| parse_error(line_num, &format!("invalid number '{}'", token)))?;
    }
    Ok(out)
}

fn parse_error(line_num: usize, message: &str) -> CodecError {
    CodecError::Parse(format!("line {}: {}", line_num + 1, message))
}

/// Resolve the diffuse texture of the material the OBJ uses.
///
/// Missing material libraries or texture files are logged and yield `None`.
fn find_texture(base_dir: &Path, data: &ObjData) -> Option<PathBuf> {
    for lib in &data.mtllibs {
        let lib_path = base_dir.join(lib);
        let contents = match std::fs::read_to_string(&lib_path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Cannot read material library {}: {}", lib_path.display(), e);
                continue;
            }
        };
        let lib_dir = lib_path.parent().unwrap_or(base_dir);
        if let Some(texture) = diffuse_map(&contents, data.material.as_deref()) {
            let texture_path = lib_dir.join(texture);
            if texture_path.is_file() {
                return Some(texture_path);
            }
            log::warn!(
                "Texture {} referenced by {} does not exist",
                texture_path.display(),
                lib_path.display()
            );
        }
    }
    None
}

/// The `map_Kd` file of `material`, or of the first material when unnamed.
fn diffuse_map(mtl: &str, material: Option<&str>) -> Option<String> {
    let mut current: Option<&str> = None;
    for line in mtl.lines() {
        let line = line.trim();
        if let Some(name) = line.strip_prefix("newmtl") {
            current = Some(name.trim());
            continue;
        }
        if let Some(rest) = line.strip_prefix("map_Kd") {
            if !rest.starts_with(char::is_whitespace) {
                continue;
            }
            let wanted = match material {
                Some(m) => current == Some(m),
                None => true,
            };
            if wanted {
                if let Some(file) = texture_file_name(rest) {
                    return Some(file.to_string());
                }
            }
        }
    }
    None
}

/// The file name of a texture map statement, after its `-option` groups.
///
/// The name is the rest of the line, so it may contain spaces.
fn texture_file_name(args: &str) -> Option<&str> {
    let mut rest = args;
    loop {
        let (option, after) = next_token(rest);
        // (required, maximum) argument counts of the MTL map options.
        let (required, maximum) = match option {
            "-blendu" | "-blendv" | "-bm" | "-boost" | "-cc" | "-clamp" | "-imfchan"
            | "-texres" | "-type" => (1, 1),
            "-mm" => (2, 2),
            "-o" | "-s" | "-t" => (1, 3),
            _ => break,
        };
        rest = after;
        for i in 0..maximum {
            let (value, after) = next_token(rest);
            if value.is_empty() || (i >= required && value.parse::<f32>().is_err()) {
                break;
            }
            rest = after;
        }
    }
    let name = rest.trim();
    (!name.is_empty()).then_some(name)
}

/// Split off the first whitespace-separated token.
fn next_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], &s[end..]),
        None => (s, ""),
    }
}
