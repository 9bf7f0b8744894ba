//! OBJ file loader for collision geometry
//!
//! Only `v` and `f` records are read. Texture coordinates, normals and
//! material statements are skipped. Faces with more than three corners are
//! fan triangulated, and negative (relative) indices are supported.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{AssetError, Model};
use crate::foundation::math::Vector3;

/// Reads Wavefront OBJ position data.
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file into a model named `name`
    pub fn load_obj<P: AsRef<Path>>(name: &str, path: P) -> Result<Model, AssetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| AssetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_obj(name, BufReader::new(file))
    }

    /// Parse OBJ text from any buffered reader
    pub fn parse_obj<R: BufRead>(name: &str, reader: R) -> Result<Model, AssetError> {
        let mut positions = Vec::new();
        let mut indices = Vec::new();

        for (line_index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| AssetError::Io { path: name.to_string(), source })?;
            let line_number = line_index + 1;
            let parse_error = |message: String| AssetError::Parse {
                name: name.to_string(),
                line: line_number,
                message,
            };

            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    let mut coordinate = || -> Result<f32, AssetError> {
                        let token = parts
                            .next()
                            .ok_or_else(|| {
                                parse_error("vertex needs three coordinates".to_string())
                            })?;
                        token
                            .parse()
                            .map_err(|_| parse_error(format!("invalid coordinate '{token}'")))
                    };
                    let x = coordinate()?;
                    let y = coordinate()?;
                    let z = coordinate()?;
                    positions.push(Vector3::new(x, y, z));
                }
                Some("f") => {
                    let corners = parts
                        .map(|corner| resolve_index(corner, positions.len()).map_err(&parse_error))
                        .collect::<Result<Vec<u32>, _>>()?;
                    if corners.len() < 3 {
                        return Err(parse_error(format!(
                            "face needs at least three corners, found {}",
                            corners.len()
                        )));
                    }
                    for pair in corners[1..].windows(2) {
                        indices.extend_from_slice(&[corners[0], pair[0], pair[1]]);
                    }
                }
                _ => {}
            }
        }

        if positions.is_empty() {
            return Err(AssetError::EmptyMesh(name.to_string()));
        }

        log::debug!(
            "Parsed OBJ '{}': {} positions, {} triangles",
            name,
            positions.len(),
            indices.len() / 3
        );
        Ok(Model::new(name, positions, indices))
    }
}

/// Turns a face corner such as `3`, `3/1/2` or `-1//4` into a 0-based position index.
fn resolve_index(corner: &str, position_count: usize) -> Result<u32, String> {
    let token = corner.split('/').next().unwrap_or_default();
    let raw: i64 = token
        .parse()
        .map_err(|_| format!("invalid face index '{corner}'"))?;

    let count = i64::try_from(position_count).map_err(|_| "too many positions".to_string())?;
    let resolved = match raw {
        0 => return Err("face index 0 is not valid".to_string()),
        positive if positive > 0 => positive - 1,
        negative => count + negative,
    };

    if !(0..count).contains(&resolved) {
        return Err(format!("face index {raw} out of range ({position_count} positions)"));
    }
    u32::try_from(resolved).map_err(|_| format!("face index {raw} does not fit in u32"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn test_quad_is_fan_triangulated() {
        let model = ObjLoader::parse_obj("quad", QUAD.as_bytes()).unwrap();
        assert_eq!(model.positions().len(), 4);
        assert_eq!(model.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(model.name(), "quad");
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let model = ObjLoader::parse_obj("tri", text.as_bytes()).unwrap();
        assert_eq!(model.indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_bad_records_report_line() {
        let text = "v 0 0 0\nv 1 zero 0\n";
        match ObjLoader::parse_obj("broken", text.as_bytes()) {
            Err(AssetError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }

        let out_of_range = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n";
        assert!(ObjLoader::parse_obj("range", out_of_range.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_file_is_empty_mesh() {
        assert!(matches!(
            ObjLoader::parse_obj("nothing", "# comment only\n".as_bytes()),
            Err(AssetError::EmptyMesh(_))
        ));
    }
}
