//! Level instance file parser
//!
//! One placed object per line:
//!
//! ```text
//! id model texture px py pz rx ry rz sx sy sz [ppx ppy ppz]
//! ```
//!
//! Rotations are in degrees. The trailing end position is only read for
//! moving objects (ids 8 to 11) and is optional for them. Blank lines and
//! lines starting with `#` are skipped. Any malformed line fails the whole
//! file.

use std::path::Path;

use crate::foundation::math::{Degree, Matrix4, Vector3};

/// Ids whose records may carry an end position.
pub const MOVING_OBJECT_IDS: std::ops::RangeInclusive<i32> = 8..=11;

/// Level loading errors
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    /// Level file could not be read
    #[error("IO error reading level '{path}': {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Line does not follow the record layout
    #[error("Malformed level record at line {line}: {message}")]
    Malformed {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Record names a model the mesh library does not hold
    #[error("Unknown model '{model}' at line {line}")]
    UnknownModel {
        /// 1-based line number
        line: usize,
        /// Requested model name
        model: String,
    },

    /// Collider could not be fitted to the placed mesh
    #[error("Cannot build a collider for '{model}' at line {line}")]
    ColliderBuild {
        /// 1-based line number
        line: usize,
        /// Model name
        model: String,
    },
}

/// One parsed record of a level file.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelInstance {
    /// Line the record came from
    pub line: usize,
    /// Object type id
    pub id: i32,
    /// Mesh library model name
    pub model: String,
    /// Texture name, `none` for untextured
    pub texture: String,
    /// Translation
    pub position: Vector3,
    /// Euler angles in degrees
    pub rotation_degrees: Vector3,
    /// Per-axis scale
    pub scale: Vector3,
    /// End position of a moving object
    pub endpoint: Option<Vector3>,
}

impl LevelInstance {
    /// `T * Rx * Ry * Rz * S` built from the record.
    #[must_use]
    pub fn world_transform(&self) -> Matrix4 {
        self.transform_at(self.position)
    }

    /// The world transform moved to the end position, if the record has one.
    #[must_use]
    pub fn endpoint_transform(&self) -> Option<Matrix4> {
        self.endpoint.map(|endpoint| self.transform_at(endpoint))
    }

    fn transform_at(&self, position: Vector3) -> Matrix4 {
        Matrix4::create_translation(position)
            * Matrix4::create_rotation_x(Degree::new(self.rotation_degrees.x))
            * Matrix4::create_rotation_y(Degree::new(self.rotation_degrees.y))
            * Matrix4::create_rotation_z(Degree::new(self.rotation_degrees.z))
            * Matrix4::create_scale(self.scale)
    }
}

/// Reads and parses a level file.
pub fn load_level_file<P: AsRef<Path>>(path: P) -> Result<Vec<LevelInstance>, LevelError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_level(&contents)
}

/// Parses level text into instance records.
pub fn parse_level(text: &str) -> Result<Vec<LevelInstance>, LevelError> {
    let mut instances = Vec::new();

    for (line_index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        instances.push(parse_record(line, line_index + 1)?);
    }

    log::debug!("Parsed {} level records", instances.len());
    Ok(instances)
}

fn parse_record(line: &str, line_number: usize) -> Result<LevelInstance, LevelError> {
    let malformed = |message: String| LevelError::Malformed { line: line_number, message };
    let mut tokens = line.split_whitespace().peekable();

    let id_token = tokens.next().ok_or_else(|| malformed("missing id".to_string()))?;
    let id: i32 = id_token
        .parse()
        .map_err(|_| malformed(format!("invalid id '{id_token}'")))?;
    let model = tokens
        .next()
        .ok_or_else(|| malformed("missing model name".to_string()))?
        .to_string();
    let texture = tokens
        .next()
        .ok_or_else(|| malformed("missing texture name".to_string()))?
        .to_string();

    let position = read_vector(&mut tokens, "position").map_err(&malformed)?;
    let rotation_degrees = read_vector(&mut tokens, "rotation").map_err(&malformed)?;
    let scale = read_vector(&mut tokens, "scale").map_err(&malformed)?;

    let endpoint = if MOVING_OBJECT_IDS.contains(&id) && tokens.peek().is_some() {
        Some(read_vector(&mut tokens, "end position").map_err(&malformed)?)
    } else {
        None
    };

    Ok(LevelInstance {
        line: line_number,
        id,
        model,
        texture,
        position,
        rotation_degrees,
        scale,
        endpoint,
    })
}

fn read_vector<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    field: &str,
) -> Result<Vector3, String> {
    let mut components = [0.0; 3];
    for component in &mut components {
        let token = tokens
            .next()
            .ok_or_else(|| format!("{field} needs three numbers"))?;
        *component = token
            .parse()
            .map_err(|_| format!("invalid {field} value '{token}'"))?;
    }
    Ok(Vector3::new(components[0], components[1], components[2]))
}
