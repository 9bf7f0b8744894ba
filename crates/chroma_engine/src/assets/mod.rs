//! Asset management for collision geometry
//!
//! Models are shared read-only through [`Rc`]; a [`MeshInstance`] pairs a
//! model with the per-object texture name and model matrix.

pub mod obj_loader;

pub use obj_loader::ObjLoader;

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use crate::foundation::math::{Matrix4, Vector3};

/// Name of the built-in unit cube.
pub const CUBE: &str = "cube";
/// Name of the built-in floor slab.
pub const FLOOR: &str = "floor";

/// Asset loading errors
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// File could not be read
    #[error("IO error reading '{path}': {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed record
    #[error("Parse error in '{name}' line {line}: {message}")]
    Parse {
        /// Model name
        name: String,
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// File held no vertex positions
    #[error("Model '{0}' has no vertices")]
    EmptyMesh(String),
}

/// Object-space vertex positions and triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    positions: Vec<Vector3>,
    indices: Vec<u32>,
}

impl Model {
    /// Creates a model.
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Vec<Vector3>, indices: Vec<u32>) -> Self {
        Self { name: name.into(), positions, indices }
    }

    /// Library name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Object-space positions
    #[must_use]
    pub fn positions(&self) -> &[Vector3] {
        &self.positions
    }

    /// Triangle list indices
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Axis-aligned box `[-0.5, 0.5]` scaled by `size`.
    #[must_use]
    pub fn cuboid(name: impl Into<String>, size: Vector3) -> Self {
        let half = size * 0.5;
        let positions = (0..8)
            .map(|corner| {
                let sign = |bit: u32| if corner & bit == 0 { -1.0 } else { 1.0 };
                Vector3::new(sign(1) * half.x, sign(2) * half.y, sign(4) * half.z)
            })
            .collect();

        // corner index bits: 1 = +x, 2 = +y, 4 = +z
        let indices = vec![
            0, 2, 3, 0, 3, 1, // -z
            4, 5, 7, 4, 7, 6, // +z
            0, 4, 6, 0, 6, 2, // -x
            1, 3, 7, 1, 7, 5, // +x
            0, 1, 5, 0, 5, 4, // -y
            2, 6, 7, 2, 7, 3, // +y
        ];
        Self::new(name, positions, indices)
    }
}

/// A placed model: shared geometry plus per-object texture and transform.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    model: Rc<Model>,
    texture: String,
    model_matrix: Matrix4,
}

impl MeshInstance {
    /// Creates an instance of `model`.
    pub fn new(model: Rc<Model>, texture: impl Into<String>, model_matrix: Matrix4) -> Self {
        Self { model, texture: texture.into(), model_matrix }
    }

    /// Shared geometry
    #[must_use]
    pub fn model(&self) -> &Rc<Model> {
        &self.model
    }

    /// Texture name
    #[must_use]
    pub fn texture(&self) -> &str {
        &self.texture
    }

    /// Re-skins the instance.
    pub fn set_texture(&mut self, texture: impl Into<String>) {
        self.texture = texture.into();
    }

    /// World transform
    #[must_use]
    pub const fn model_matrix(&self) -> &Matrix4 {
        &self.model_matrix
    }

    /// Moves the instance.
    pub fn set_model_matrix(&mut self, model_matrix: Matrix4) {
        self.model_matrix = model_matrix;
    }

    /// Model positions in world space (`w = 1`, no perspective divide).
    #[must_use]
    pub fn transformed_positions(&self) -> Vec<Vector3> {
        self.model
            .positions()
            .iter()
            .map(|position| self.model_matrix.transform_point(*position))
            .collect()
    }
}

/// Name-keyed store of shared models.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    models: HashMap<String, Rc<Model>>,
}

impl MeshLibrary {
    /// Empty library
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Library holding the built-in `cube` and `floor` models.
    #[must_use]
    pub fn with_primitives() -> Self {
        let mut library = Self::new();
        library.insert(Model::cuboid(CUBE, Vector3::ONE));
        library.insert(Model::cuboid(FLOOR, Vector3::new(10.0, 0.2, 10.0)));
        library
    }

    /// Adds or replaces a model under its own name.
    pub fn insert(&mut self, model: Model) -> Rc<Model> {
        let model = Rc::new(model);
        self.models.insert(model.name().to_string(), Rc::clone(&model));
        model
    }

    /// Loads an OBJ file and registers it as `name`.
    pub fn load_obj<P: AsRef<Path>>(
        &mut self,
        name: &str,
        path: P,
    ) -> Result<Rc<Model>, AssetError> {
        let model = ObjLoader::load_obj(name, path)?;
        log::info!("Loaded model '{}' ({} positions)", name, model.positions().len());
        Ok(self.insert(model))
    }

    /// Shared handle to a registered model
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<Model>> {
        self.models.get(name).cloned()
    }

    /// Whether `name` is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Number of models
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the library is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
