//! # Chroma Engine
//!
//! Geometry, collision and player physics for a first-person color-door
//! puzzle game.
//!
//! ## Features
//!
//! - **Math**: typed angles, vectors and column-major matrices
//! - **Geometry**: 2D SAT tests and 3D primitive intersection routines
//! - **Physics**: box, sphere and capsule colliders with pairwise dispatch,
//!   closest-hit ray casting and velocity response
//! - **Gameplay**: color doors, swap buttons, moving platforms, death zones
//!   and the end point, stepped one fixed frame at a time
//! - **Configuration**: TOML or RON settings with per-field defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use chroma_engine::prelude::*;
//!
//! let library = MeshLibrary::with_primitives();
//! let mut world = World::new(GameConfig::default()).expect("defaults are valid");
//! world
//!     .load_level("12 floor none 0 -0.1 0 0 0 0 1 1 1", &library)
//!     .expect("level should load");
//!
//! world.frame(&PlayerInput::idle(), 1.0 / 60.0).expect("frame should run");
//! assert!(world.player().grounded());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod game;
pub mod geometry;
pub mod physics;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, MeshInstance, MeshLibrary, Model},
        config::{Config, ConfigError, GameConfig},
        foundation::{
            collections::EntityId,
            math::{Degree, MathError, Matrix4, Radian, Vector3},
            time::FrameClock,
        },
        game::{ColorState, FrameOutcome, GameError, GameObjectType, GameState, PlayerInput, World},
        geometry::{Aabb, Capsule, Line3D, Sphere},
        physics::{Collider, ColliderType, PhysicsManager, RaycastHit},
        scene::{LevelError, LevelInstance},
    };
}
