//! Gameplay: the player, level objects and the world that steps them
//!
//! The rules are small. Doors block the player unless the phone carries the
//! door's color. Buttons and moving platforms trade colors with the phone
//! when the player clicks them. Death zones restart the level and the end
//! point wins it.

pub mod camera;
pub mod color;
pub mod game_object;
pub mod input;
pub mod phone;
pub mod player;
pub mod world;

pub use camera::Camera;
pub use color::ColorState;
pub use game_object::{GameObject, GameObjectType, MovingState};
pub use input::PlayerInput;
pub use phone::Phone;
pub use player::Player;
pub use world::{FrameOutcome, GameState, World};

use crate::config::ConfigError;
use crate::foundation::math::MathError;
use crate::scene::LevelError;

/// Gameplay errors
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Settings the simulation cannot run with
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Level could not be built
    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    /// Camera or transform math failed
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}
