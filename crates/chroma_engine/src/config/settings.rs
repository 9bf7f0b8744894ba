//! # Game Settings
//!
//! Every tunable the simulation reads, grouped by subsystem. Each section
//! falls back to its defaults field by field, so a config file only needs
//! the values it changes:
//!
//! ```toml
//! [player]
//! jump_force = 6.0
//!
//! [level]
//! path = "assets/levels/demo.txt"
//! ```

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vector3;

/// Player body and controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Capsule segment length
    pub height: f32,
    /// Capsule radius
    pub radius: f32,
    /// Horizontal speed in units per second
    pub move_speed: f32,
    /// Radians of look per unit of mouse delta
    pub mouse_sensitivity: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Terminal falling speed
    pub max_fall_speed: f32,
    /// Vertical speed added by a jump
    pub jump_force: f32,
    /// Pitch clamp, symmetric around the horizon
    pub max_pitch_degrees: f32,
    /// Reach of the interaction ray
    pub interact_distance: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            height: 1.0,
            radius: 0.2,
            move_speed: 2.5,
            mouse_sensitivity: 0.001,
            gravity: 9.81,
            max_fall_speed: 50.0,
            jump_force: 5.0,
            max_pitch_degrees: 89.0,
            interact_distance: 1000.0,
        }
    }
}

/// Projection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view
    pub fov_degrees: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Ping-pong platforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovingObjectSettings {
    /// Fraction of the path covered per second
    pub speed: f32,
    /// End position for records that do not name one
    pub fallback_end_position: [f32; 3],
}

impl MovingObjectSettings {
    /// Fallback end position as a vector
    #[must_use]
    pub const fn fallback_end(&self) -> Vector3 {
        let [x, y, z] = self.fallback_end_position;
        Vector3::new(x, y, z)
    }
}

impl Default for MovingObjectSettings {
    fn default() -> Self {
        Self {
            speed: 0.25,
            fallback_end_position: [0.0, -1.0, -30.0],
        }
    }
}

/// Collision response tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Minimum `normal · up` for a contact to count as floor
    pub grounded_threshold: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self { grounded_threshold: 0.9 }
    }
}

/// An OBJ file to register in the mesh library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSource {
    /// Name level records refer to
    pub name: String,
    /// Path to the `.obj` file
    pub path: String,
}

/// Level content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelSettings {
    /// Level instance file
    pub path: String,
    /// Extra models loaded before the level
    pub models: Vec<ModelSource>,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            path: "assets/levels/demo.txt".to_string(),
            models: Vec::new(),
        }
    }
}

/// Frame stepping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Seconds per frame
    pub fixed_dt: f32,
    /// Stop after this many frames
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<u64>,
    /// RON input script replayed by the headless runner
    pub script: String,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frames: None,
            script: "assets/scripts/demo.ron".to_string(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { filter: "info".to_string() }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player body and controls
    pub player: PlayerSettings,
    /// Projection parameters
    pub camera: CameraSettings,
    /// Ping-pong platforms
    pub moving_object: MovingObjectSettings,
    /// Collision response tuning
    pub physics: PhysicsSettings,
    /// Level content
    pub level: LevelSettings,
    /// Frame stepping
    pub simulation: SimulationSettings,
    /// Log output
    pub logging: LoggingSettings,
}

impl Config for GameConfig {}

impl GameConfig {
    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        if player.height <= 0.0 || player.radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player capsule needs positive height and radius (got {} and {})",
                player.height, player.radius
            )));
        }
        if player.max_fall_speed < 0.0 {
            return Err(ConfigError::Invalid("max_fall_speed must not be negative".to_string()));
        }
        if !(0.0..90.0).contains(&player.max_pitch_degrees) {
            return Err(ConfigError::Invalid(format!(
                "max_pitch_degrees must be in [0, 90), got {}",
                player.max_pitch_degrees
            )));
        }

        let camera = &self.camera;
        if camera.near <= 0.0 || camera.near >= camera.far || camera.aspect <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera needs 0 < near < far and a positive aspect (near {}, far {}, aspect {})",
                camera.near, camera.far, camera.aspect
            )));
        }

        if self.simulation.fixed_dt <= 0.0 {
            return Err(ConfigError::Invalid("fixed_dt must be positive".to_string()));
        }
        if self.moving_object.speed < 0.0 {
            return Err(ConfigError::Invalid(
                "moving object speed must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
