//! Per-frame input snapshot

use serde::{Deserialize, Serialize};

/// Everything the player controller reads in one frame.
///
/// Buttons are levels, not edges: the controller detects presses itself by
/// comparing against the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInput {
    /// Move along the view direction
    pub forward: bool,
    /// Move against the view direction
    pub back: bool,
    /// Strafe left
    pub left: bool,
    /// Strafe right
    pub right: bool,
    /// Jump button held
    pub jump: bool,
    /// Interact button held
    pub interact: bool,
    /// Horizontal mouse motion since last frame
    pub mouse_dx: f32,
    /// Vertical mouse motion since last frame, positive up
    pub mouse_dy: f32,
}

impl PlayerInput {
    /// No buttons held and no mouse motion
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }
}
