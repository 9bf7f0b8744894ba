//! The player's color key

use super::color::ColorState;

/// Holds the color the player currently carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Phone {
    state: ColorState,
}

impl Phone {
    /// Phone holding no color
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Carried color
    #[must_use]
    pub const fn state(&self) -> ColorState {
        self.state
    }

    /// Replaces the carried color.
    pub fn set_state(&mut self, state: ColorState) {
        self.state = state;
    }

    /// Trades colors with `other`: the phone takes `other`'s color and
    /// `other` takes the one the phone held.
    pub fn swap_color_state(&mut self, other: &mut ColorState) {
        std::mem::swap(&mut self.state, other);
    }
}
