//! Key colors shared by the phone, doors and switches

use std::fmt;

use serde::{Deserialize, Serialize};

/// A key color. `Inactive` is the neutral gray state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorState {
    /// No color
    #[default]
    Inactive,
    /// Red
    Red,
    /// Blue
    Blue,
    /// Yellow
    Yellow,
}

impl ColorState {
    /// Color encoded in a level object id: `id % 4`.
    #[must_use]
    pub const fn from_key(key: i32) -> Self {
        match key.rem_euclid(4) {
            0 => Self::Inactive,
            1 => Self::Red,
            2 => Self::Blue,
            _ => Self::Yellow,
        }
    }

    /// Texture an object shows while holding this color.
    #[must_use]
    pub const fn texture_name(self) -> &'static str {
        match self {
            Self::Inactive => "gray_color",
            Self::Red => "red_color",
            Self::Blue => "blue_color",
            Self::Yellow => "yellow_color",
        }
    }
}

impl fmt::Display for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Inactive => "inactive",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_cycles_every_four_ids() {
        assert_eq!(ColorState::from_key(0), ColorState::Inactive);
        assert_eq!(ColorState::from_key(5), ColorState::Red);
        assert_eq!(ColorState::from_key(10), ColorState::Blue);
        assert_eq!(ColorState::from_key(3), ColorState::Yellow);
    }

    #[test]
    fn test_texture_names() {
        assert_eq!(ColorState::Inactive.texture_name(), "gray_color");
        assert_eq!(ColorState::Yellow.texture_name(), "yellow_color");
        assert_eq!(ColorState::Blue.to_string(), "blue");
    }
}
