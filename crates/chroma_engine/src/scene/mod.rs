//! Level description loading
//!
//! A level is a plain text list of placed instances. This module only turns
//! text into records; the game world decides what each record becomes.

pub mod level;

pub use level::{load_level_file, parse_level, LevelError, LevelInstance, MOVING_OBJECT_IDS};
