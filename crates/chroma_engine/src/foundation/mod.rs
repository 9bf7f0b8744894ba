//! Foundation module - Core utilities and types
//!
//! Everything above this layer builds on it:
//! - Math types and operations
//! - Entity handles
//! - Frame timing
//! - Logging utilities

pub mod collections;
pub mod logging;
pub mod math;
pub mod time;
