//! Collision detection and response
//!
//! Colliders wrap one primitive from [`crate::geometry`] and dispatch pair
//! tests on both shapes. [`PhysicsManager`] answers ray queries over any
//! iterable of colliders, and [`response`] turns a contact normal into a
//! corrected player velocity.

pub mod collider;
pub mod raycast;
pub mod response;

pub use collider::{Collider, ColliderShape, ColliderType};
pub use raycast::{PhysicsManager, RayContact, RaycastHit, DEFAULT_MAX_DISTANCE};
pub use response::{resolve_contact, CollisionResponse};
