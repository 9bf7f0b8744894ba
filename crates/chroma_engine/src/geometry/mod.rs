//! Geometric primitives and intersection routines
//!
//! [`geometry3d`] carries the shapes the physics layer is built from.
//! [`geometry2d`] holds the planar counterparts used for overlay and
//! top-down checks.

pub mod geometry2d;
pub mod geometry3d;

pub use geometry3d::{Aabb, Capsule, Line3D, Obb, Plane3D, Point3D, Sphere};
