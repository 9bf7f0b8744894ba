//! Colliders: a primitive shape bound to an optional owning entity.
//!
//! Collision checks go through two dispatch steps. `a.check_collision(b)`
//! looks at the shape of `a` and asks `b` to test itself against that
//! primitive with the matching `check_collision_with_*` method. The normal
//! returned by `x.check_collision_with_*(p)` points from `p` toward `x`, so
//! `a.check_collision(b)` yields a normal pointing from `a` toward `b`.

use serde::{Deserialize, Serialize};

use crate::assets::MeshInstance;
use crate::foundation::collections::EntityId;
use crate::foundation::math::Vector3;
use crate::geometry::geometry3d::{
    collide_aabb_aabb, collide_capsule_aabb, collide_capsule_capsule, collide_sphere_aabb,
    collide_sphere_capsule, collide_sphere_sphere, closest_point_on_segment,
};
use crate::geometry::{Aabb, Capsule, Line3D, Point3D, Sphere};

use super::raycast::{PhysicsManager, RaycastHit};

/// Shape family of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderType {
    /// Axis-aligned box
    Box,
    /// Sphere
    Sphere,
    /// Capsule
    Capsule,
}

/// The primitive a collider wraps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Axis-aligned box
    Box(Aabb),
    /// Sphere
    Sphere(Sphere),
    /// Capsule
    Capsule(Capsule),
}

impl ColliderShape {
    /// Shape family
    #[must_use]
    pub const fn kind(&self) -> ColliderType {
        match self {
            Self::Box(_) => ColliderType::Box,
            Self::Sphere(_) => ColliderType::Sphere,
            Self::Capsule(_) => ColliderType::Capsule,
        }
    }

    /// Fits a shape of `kind` around world-space positions.
    ///
    /// Returns `None` when `positions` is empty.
    #[must_use]
    pub fn fit(kind: ColliderType, positions: &[Point3D]) -> Option<Self> {
        match kind {
            ColliderType::Box => Aabb::from_points(positions).map(Self::Box),
            ColliderType::Sphere => bounding_sphere(positions).map(Self::Sphere),
            ColliderType::Capsule => bounding_capsule(positions).map(Self::Capsule),
        }
    }
}

/// Centroid-centered sphere reaching the farthest position.
fn bounding_sphere(positions: &[Point3D]) -> Option<Sphere> {
    if positions.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let center = positions.iter().fold(Point3D::ZERO, |sum, p| sum + *p) / positions.len() as f32;
    let radius = positions
        .iter()
        .map(|p| p.distance_squared_from(&center))
        .fold(0.0_f32, f32::max)
        .sqrt();
    Some(Sphere::new(center, radius))
}

/// Capsule along the farthest pair of positions, wide enough to hold the rest.
fn bounding_capsule(positions: &[Point3D]) -> Option<Capsule> {
    let first = *positions.first()?;

    let mut endpoints = (first, first);
    let mut widest = 0.0;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            let distance_squared = a.distance_squared_from(b);
            if distance_squared > widest {
                widest = distance_squared;
                endpoints = (*a, *b);
            }
        }
    }

    let (start, end) = endpoints;
    let radius = positions
        .iter()
        .map(|p| p.distance_from(&closest_point_on_segment(p, &start, &end)))
        .fold(0.0_f32, f32::max);
    Some(Capsule::new(start, end, radius))
}

/// A collision volume, owned by a game object or by the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    shape: ColliderShape,
    owner: Option<EntityId>,
}

impl Collider {
    /// Wraps a shape with no owner.
    #[must_use]
    pub const fn new(shape: ColliderShape) -> Self {
        Self { shape, owner: None }
    }

    /// Box collider
    #[must_use]
    pub const fn from_aabb(aabb: Aabb) -> Self {
        Self::new(ColliderShape::Box(aabb))
    }

    /// Sphere collider
    #[must_use]
    pub const fn from_sphere(sphere: Sphere) -> Self {
        Self::new(ColliderShape::Sphere(sphere))
    }

    /// Capsule collider
    #[must_use]
    pub const fn from_capsule(capsule: Capsule) -> Self {
        Self::new(ColliderShape::Capsule(capsule))
    }

    /// Fits a collider of `kind` to the mesh's world-space vertices.
    ///
    /// Returns `None` for a mesh without vertices.
    #[must_use]
    pub fn create_from_mesh(kind: ColliderType, mesh: &MeshInstance) -> Option<Self> {
        Self::create_from_positions(kind, &mesh.transformed_positions())
    }

    /// Fits a collider of `kind` to world-space positions.
    #[must_use]
    pub fn create_from_positions(kind: ColliderType, positions: &[Point3D]) -> Option<Self> {
        ColliderShape::fit(kind, positions).map(Self::new)
    }

    /// Capsule with explicit endpoints and radius.
    #[must_use]
    pub const fn create_capsule_manual_set(start: Point3D, end: Point3D, radius: f32) -> Self {
        Self::from_capsule(Capsule::new(start, end, radius))
    }

    /// Moves a capsule collider. Other shapes are left untouched.
    pub fn update_capsule(&mut self, start: Point3D, end: Point3D, radius: f32) {
        match &mut self.shape {
            ColliderShape::Capsule(capsule) => *capsule = Capsule::new(start, end, radius),
            other => log::warn!("update_capsule called on a {:?} collider", other.kind()),
        }
    }

    /// Refits the shape to the mesh's current transform, keeping kind and owner.
    ///
    /// A mesh without vertices leaves the bounds unchanged.
    pub fn update_bounds(&mut self, mesh: &MeshInstance) {
        if let Some(shape) = ColliderShape::fit(self.kind(), &mesh.transformed_positions()) {
            self.shape = shape;
        }
    }

    /// Shape family
    #[must_use]
    pub const fn kind(&self) -> ColliderType {
        self.shape.kind()
    }

    /// The wrapped primitive
    #[must_use]
    pub const fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Box bounds, if this is a box collider
    #[must_use]
    pub const fn aabb(&self) -> Option<&Aabb> {
        match &self.shape {
            ColliderShape::Box(aabb) => Some(aabb),
            _ => None,
        }
    }

    /// Sphere bounds, if this is a sphere collider
    #[must_use]
    pub const fn sphere(&self) -> Option<&Sphere> {
        match &self.shape {
            ColliderShape::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }

    /// Capsule bounds, if this is a capsule collider
    #[must_use]
    pub const fn capsule(&self) -> Option<&Capsule> {
        match &self.shape {
            ColliderShape::Capsule(capsule) => Some(capsule),
            _ => None,
        }
    }

    /// Owning entity
    #[must_use]
    pub const fn owner(&self) -> Option<EntityId> {
        self.owner
    }

    /// Binds the collider to an entity.
    pub fn set_owner(&mut self, owner: Option<EntityId>) {
        self.owner = owner;
    }

    /// Builder form of [`Collider::set_owner`].
    #[must_use]
    pub const fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// First entry of `ray` into this collider within `max_distance`.
    #[must_use]
    pub fn intersect(&self, ray: &Line3D, max_distance: f32) -> Option<RaycastHit<'_>> {
        let contact = match &self.shape {
            ColliderShape::Box(aabb) => PhysicsManager::intersect_ray_aabb(ray, aabb, max_distance),
            ColliderShape::Sphere(sphere) => {
                PhysicsManager::intersect_ray_sphere(ray, sphere, max_distance)
            }
            ColliderShape::Capsule(capsule) => {
                PhysicsManager::intersect_ray_capsule(ray, capsule, max_distance)
            }
        }?;
        Some(RaycastHit::new(self, contact))
    }

    /// Tests this collider against `other`.
    ///
    /// The normal points from `self` toward `other`.
    #[must_use]
    pub fn check_collision(&self, other: &Self) -> Option<Vector3> {
        match &self.shape {
            ColliderShape::Box(aabb) => other.check_collision_with_box(aabb),
            ColliderShape::Sphere(sphere) => other.check_collision_with_sphere(sphere),
            ColliderShape::Capsule(capsule) => other.check_collision_with_capsule(capsule),
        }
    }

    /// Tests this collider against a box; the normal points from the box toward `self`.
    #[must_use]
    pub fn check_collision_with_box(&self, aabb: &Aabb) -> Option<Vector3> {
        match &self.shape {
            ColliderShape::Box(own) => collide_aabb_aabb(own, aabb),
            ColliderShape::Sphere(own) => collide_sphere_aabb(own, aabb),
            ColliderShape::Capsule(own) => collide_capsule_aabb(own, aabb),
        }
    }

    /// Tests this collider against a sphere; the normal points from the sphere toward `self`.
    #[must_use]
    pub fn check_collision_with_sphere(&self, sphere: &Sphere) -> Option<Vector3> {
        match &self.shape {
            ColliderShape::Box(own) => collide_sphere_aabb(sphere, own).map(|normal| -normal),
            ColliderShape::Sphere(own) => collide_sphere_sphere(own, sphere),
            ColliderShape::Capsule(own) => {
                collide_sphere_capsule(sphere, own).map(|normal| -normal)
            }
        }
    }

    /// Tests this collider against a capsule; the normal points from the capsule toward `self`.
    #[must_use]
    pub fn check_collision_with_capsule(&self, capsule: &Capsule) -> Option<Vector3> {
        match &self.shape {
            ColliderShape::Box(own) => collide_capsule_aabb(capsule, own).map(|normal| -normal),
            ColliderShape::Sphere(own) => collide_sphere_capsule(own, capsule),
            ColliderShape::Capsule(own) => collide_capsule_capsule(own, capsule),
        }
    }
}
