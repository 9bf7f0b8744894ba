//! Ray casting against colliders
//!
//! Distances are measured in units of the ray direction (`point = origin +
//! direction * distance`), so a unit direction gives world distances.
//! A ray that starts inside a shape hits it at distance 0 with the normal
//! facing back along the ray.

use crate::foundation::math::{square_root, Vector3, EPSILON};
use crate::geometry::{Aabb, Capsule, Line3D, Point3D, Sphere};

use super::collider::Collider;

/// Range used when the caller has no better bound.
pub const DEFAULT_MAX_DISTANCE: f32 = 1000.0;

/// Tolerance for matching a hit point to a box face.
const FACE_EPSILON: f32 = 1e-4;

/// A ray entry into a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayContact {
    /// Entry point in world space
    pub point: Point3D,
    /// Ray parameter of the entry point
    pub distance: f32,
    /// Surface normal at the entry point
    pub normal: Vector3,
}

impl RayContact {
    fn starting_inside(ray: &Line3D) -> Self {
        Self {
            point: ray.origin,
            distance: 0.0,
            normal: -ray.direction.normalized(),
        }
    }
}

/// Closest hit found by a ray cast, borrowing the collider it hit.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit<'a> {
    /// Collider that was hit
    pub collider: &'a Collider,
    /// Entry point in world space
    pub point: Point3D,
    /// Ray parameter of the entry point
    pub distance: f32,
    /// Surface normal at the entry point
    pub normal: Vector3,
}

impl<'a> RaycastHit<'a> {
    /// Tags a primitive contact with the collider it belongs to.
    #[must_use]
    pub const fn new(collider: &'a Collider, contact: RayContact) -> Self {
        Self {
            collider,
            point: contact.point,
            distance: contact.distance,
            normal: contact.normal,
        }
    }
}

/// Stateless ray queries.
pub struct PhysicsManager;

impl PhysicsManager {
    /// Closest collider hit by `ray` strictly nearer than `max_distance`.
    ///
    /// Colliders are scanned linearly; `None` entries are skipped. The result
    /// does not depend on iteration order except between hits at exactly the
    /// same distance, where the first one scanned wins.
    pub fn raycast<'a, I, C>(
        ray: &Line3D,
        colliders: I,
        max_distance: f32,
    ) -> Option<RaycastHit<'a>>
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<&'a Collider>>,
    {
        let mut closest: Option<RaycastHit<'a>> = None;
        let mut closest_distance = max_distance;

        for entry in colliders {
            let collider: Option<&'a Collider> = entry.into();
            let Some(collider) = collider else {
                continue;
            };
            if let Some(hit) = collider.intersect(ray, closest_distance) {
                if hit.distance < closest_distance {
                    closest_distance = hit.distance;
                    closest = Some(hit);
                }
            }
        }

        match &closest {
            Some(hit) => log::debug!(
                "Raycast hit {:?} at distance {:.3} (owner {:?})",
                hit.collider.kind(),
                hit.distance,
                hit.collider.owner()
            ),
            None => log::debug!("Raycast from {} missed", ray.origin),
        }
        closest
    }

    /// Slab test of `ray` against a box.
    pub fn intersect_ray_aabb(ray: &Line3D, aabb: &Aabb, max_distance: f32) -> Option<RayContact> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = max_distance;
        for axis in 0..3 {
            if !crate::geometry::geometry3d::axis_aabb_intersection(
                ray.origin[axis],
                ray.direction[axis],
                aabb.min[axis],
                aabb.max[axis],
                &mut t_near,
                &mut t_far,
            ) {
                return None;
            }
        }

        if t_near > max_distance || t_far < 0.0 {
            return None;
        }
        if t_near < 0.0 {
            return Some(RayContact::starting_inside(ray));
        }

        let point = ray.point_at(t_near);
        let faces = [
            (point.x - aabb.min.x, Vector3::LEFT),
            (point.x - aabb.max.x, Vector3::RIGHT),
            (point.y - aabb.min.y, Vector3::DOWN),
            (point.y - aabb.max.y, Vector3::UP),
            (point.z - aabb.min.z, Vector3::BACK),
            (point.z - aabb.max.z, Vector3::FRONT),
        ];
        let mut normal = faces
            .iter()
            .find(|(offset, _)| offset.abs() < FACE_EPSILON)
            .map_or(Vector3::ZERO, |(_, normal)| *normal);
        if normal.dot(&ray.direction) > 0.0 {
            normal = -normal;
        }

        Some(RayContact { point, distance: t_near, normal })
    }

    /// First entry of `ray` into a sphere.
    pub fn intersect_ray_sphere(
        ray: &Line3D,
        sphere: &Sphere,
        max_distance: f32,
    ) -> Option<RayContact> {
        if sphere.contains_point(&ray.origin) {
            return Some(RayContact::starting_inside(ray));
        }

        let t = first_sphere_entry(ray, sphere.center, sphere.radius)
            .filter(|t| *t <= max_distance)?;
        let point = ray.point_at(t);
        Some(RayContact { point, distance: t, normal: (point - sphere.center).normalized() })
    }

    /// First entry of `ray` into a capsule, through its body or either cap.
    pub fn intersect_ray_capsule(
        ray: &Line3D,
        capsule: &Capsule,
        max_distance: f32,
    ) -> Option<RayContact> {
        if capsule.contains_point(&ray.origin) {
            return Some(RayContact::starting_inside(ray));
        }

        let t = [
            cylinder_entry(ray, capsule),
            first_sphere_entry(ray, capsule.start, capsule.radius),
            first_sphere_entry(ray, capsule.end, capsule.radius),
        ]
        .into_iter()
        .flatten()
        .filter(|t| *t <= max_distance)
        .min_by(f32::total_cmp)?;

        let point = ray.point_at(t);
        let normal = (point - capsule.closest_point_on_axis(&point)).normalized();
        Some(RayContact { point, distance: t, normal })
    }
}

/// Smallest non-negative root of the ray/sphere quadratic, for an origin outside the sphere.
fn first_sphere_entry(ray: &Line3D, center: Point3D, radius: f32) -> Option<f32> {
    let a = ray.direction.magnitude_squared();
    if a < EPSILON {
        return None;
    }

    let to_origin = ray.origin - center;
    let b = 2.0 * to_origin.dot(&ray.direction);
    let c = to_origin.magnitude_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - square_root(discriminant)) / (2.0 * a);
    (t >= 0.0).then_some(t)
}

/// Entry into the capsule's cylindrical body, excluding the caps.
fn cylinder_entry(ray: &Line3D, capsule: &Capsule) -> Option<f32> {
    let axis = capsule.end - capsule.start;
    let offset = ray.origin - capsule.start;
    let axis_squared = axis.magnitude_squared();
    let axis_dot_direction = axis.dot(&ray.direction);
    let axis_dot_offset = axis.dot(&offset);

    let a = axis_squared * ray.direction.magnitude_squared()
        - axis_dot_direction * axis_dot_direction;
    if a <= EPSILON {
        return None;
    }
    let b = axis_squared * offset.dot(&ray.direction) - axis_dot_offset * axis_dot_direction;
    let c = axis_squared * offset.magnitude_squared()
        - axis_dot_offset * axis_dot_offset
        - capsule.radius * capsule.radius * axis_squared;

    let h = b * b - a * c;
    if h < 0.0 {
        return None;
    }
    let t = (-b - square_root(h)) / a;
    let along_axis = axis_dot_offset + t * axis_dot_direction;
    (t >= 0.0 && (0.0..=axis_squared).contains(&along_axis)).then_some(t)
}
