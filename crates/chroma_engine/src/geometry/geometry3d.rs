//! 3D primitives and the narrow-phase tests between them.
//!
//! Every `collide_*` function returns the contact normal when the shapes
//! touch, pointing from the second argument toward the first. Contacts are
//! boundary inclusive. When the closest points coincide the normal falls back
//! to world up.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{almost_equal, clamp, Radian, Vector3};

/// Squared separation under which two closest points are treated as one.
const COINCIDENT_DISTANCE_SQUARED: f32 = 1e-8;

/// A position in world space.
pub type Point3D = Vector3;

/// Origin plus direction. The direction is kept as given: for segment tests
/// `origin + direction` is the far end, for rays `t` is in direction units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line3D {
    /// Start point
    pub origin: Point3D,
    /// Direction, not normalized
    pub direction: Vector3,
}

impl Default for Line3D {
    fn default() -> Self {
        Self::new(Point3D::ZERO, Vector3::RIGHT)
    }
}

impl Line3D {
    /// Creates a line from an origin and a direction.
    #[must_use]
    pub const fn new(origin: Point3D, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Length of the direction vector.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.direction.magnitude()
    }

    /// `origin + direction * t`
    #[must_use]
    pub fn point_at(&self, t: f32) -> Point3D {
        self.origin + self.direction * t
    }

    /// Segment test against a box, `t` restricted to `[0, 1]`.
    ///
    /// A zero direction degenerates to a point-inside test.
    #[must_use]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if self.direction.magnitude_squared() < COINCIDENT_DISTANCE_SQUARED {
            return aabb.contains_point(&self.origin);
        }

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for axis in 0..3 {
            if !axis_aabb_intersection(
                self.origin[axis],
                self.direction[axis],
                aabb.min[axis],
                aabb.max[axis],
                &mut t_near,
                &mut t_far,
            ) {
                return false;
            }
        }

        t_near <= 1.0 && t_far >= 0.0
    }

    /// Segment test against a capsule, `t` restricted to `[0, 1]`.
    #[must_use]
    pub fn intersects_capsule(&self, capsule: &Capsule) -> bool {
        let (on_line, on_capsule) = closest_points_between_segments(
            self.origin,
            self.point_at(1.0),
            capsule.start,
            capsule.end,
        );
        on_line.distance_squared_from(&on_capsule) <= capsule.radius * capsule.radius
    }
}

/// Infinite plane through `point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3D {
    point: Point3D,
    normal: Vector3,
}

impl Default for Plane3D {
    fn default() -> Self {
        Self { point: Point3D::ZERO, normal: Vector3::UP }
    }
}

impl Plane3D {
    /// Creates a plane; the normal is normalized.
    #[must_use]
    pub fn new(point: Point3D, normal: Vector3) -> Self {
        Self { point, normal: normal.normalized() }
    }

    /// A point on the plane.
    #[must_use]
    pub const fn point(&self) -> Point3D {
        self.point
    }

    /// Unit normal.
    #[must_use]
    pub const fn normal(&self) -> Vector3 {
        self.normal
    }

    /// Signed distance, positive on the side the normal faces.
    #[must_use]
    pub fn distance_to(&self, point: &Point3D) -> f32 {
        (*point - self.point).dot(&self.normal)
    }
}

/// Axis-aligned box. `min <= max` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3D,
    /// Maximum corner
    pub max: Point3D,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Point3D::ZERO, Point3D::ONE)
    }
}

impl Aabb {
    /// Creates a box from its corners.
    #[must_use]
    pub const fn new(min: Point3D, max: Point3D) -> Self {
        Self { min, max }
    }

    /// Creates a box from a center and half extents.
    #[must_use]
    pub fn from_center(center: Point3D, half_extents: Vector3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Tightest box around `points`, `None` when there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3D>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::new(first, first), |bounds, point| {
            Self::new(bounds.min.min(point), bounds.max.max(point))
        }))
    }

    /// Midpoint of the corners.
    #[must_use]
    pub fn center(&self) -> Point3D {
        (self.min + self.max) * 0.5
    }

    /// Half size along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vector3 {
        (self.max - self.min) * 0.5
    }

    /// Whether `point` lies inside or on the surface.
    #[must_use]
    pub fn contains_point(&self, point: &Point3D) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Closest point of the box to `point`.
    #[must_use]
    pub fn closest_point(&self, point: &Point3D) -> Point3D {
        closest_point_on_aabb(point, self)
    }
}

/// Box with a center and a half size that can be rotated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obb {
    /// Center
    pub center: Point3D,
    /// Half size, rotated with the box
    pub half_size: Vector3,
}

impl Default for Obb {
    fn default() -> Self {
        Self::new(Point3D::ZERO, Vector3::ONE)
    }
}

impl Obb {
    /// Creates a box from a center and a half size.
    #[must_use]
    pub const fn new(center: Point3D, half_size: Vector3) -> Self {
        Self { center, half_size }
    }

    /// Rotates the half size by Euler angles.
    pub fn rotate(
        &mut self,
        angle_x: impl Into<Radian>,
        angle_y: impl Into<Radian>,
        angle_z: impl Into<Radian>,
    ) {
        self.half_size.rotate_euler(angle_x, angle_y, angle_z);
    }
}

/// Sphere with a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Center
    pub center: Point3D,
    /// Radius
    pub radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Point3D::ZERO, 1.0)
    }
}

impl Sphere {
    /// Creates a sphere.
    #[must_use]
    pub const fn new(center: Point3D, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether `point` lies inside or on the surface. Always false for a
    /// non-positive radius.
    #[must_use]
    pub fn contains_point(&self, point: &Point3D) -> bool {
        self.radius > 0.0
            && point.distance_squared_from(&self.center) <= self.radius * self.radius
    }
}

/// A sphere swept from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    /// First segment endpoint
    pub start: Point3D,
    /// Second segment endpoint
    pub end: Point3D,
    /// Radius
    pub radius: f32,
}

impl Default for Capsule {
    fn default() -> Self {
        Self::new(Point3D::ZERO, Point3D::ONE, 1.0)
    }
}

impl Capsule {
    /// Creates a capsule.
    #[must_use]
    pub const fn new(start: Point3D, end: Point3D, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Closest point of the inner segment to `point`.
    #[must_use]
    pub fn closest_point_on_axis(&self, point: &Point3D) -> Point3D {
        closest_point_on_segment(point, &self.start, &self.end)
    }

    /// Whether `point` lies inside or on the surface. Always false for a
    /// non-positive radius.
    #[must_use]
    pub fn contains_point(&self, point: &Point3D) -> bool {
        self.radius > 0.0
            && point.distance_squared_from(&self.closest_point_on_axis(point))
                <= self.radius * self.radius
    }
}

/// Clamped projection of `point` onto the segment. A zero-length segment
/// returns `start`.
#[must_use]
pub fn closest_point_on_segment(point: &Point3D, start: &Point3D, end: &Point3D) -> Point3D {
    let segment = *end - *start;
    let length_squared = segment.magnitude_squared();
    if length_squared == 0.0 {
        return *start;
    }

    let t = clamp((*point - *start).dot(&segment) / length_squared, 0.0, 1.0);
    *start + segment * t
}

/// Narrows `[t_near, t_far]` to the slab `[min, max]` along one axis.
///
/// Returns false when the interval becomes empty, or when the direction is
/// parallel to the slab and the origin lies outside it.
pub fn axis_aabb_intersection(
    origin: f32,
    direction: f32,
    min: f32,
    max: f32,
    t_near: &mut f32,
    t_far: &mut f32,
) -> bool {
    if almost_equal(direction, 0.0) {
        return origin >= min && origin <= max;
    }

    let inverse = 1.0 / direction;
    let mut t1 = (min - origin) * inverse;
    let mut t2 = (max - origin) * inverse;
    if t1 > t2 {
        std::mem::swap(&mut t1, &mut t2);
    }
    *t_near = t_near.max(t1);
    *t_far = t_far.min(t2);

    *t_near <= *t_far
}

/// `point` clamped into the box.
#[must_use]
pub fn closest_point_on_aabb(point: &Point3D, aabb: &Aabb) -> Point3D {
    Point3D::new(
        clamp(point.x, aabb.min.x, aabb.max.x),
        clamp(point.y, aabb.min.y, aabb.max.y),
        clamp(point.z, aabb.min.z, aabb.max.z),
    )
}

/// Closest pair of points between segments `p1-q1` and `p2-q2`.
///
/// Parallel segments pick the pair at `s = 0`.
#[must_use]
pub fn closest_points_between_segments(
    p1: Point3D,
    q1: Point3D,
    p2: Point3D,
    q2: Point3D,
) -> (Point3D, Point3D) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.magnitude_squared();
    let e = d2.magnitude_squared();
    let f = d2.dot(&r);

    if a <= COINCIDENT_DISTANCE_SQUARED && e <= COINCIDENT_DISTANCE_SQUARED {
        return (p1, p2);
    }

    let (s, t) = if a <= COINCIDENT_DISTANCE_SQUARED {
        (0.0, clamp(f / e, 0.0, 1.0))
    } else {
        let c = d1.dot(&r);
        if e <= COINCIDENT_DISTANCE_SQUARED {
            (clamp(-c / a, 0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(&d2);
            let denominator = a * e - b * b;
            let s = if denominator > 0.0 {
                clamp((b * f - c * e) / denominator, 0.0, 1.0)
            } else {
                0.0
            };

            let t = (b * s + f) / e;
            if t < 0.0 {
                (clamp(-c / a, 0.0, 1.0), 0.0)
            } else if t > 1.0 {
                (clamp((b - c) / a, 0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}

/// Normal from `second` toward `first` when they are within `reach`.
fn contact_normal(first: Point3D, second: Point3D, reach: f32) -> Option<Vector3> {
    let difference = first - second;
    let distance_squared = difference.magnitude_squared();
    if distance_squared > reach * reach {
        return None;
    }

    Some(if distance_squared < COINCIDENT_DISTANCE_SQUARED {
        Vector3::UP
    } else {
        difference.normalized()
    })
}

/// Capsule against box. The capsule point used is the one closest to the
/// box center; the normal points from the box toward the capsule.
#[must_use]
pub fn collide_capsule_aabb(capsule: &Capsule, aabb: &Aabb) -> Option<Vector3> {
    let on_segment = capsule.closest_point_on_axis(&aabb.center());
    let on_box = closest_point_on_aabb(&on_segment, aabb);
    contact_normal(on_segment, on_box, capsule.radius)
}

/// Box against box, normal along the axis of least overlap.
#[must_use]
pub fn collide_aabb_aabb(first: &Aabb, second: &Aabb) -> Option<Vector3> {
    let mut best: Option<(usize, f32)> = None;
    for axis in 0..3 {
        if first.min[axis] > second.max[axis] || first.max[axis] < second.min[axis] {
            return None;
        }
        let overlap = (first.max[axis] - second.min[axis]).min(second.max[axis] - first.min[axis]);
        if best.map_or(true, |(_, smallest)| overlap < smallest) {
            best = Some((axis, overlap));
        }
    }

    let (axis, _) = best?;
    let mut normal = Vector3::ZERO;
    normal[axis] = if first.center()[axis] >= second.center()[axis] { 1.0 } else { -1.0 };
    Some(normal)
}

/// Sphere against box; the normal points from the box toward the sphere.
#[must_use]
pub fn collide_sphere_aabb(sphere: &Sphere, aabb: &Aabb) -> Option<Vector3> {
    let on_box = closest_point_on_aabb(&sphere.center, aabb);
    contact_normal(sphere.center, on_box, sphere.radius)
}

/// Sphere against sphere.
#[must_use]
pub fn collide_sphere_sphere(first: &Sphere, second: &Sphere) -> Option<Vector3> {
    contact_normal(first.center, second.center, first.radius + second.radius)
}

/// Sphere against capsule; the normal points from the capsule toward the sphere.
#[must_use]
pub fn collide_sphere_capsule(sphere: &Sphere, capsule: &Capsule) -> Option<Vector3> {
    let on_axis = capsule.closest_point_on_axis(&sphere.center);
    contact_normal(sphere.center, on_axis, sphere.radius + capsule.radius)
}

/// Capsule against capsule.
#[must_use]
pub fn collide_capsule_capsule(first: &Capsule, second: &Capsule) -> Option<Vector3> {
    let (on_first, on_second) =
        closest_points_between_segments(first.start, first.end, second.start, second.end);
    contact_normal(on_first, on_second, first.radius + second.radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Degree;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn unit_box() -> Aabb {
        Aabb::new(Point3D::splat(-1.0), Point3D::splat(1.0))
    }

    fn upright_capsule(base: Point3D, radius: f32) -> Capsule {
        Capsule::new(base, base + Vector3::new(0.0, 1.0, 0.0), radius)
    }

    #[test]
    fn test_closest_point_on_segment_clamps() {
        let (start, end) = (Point3D::ZERO, Point3D::new(2.0, 0.0, 0.0));
        assert_eq!(
            closest_point_on_segment(&Point3D::new(1.0, 5.0, 0.0), &start, &end),
            Point3D::new(1.0, 0.0, 0.0)
        );
        assert_eq!(closest_point_on_segment(&Point3D::new(-3.0, 1.0, 0.0), &start, &end), start);
        assert_eq!(closest_point_on_segment(&Point3D::new(9.0, 0.0, 0.0), &start, &end), end);
        assert_eq!(closest_point_on_segment(&Point3D::ONE, &start, &start), start);
    }

    #[test]
    fn test_axis_slab_parallel_outside_misses() {
        let (mut t_near, mut t_far) = (0.0, 100.0);
        assert!(!axis_aabb_intersection(5.0, 0.0, -1.0, 1.0, &mut t_near, &mut t_far));
        assert!(axis_aabb_intersection(0.5, 0.0, -1.0, 1.0, &mut t_near, &mut t_far));
        assert!(axis_aabb_intersection(-5.0, 1.0, -1.0, 1.0, &mut t_near, &mut t_far));
        assert_relative_eq!(t_near, 4.0);
        assert_relative_eq!(t_far, 6.0);
    }

    #[test]
    fn test_point_inside_tests() {
        let aabb = unit_box();
        assert!(aabb.contains_point(&Point3D::new(1.0, -1.0, 0.0)));
        assert!(!aabb.contains_point(&Point3D::new(1.01, 0.0, 0.0)));

        let sphere = Sphere::new(Point3D::ZERO, 2.0);
        assert!(sphere.contains_point(&Point3D::new(0.0, 2.0, 0.0)));
        assert!(!Sphere::new(Point3D::ZERO, 0.0).contains_point(&Point3D::ZERO));

        let capsule = upright_capsule(Point3D::ZERO, 0.5);
        assert!(capsule.contains_point(&Point3D::new(0.5, 0.5, 0.0)));
        assert!(capsule.contains_point(&Point3D::new(0.0, 1.5, 0.0)));
        assert!(!capsule.contains_point(&Point3D::new(0.0, 1.6, 0.0)));
        assert!(!Capsule::new(Point3D::ZERO, Point3D::ONE, -1.0).contains_point(&Point3D::ZERO));
    }

    #[test]
    fn test_segment_against_aabb() {
        let aabb = unit_box();
        let reaches = Line3D::new(Point3D::new(0.0, 0.0, -3.0), Vector3::new(0.0, 0.0, 2.5));
        let short = Line3D::new(Point3D::new(0.0, 0.0, -3.0), Vector3::new(0.0, 0.0, 1.5));
        let behind = Line3D::new(Point3D::new(0.0, 0.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(reaches.intersects_aabb(&aabb));
        assert!(!short.intersects_aabb(&aabb));
        assert!(!behind.intersects_aabb(&aabb));
        assert!(Line3D::new(Point3D::ZERO, Vector3::ZERO).intersects_aabb(&aabb));
    }

    #[test]
    fn test_segment_against_capsule() {
        let capsule = upright_capsule(Point3D::ZERO, 0.5);
        let through = Line3D::new(Point3D::new(-2.0, 0.5, 0.0), Vector3::new(4.0, 0.0, 0.0));
        let above = Line3D::new(Point3D::new(-2.0, 2.0, 0.0), Vector3::new(4.0, 0.0, 0.0));
        assert!(through.intersects_capsule(&capsule));
        assert!(!above.intersects_capsule(&capsule));
    }

    #[test]
    fn test_capsule_aabb_boundary() {
        let aabb = unit_box();
        let radius = 0.25;
        let touching = upright_capsule(Point3D::new(0.0, 1.0 + radius, 0.0), radius);
        let normal = collide_capsule_aabb(&touching, &aabb).unwrap();
        assert_relative_eq!(normal, Vector3::UP, epsilon = EPSILON);

        let apart = upright_capsule(Point3D::new(0.0, 1.0 + radius + 1e-3, 0.0), radius);
        assert!(collide_capsule_aabb(&apart, &aabb).is_none());
    }

    #[test]
    fn test_capsule_inside_aabb_defaults_to_up() {
        let inside = upright_capsule(Point3D::new(0.0, -0.5, 0.0), 0.2);
        assert_eq!(collide_capsule_aabb(&inside, &unit_box()), Some(Vector3::UP));
    }

    #[test]
    fn test_aabb_aabb_uses_least_overlap_axis() {
        let floor = Aabb::new(Point3D::new(-5.0, -1.0, -5.0), Point3D::new(5.0, 0.0, 5.0));
        let crate_box = Aabb::new(Point3D::new(0.0, -0.1, 0.0), Point3D::new(1.0, 0.9, 1.0));
        assert_eq!(collide_aabb_aabb(&crate_box, &floor), Some(Vector3::UP));
        assert_eq!(collide_aabb_aabb(&floor, &crate_box), Some(Vector3::DOWN));

        let far = Aabb::new(Point3D::splat(10.0), Point3D::splat(11.0));
        assert!(collide_aabb_aabb(&far, &floor).is_none());
    }

    #[test]
    fn test_sphere_pairs() {
        let sphere = Sphere::new(Point3D::new(3.0, 0.0, 0.0), 2.0);
        assert_relative_eq!(collide_sphere_aabb(&sphere, &unit_box()).unwrap(), Vector3::RIGHT);
        let apart = Sphere::new(Point3D::new(3.5, 0.0, 0.0), 2.0);
        assert!(collide_sphere_aabb(&apart, &unit_box()).is_none());

        let other = Sphere::new(Point3D::ZERO, 1.0);
        assert_relative_eq!(collide_sphere_sphere(&sphere, &other).unwrap(), Vector3::RIGHT);
        assert_relative_eq!(collide_sphere_sphere(&other, &sphere).unwrap(), Vector3::LEFT);

        let capsule = Capsule::new(Point3D::new(0.0, -5.0, 0.0), Point3D::new(0.0, 5.0, 0.0), 1.0);
        assert_relative_eq!(collide_sphere_capsule(&sphere, &capsule).unwrap(), Vector3::RIGHT);
        let apart = Sphere::new(Point3D::new(3.1, 0.0, 0.0), 2.0);
        assert!(collide_sphere_capsule(&apart, &capsule).is_none());
    }

    #[test]
    fn test_capsule_capsule_crossing_segments() {
        let horizontal =
            Capsule::new(Point3D::new(-2.0, 1.0, 0.0), Point3D::new(2.0, 1.0, 0.0), 0.5);
        let vertical = Capsule::new(Point3D::new(0.0, -2.0, 0.0), Point3D::new(0.0, 0.2, 0.0), 0.5);
        assert_relative_eq!(
            collide_capsule_capsule(&horizontal, &vertical).unwrap(),
            Vector3::UP,
            epsilon = EPSILON
        );

        let lowered = Capsule::new(Point3D::new(0.0, -2.0, 0.0), Point3D::new(0.0, -0.1, 0.0), 0.5);
        assert!(collide_capsule_capsule(&horizontal, &lowered).is_none());
    }

    #[test]
    fn test_closest_points_between_parallel_segments() {
        let (a, b) = closest_points_between_segments(
            Point3D::ZERO,
            Point3D::new(2.0, 0.0, 0.0),
            Point3D::new(0.0, 1.0, 0.0),
            Point3D::new(2.0, 1.0, 0.0),
        );
        assert_relative_eq!(a.distance_from(&b), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_plane_and_obb() {
        let plane = Plane3D::new(Point3D::new(0.0, 2.0, 0.0), Vector3::new(0.0, 5.0, 0.0));
        assert!(plane.normal().is_unit());
        assert_relative_eq!(plane.distance_to(&Point3D::new(3.0, 5.0, 1.0)), 3.0);
        assert_relative_eq!(plane.distance_to(&Point3D::ZERO), -2.0);

        let mut obb = Obb::new(Point3D::ZERO, Vector3::new(1.0, 0.0, 0.0));
        obb.rotate(Degree::new(0.0), Degree::new(0.0), Degree::new(90.0));
        assert_relative_eq!(obb.half_size.magnitude(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_line_length_and_points() {
        let line = Line3D::new(Point3D::ONE, Vector3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(line.length(), 5.0);
        assert_eq!(line.point_at(0.5), Point3D::new(1.0, 2.5, 3.0));
    }

    #[test]
    fn test_bounds_from_points() {
        let points = [Point3D::new(1.0, -2.0, 0.5), Point3D::new(-1.0, 4.0, 0.0)];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.min, Point3D::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3D::new(1.0, 4.0, 0.5));
        assert!(Aabb::from_points(std::iter::empty::<&Point3D>()).is_none());
    }
}
