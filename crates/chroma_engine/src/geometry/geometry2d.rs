//! 2D shapes and boolean overlap tests, mostly separating axis based.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{clamp, cos, sin, Radian, Vector2, PI};

/// A position in the plane.
pub type Point2D = Vector2;

/// Segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Line2D {
    /// Start point
    pub start: Point2D,
    /// End point
    pub end: Point2D,
}

impl Line2D {
    /// Creates a segment.
    #[must_use]
    pub const fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.edge().magnitude()
    }

    /// Squared segment length.
    #[must_use]
    pub fn length_squared(&self) -> f32 {
        self.edge().magnitude_squared()
    }

    /// `end - start`
    #[must_use]
    pub fn edge(&self) -> Vector2 {
        edge_vector(&self.start, &self.end)
    }

    /// Clamped projection of `point` onto the segment.
    #[must_use]
    pub fn closest_point(&self, point: &Point2D) -> Point2D {
        let edge = self.edge();
        let length_squared = edge.magnitude_squared();
        if length_squared == 0.0 {
            return self.start;
        }
        let t = clamp((*point - self.start).dot(&edge) / length_squared, 0.0, 1.0);
        self.start + edge * t
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RectangleAabb {
    /// Minimum corner
    pub min: Point2D,
    /// Maximum corner
    pub max: Point2D,
}

impl RectangleAabb {
    /// Creates a rectangle from its corners.
    #[must_use]
    pub const fn new(min: Point2D, max: Point2D) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle from a center and half extents.
    #[must_use]
    pub fn from_center(center: Point2D, half_extents: Vector2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Midpoint.
    #[must_use]
    pub fn center(&self) -> Point2D {
        (self.min + self.max) * 0.5
    }

    /// Half width.
    #[must_use]
    pub fn extent_x(&self) -> f32 {
        (self.max.x - self.min.x) / 2.0
    }

    /// Half height.
    #[must_use]
    pub fn extent_y(&self) -> f32 {
        (self.max.y - self.min.y) / 2.0
    }

    /// Corners, counter-clockwise from `min`.
    #[must_use]
    pub const fn corners(&self) -> [Point2D; 4] {
        [
            self.min,
            Point2D::new(self.max.x, self.min.y),
            self.max,
            Point2D::new(self.min.x, self.max.y),
        ]
    }
}

/// Rectangle rotated about its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleObb {
    /// Center
    pub center: Point2D,
    /// Full width along the local x axis
    pub width: f32,
    /// Full height along the local y axis
    pub height: f32,
    /// Counter-clockwise rotation
    pub rotation: Radian,
}

impl RectangleObb {
    /// Creates a rotated rectangle.
    #[must_use]
    pub fn new(center: Point2D, width: f32, height: f32, rotation: impl Into<Radian>) -> Self {
        Self { center, width, height, rotation: rotation.into() }
    }

    /// Adds `delta` to the rotation.
    pub fn rotate(&mut self, delta: impl Into<Radian>) {
        self.rotation += delta.into();
    }

    /// Unit local x and y axes.
    #[must_use]
    pub fn axes(&self) -> [Vector2; 2] {
        let (c, s) = (cos(self.rotation), sin(self.rotation));
        [Vector2::new(c, s), Vector2::new(-s, c)]
    }

    /// World-space corners.
    #[must_use]
    pub fn corners(&self) -> [Point2D; 4] {
        let [axis_x, axis_y] = self.axes();
        let half_x = axis_x * (self.width / 2.0);
        let half_y = axis_y * (self.height / 2.0);
        [
            self.center + half_x + half_y,
            self.center - half_x + half_y,
            self.center - half_x - half_y,
            self.center + half_x - half_y,
        ]
    }
}

/// Circle with a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    /// Center
    pub center: Point2D,
    /// Radius
    pub radius: f32,
}

impl Circle {
    /// Creates a circle.
    #[must_use]
    pub const fn new(center: Point2D, radius: f32) -> Self {
        Self { center, radius }
    }

    /// `pi * r^2`
    #[must_use]
    pub fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    /// `2 * pi * r`
    #[must_use]
    pub fn circumference(&self) -> f32 {
        2.0 * PI * self.radius
    }
}

/// Closed range of a shape's projection onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Smallest projection
    pub min: f32,
    /// Largest projection
    pub max: f32,
}

impl Interval {
    /// Tightest interval around the projections of `points` on `axis`.
    /// An empty slice yields an inverted interval that overlaps nothing.
    #[must_use]
    pub fn of_points(points: &[Point2D], axis: &Vector2) -> Self {
        points.iter().map(|point| axis.dot(point)).fold(
            Self { min: f32::INFINITY, max: f32::NEG_INFINITY },
            |interval, projection| Self {
                min: interval.min.min(projection),
                max: interval.max.max(projection),
            },
        )
    }

    /// Whether the two closed intervals share a point.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.max < other.min || other.max < self.min)
    }
}

/// Shapes that can be projected onto a separating axis candidate.
pub trait AxisProjection {
    /// Projection interval of the shape on `axis`.
    fn project_onto_axis(&self, axis: &Vector2) -> Interval;
}

impl AxisProjection for Line2D {
    fn project_onto_axis(&self, axis: &Vector2) -> Interval {
        Interval::of_points(&[self.start, self.end], axis)
    }
}

impl AxisProjection for RectangleAabb {
    fn project_onto_axis(&self, axis: &Vector2) -> Interval {
        Interval::of_points(&self.corners(), axis)
    }
}

impl AxisProjection for RectangleObb {
    fn project_onto_axis(&self, axis: &Vector2) -> Interval {
        Interval::of_points(&self.corners(), axis)
    }
}

/// `to - from`
#[must_use]
pub fn edge_vector(from: &Point2D, to: &Point2D) -> Vector2 {
    *to - *from
}

fn separated_on_any<A, B>(first: &A, second: &B, axes: &[Vector2]) -> bool
where
    A: AxisProjection,
    B: AxisProjection,
{
    axes.iter()
        .any(|axis| !first.project_onto_axis(axis).overlaps(&second.project_onto_axis(axis)))
}

/// Exact test: the point lies on the segment.
#[must_use]
pub fn point_on_line(point: &Point2D, line: &Line2D) -> bool {
    (*point - line.closest_point(point)).magnitude_squared() == 0.0
}

/// Point inside or on the circle.
#[must_use]
pub fn point_in_circle(point: &Point2D, circle: &Circle) -> bool {
    (*point - circle.center).magnitude_squared() <= circle.radius * circle.radius
}

/// Point inside or on the rectangle.
#[must_use]
pub fn point_in_rectangle(point: &Point2D, rectangle: &RectangleAabb) -> bool {
    point.x >= rectangle.min.x
        && point.x <= rectangle.max.x
        && point.y >= rectangle.min.y
        && point.y <= rectangle.max.y
}

/// Segment touches the circle.
#[must_use]
pub fn line_circle(line: &Line2D, circle: &Circle) -> bool {
    point_in_circle(&line.closest_point(&circle.center), circle)
}

/// Segment touches the rectangle, tested on the segment normal and both world axes.
#[must_use]
pub fn line_rectangle(line: &Line2D, rectangle: &RectangleAabb) -> bool {
    let normal = line.edge().perpendicular().normalized();
    !separated_on_any(line, rectangle, &[normal, Vector2::RIGHT, Vector2::UP])
}

/// Segments cross or, when collinear, overlap.
#[must_use]
pub fn line_line(first: &Line2D, second: &Line2D) -> bool {
    let r = first.edge();
    let s = second.edge();
    let offset = second.start - first.start;
    let r_cross_s = r.cross(&s);
    let t_numerator = offset.cross(&s);

    if r_cross_s == 0.0 {
        if t_numerator != 0.0 {
            return false;
        }
        let length_squared = r.magnitude_squared();
        if length_squared == 0.0 {
            return point_on_line(&first.start, second);
        }
        let t0 = offset.dot(&r) / length_squared;
        let t1 = (second.end - first.start).dot(&r) / length_squared;
        let (t0, t1) = if t0 > t1 { (t1, t0) } else { (t0, t1) };
        return t0 <= 1.0 && t1 >= 0.0;
    }

    let t = t_numerator / r_cross_s;
    let u = offset.cross(&r) / r_cross_s;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Axis-aligned rectangles overlap, touching edges included.
#[must_use]
pub fn rectangle_rectangle(first: &RectangleAabb, second: &RectangleAabb) -> bool {
    !(first.max.x < second.min.x
        || first.min.x > second.max.x
        || first.max.y < second.min.y
        || first.min.y > second.max.y)
}

/// Circles overlap, tangency included.
#[must_use]
pub fn circle_circle(first: &Circle, second: &Circle) -> bool {
    let reach = first.radius + second.radius;
    (first.center - second.center).magnitude_squared() <= reach * reach
}

/// Rotated rectangles overlap, tested on both rectangles' local axes.
#[must_use]
pub fn obb_obb(first: &RectangleObb, second: &RectangleObb) -> bool {
    let [a, b] = first.axes();
    let [c, d] = second.axes();
    !separated_on_any(first, second, &[a, b, c, d])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Degree;
    use approx::assert_relative_eq;

    fn rect(min: (f32, f32), max: (f32, f32)) -> RectangleAabb {
        RectangleAabb::new(Point2D::new(min.0, min.1), Point2D::new(max.0, max.1))
    }

    fn segment(a: (f32, f32), b: (f32, f32)) -> Line2D {
        Line2D::new(Point2D::new(a.0, a.1), Point2D::new(b.0, b.1))
    }

    #[test]
    fn test_shape_measurements() {
        assert_relative_eq!(segment((0.0, 0.0), (3.0, 4.0)).length(), 5.0);
        assert_relative_eq!(segment((0.0, 0.0), (3.0, 4.0)).length_squared(), 25.0);

        let circle = Circle::new(Point2D::ZERO, 2.0);
        assert_relative_eq!(circle.area(), 4.0 * PI);
        assert_relative_eq!(circle.circumference(), 4.0 * PI);

        let r = rect((-1.0, 0.0), (3.0, 2.0));
        assert_eq!(r.center(), Point2D::new(1.0, 1.0));
        assert_relative_eq!(r.extent_x(), 2.0);
        assert_relative_eq!(r.extent_y(), 1.0);
    }

    #[test]
    fn test_point_tests() {
        let line = segment((0.0, 0.0), (2.0, 2.0));
        assert!(point_on_line(&Point2D::new(1.0, 1.0), &line));
        assert!(!point_on_line(&Point2D::new(1.0, 1.5), &line));
        assert!(!point_on_line(&Point2D::new(3.0, 3.0), &line));

        assert!(point_in_circle(&Point2D::new(0.0, 2.0), &Circle::new(Point2D::ZERO, 2.0)));
        assert!(point_in_rectangle(&Point2D::new(3.0, 2.0), &rect((-1.0, 0.0), (3.0, 2.0))));
        assert!(!point_in_rectangle(&Point2D::new(3.1, 2.0), &rect((-1.0, 0.0), (3.0, 2.0))));
    }

    #[test]
    fn test_line_circle() {
        let circle = Circle::new(Point2D::new(0.0, 1.0), 1.0);
        assert!(line_circle(&segment((-2.0, 0.0), (2.0, 0.0)), &circle));
        assert!(!line_circle(&segment((-2.0, -0.5), (2.0, -0.5)), &circle));
        assert!(!line_circle(&segment((2.0, 1.0), (4.0, 1.0)), &circle));
    }

    #[test]
    fn test_line_rectangle() {
        let r = rect((0.0, 0.0), (2.0, 2.0));
        assert!(line_rectangle(&segment((-1.0, 1.0), (3.0, 1.0)), &r));
        assert!(line_rectangle(&segment((1.0, 1.0), (1.5, 1.5)), &r));
        assert!(!line_rectangle(&segment((-1.0, 2.5), (1.0, 4.5)), &r));
        assert!(!line_rectangle(&segment((3.0, 0.0), (3.0, 2.0)), &r));
    }

    #[test]
    fn test_line_line() {
        assert!(line_line(&segment((0.0, 0.0), (2.0, 2.0)), &segment((0.0, 2.0), (2.0, 0.0))));
        assert!(!line_line(&segment((0.0, 0.0), (1.0, 1.0)), &segment((0.0, 2.0), (0.9, 1.1))));
        assert!(!line_line(&segment((0.0, 0.0), (2.0, 0.0)), &segment((0.0, 1.0), (2.0, 1.0))));
        assert!(line_line(&segment((0.0, 0.0), (2.0, 0.0)), &segment((1.0, 0.0), (3.0, 0.0))));
        assert!(!line_line(&segment((0.0, 0.0), (2.0, 0.0)), &segment((3.0, 0.0), (4.0, 0.0))));
    }

    #[test]
    fn test_rectangles_and_circles() {
        let r = rect((0.0, 0.0), (2.0, 2.0));
        assert!(rectangle_rectangle(&r, &rect((2.0, 2.0), (3.0, 3.0))));
        assert!(!rectangle_rectangle(&r, &rect((2.1, 0.0), (3.0, 1.0))));

        let a = Circle::new(Point2D::ZERO, 1.0);
        assert!(circle_circle(&a, &Circle::new(Point2D::new(3.0, 0.0), 2.0)));
        assert!(!circle_circle(&a, &Circle::new(Point2D::new(3.1, 0.0), 2.0)));
    }

    #[test]
    fn test_obb_separation_needs_rotated_axes() {
        let diamond = RectangleObb::new(Point2D::ZERO, 2.0, 2.0, Degree::new(45.0));
        // the bounding boxes overlap, the diamond's edge separates them
        let corner = RectangleObb::new(Point2D::new(1.9, 1.9), 2.0, 2.0, Degree::new(0.0));
        assert!(!obb_obb(&diamond, &corner));

        let closer = RectangleObb::new(Point2D::new(1.2, 1.2), 2.0, 2.0, Degree::new(0.0));
        assert!(obb_obb(&diamond, &closer));
    }

    #[test]
    fn test_obb_rotation_moves_corners() {
        let mut obb = RectangleObb::new(Point2D::ZERO, 4.0, 2.0, Degree::new(0.0));
        assert_relative_eq!(obb.corners()[0], Point2D::new(2.0, 1.0));
        obb.rotate(Degree::new(90.0));
        assert_relative_eq!(obb.corners()[0], Point2D::new(-1.0, 2.0), epsilon = 1e-5);
    }
}
