//! Homogeneous four component vector.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use super::{almost_equal, square_root, MathError, Vector3, EPSILON};

/// A homogeneous vector, mostly produced by [`super::Matrix4`] products.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Vector4 {
    /// `(0, 0, 0, 0)`
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Extends a point with `w = 1`.
    #[must_use]
    pub const fn from_point(point: Vector3) -> Self {
        Self::new(point.x, point.y, point.z, 1.0)
    }

    /// Extends a direction with `w = 0`.
    #[must_use]
    pub const fn from_direction(direction: Vector3) -> Self {
        Self::new(direction.x, direction.y, direction.z, 0.0)
    }

    /// Fallible component access.
    pub fn component(&self, index: usize) -> Result<f32, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(MathError::IndexOutOfRange { kind: "Vector4", index, size: 4 }),
        }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Euclidean length.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        square_root(self.magnitude_squared())
    }

    /// Squared length.
    #[must_use]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Perspective divide; fails when `w` is within epsilon of zero.
    pub fn homogenize(&self) -> Result<Vector3, MathError> {
        if almost_equal(self.w, 0.0) {
            return Err(MathError::HomogenizeZeroW);
        }
        Ok(Vector3::new(self.x / self.w, self.y / self.w, self.z / self.w))
    }

    /// Drops `w` without dividing.
    #[must_use]
    pub const fn xyz(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Index<usize> for Vector4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Index {index} out of range for Vector4"),
        }
    }
}

impl IndexMut<usize> for Vector4 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Index {index} out of range for Vector4"),
        }
    }
}

impl Neg for Vector4 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Add for Vector4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Vector4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<f32> for Vector4 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{},{},{}}}", self.x, self.y, self.z, self.w)
    }
}

impl approx::AbsDiffEq for Vector4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl approx::RelativeEq for Vector4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_homogenize_divides_by_w() {
        let v = Vector4::new(2.0, 4.0, -6.0, 2.0);
        assert_relative_eq!(v.homogenize().unwrap(), Vector3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_homogenize_zero_w_is_error() {
        let v = Vector4::new(1.0, 1.0, 1.0, 0.0);
        assert_eq!(v.homogenize(), Err(MathError::HomogenizeZeroW));
    }

    #[test]
    fn test_dot_and_magnitude() {
        let v = Vector4::new(1.0, 2.0, 2.0, 4.0);
        assert_relative_eq!(v.magnitude(), 5.0);
        assert_relative_eq!(v.dot(&Vector4::new(1.0, 0.0, 0.0, 1.0)), 5.0);
    }

    #[test]
    fn test_index_out_of_range_is_error() {
        assert!(matches!(
            Vector4::ZERO.component(4),
            Err(MathError::IndexOutOfRange { size: 4, .. })
        ));
    }
}
