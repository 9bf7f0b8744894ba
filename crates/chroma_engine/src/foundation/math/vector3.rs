//! Three component vector, the workhorse of the physics code.

use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{acos, almost_equal, clamp, cos, sin, square_root, MathError, Matrix3, Radian, EPSILON};

/// A 3D vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

/// Failure to parse a `{x,y,z}` string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid vector literal '{0}', expected {{x,y,z}}")]
pub struct ParseVectorError(pub String);

impl Vector3 {
    /// `(0, 0, 0)`
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// `(1, 1, 1)`
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// World up, `(0, 1, 0)`
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// `(0, -1, 0)`
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    /// `(-1, 0, 0)`
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    /// `(1, 0, 0)`
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    /// `(0, 0, 1)`
    pub const FRONT: Self = Self::new(0.0, 0.0, 1.0);
    /// `(0, 0, -1)`
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with every component set to `value`.
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Fallible component access; index 0, 1, 2 map to x, y, z.
    pub fn component(&self, index: usize) -> Result<f32, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::IndexOutOfRange { kind: "Vector3", index, size: 3 }),
        }
    }

    /// Fallible mutable component access.
    pub fn component_mut(&mut self, index: usize) -> Result<&mut f32, MathError> {
        match index {
            0 => Ok(&mut self.x),
            1 => Ok(&mut self.y),
            2 => Ok(&mut self.z),
            _ => Err(MathError::IndexOutOfRange { kind: "Vector3", index, size: 3 }),
        }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
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

    /// Scales to unit length in place. A zero vector becomes (stays) zero.
    pub fn normalize(&mut self) {
        let magnitude = self.magnitude();
        if magnitude > 0.0 {
            self.x /= magnitude;
            self.y /= magnitude;
            self.z /= magnitude;
        } else {
            *self = Self::ZERO;
        }
    }

    /// Returns a normalized copy; see [`Vector3::normalize`].
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Whether the length is within epsilon of one.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        almost_equal(self.magnitude(), 1.0)
    }

    /// Unsigned angle between the two vectors; zero when either is zero.
    #[must_use]
    pub fn angle_from(&self, other: &Self) -> Radian {
        let lengths = self.magnitude() * other.magnitude();
        if lengths <= 0.0 {
            return Radian::new(0.0);
        }
        // rounding can push the cosine of parallel vectors past one
        acos(clamp(self.dot(other) / lengths, -1.0, 1.0))
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance_from(&self, other: &Self) -> f32 {
        square_root(self.distance_squared_from(other))
    }

    /// Squared distance between two points.
    #[must_use]
    pub fn distance_squared_from(&self, other: &Self) -> f32 {
        (*self - *other).magnitude_squared()
    }

    /// Distance ignoring the z component.
    #[must_use]
    pub fn distance_2d_from(&self, other: &Self) -> f32 {
        square_root(self.distance_2d_squared_from(other))
    }

    /// Squared distance ignoring the z component.
    #[must_use]
    pub fn distance_2d_squared_from(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Whether this vector is strictly longer than `other`.
    #[must_use]
    pub fn is_longer_than(&self, other: &Self) -> bool {
        self.magnitude_squared() > other.magnitude_squared()
    }

    /// Whether this vector is strictly shorter than `other`.
    #[must_use]
    pub fn is_shorter_than(&self, other: &Self) -> bool {
        self.magnitude_squared() < other.magnitude_squared()
    }

    /// Replaces this vector with its projection onto `other`.
    ///
    /// Projecting onto a zero vector yields zero.
    pub fn project_onto(&mut self, other: &Self) {
        let other_squared = other.magnitude_squared();
        *self = if other_squared > 0.0 {
            *other * (self.dot(other) / other_squared)
        } else {
            Self::ZERO
        };
    }

    /// Returns the projection of this vector onto `other`.
    #[must_use]
    pub fn projected_onto(mut self, other: &Self) -> Self {
        self.project_onto(other);
        self
    }

    /// Replaces this vector with `self - 2 * proj_other(self)`.
    pub fn reflect_onto(&mut self, other: &Self) {
        let projection = self.projected_onto(other);
        *self -= projection * 2.0;
    }

    /// Rotates by Euler angles: `angle_x` is pitch, `angle_y` roll, `angle_z` yaw.
    pub fn rotate_euler(
        &mut self,
        angle_x: impl Into<Radian>,
        angle_y: impl Into<Radian>,
        angle_z: impl Into<Radian>,
    ) {
        let (angle_x, angle_y, angle_z) = (angle_x.into(), angle_y.into(), angle_z.into());
        let (cos_yaw, sin_yaw) = (cos(angle_z), sin(angle_z));
        let (cos_pitch, sin_pitch) = (cos(angle_x), sin(angle_x));
        let (cos_roll, sin_roll) = (cos(angle_y), sin(angle_y));

        let rotation = Matrix3::from_columns([
            [
                cos_yaw * cos_roll - sin_yaw * sin_pitch * sin_roll,
                cos_pitch * sin_roll,
                -sin_yaw * cos_roll + cos_yaw * sin_pitch * sin_roll,
            ],
            [
                -cos_yaw * sin_roll + sin_yaw * sin_pitch * cos_roll,
                cos_pitch * cos_roll,
                -sin_yaw * sin_roll + cos_yaw * sin_pitch * cos_roll,
            ],
            [sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch],
        ]);

        *self = rotation * *self;
    }

    /// Rotates by `angle` around `axis` (Rodrigues' formula). The axis need not be unit length.
    pub fn rotate_axis(&mut self, angle: impl Into<Radian>, axis: &Self) {
        let angle = angle.into();
        let Self { x, y, z } = axis.normalized();
        let cos_theta = cos(angle);
        let sin_theta = sin(angle);
        let one_minus_cos = 1.0 - cos_theta;

        let r11 = cos_theta + x * x * one_minus_cos;
        let r12 = x * y * one_minus_cos - z * sin_theta;
        let r13 = x * z * one_minus_cos + y * sin_theta;

        let r21 = y * x * one_minus_cos + z * sin_theta;
        let r22 = cos_theta + y * y * one_minus_cos;
        let r23 = y * z * one_minus_cos - x * sin_theta;

        let r31 = z * x * one_minus_cos - y * sin_theta;
        let r32 = z * y * one_minus_cos + x * sin_theta;
        let r33 = cos_theta + z * z * one_minus_cos;

        *self = Self::new(
            self.x * r11 + self.y * r12 + self.z * r13,
            self.x * r21 + self.y * r22 + self.z * r23,
            self.x * r31 + self.y * r32 + self.z * r33,
        );
    }

    /// Componentwise scale in place.
    pub fn scale(&mut self, factors: &Self) {
        self.x *= factors.x;
        self.y *= factors.y;
        self.z *= factors.z;
    }

    /// Offsets this point in place.
    pub fn translate(&mut self, translation: &Self) {
        *self += *translation;
    }

    /// Componentwise minimum.
    #[must_use]
    pub fn min(&self, other: &Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Componentwise maximum.
    #[must_use]
    pub fn max(&self, other: &Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Components as an array.
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Index<usize> for Vector3 {
    type Output = f32;

    /// # Panics
    /// Panics when `index > 2`; use [`Vector3::component`] for a fallible read.
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index {index} out of range for Vector3"),
        }
    }
}

impl IndexMut<usize> for Vector3 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index {index} out of range for Vector3"),
        }
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul for Vector3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div for Vector3 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        rhs * self
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{},{}}}", self.x, self.y, self.z)
    }
}

impl FromStr for Vector3 {
    type Err = ParseVectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseVectorError(s.to_string());
        let inner = s
            .trim()
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(invalid)?;

        let mut parts = inner.split(',').map(|part| part.trim().parse::<f32>());
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Ok(Self::new(x, y, z)),
            _ => Err(invalid()),
        }
    }
}

impl approx::AbsDiffEq for Vector3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl approx::RelativeEq for Vector3 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
