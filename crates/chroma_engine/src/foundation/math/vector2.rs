//! Two component vector used by the 2D geometry routines.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::{acos, almost_equal, clamp, square_root, MathError, Radian, EPSILON};

/// A 2D vector or point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vector2 {
    /// `(0, 0)`
    pub const ZERO: Self = Self::new(0.0, 0.0);
    /// `(1, 1)`
    pub const ONE: Self = Self::new(1.0, 1.0);
    /// `(0, 1)`
    pub const UP: Self = Self::new(0.0, 1.0);
    /// `(1, 0)`
    pub const RIGHT: Self = Self::new(1.0, 0.0);

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Fallible component access.
    pub fn component(&self, index: usize) -> Result<f32, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(MathError::IndexOutOfRange { kind: "Vector2", index, size: 2 }),
        }
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of the two vectors.
    #[must_use]
    pub fn cross(&self, other: &Self) -> f32 {
        self.x * other.y - self.y * other.x
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
        } else {
            *self = Self::ZERO;
        }
    }

    /// Returns a normalized copy.
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
    pub fn angle_between(&self, other: &Self) -> Radian {
        let lengths = self.magnitude() * other.magnitude();
        if lengths <= 0.0 {
            return Radian::new(0.0);
        }
        // rounding can push the cosine of parallel vectors past one
        acos(clamp(self.dot(other) / lengths, -1.0, 1.0))
    }

    /// Replaces this vector with its projection onto `other`; zero when `other` is zero.
    pub fn project_onto(&mut self, other: &Self) {
        let other_squared = other.magnitude_squared();
        *self = if other_squared > 0.0 {
            *other * (self.dot(other) / other_squared)
        } else {
            Self::ZERO
        };
    }

    /// Replaces this vector with `self - 2 * proj_other(self)`.
    pub fn reflect_onto(&mut self, other: &Self) {
        let mut projection = *self;
        projection.project_onto(other);
        *self -= projection * 2.0;
    }

    /// Counter-clockwise perpendicular, `(-y, x)`.
    #[must_use]
    pub const fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl Index<usize> for Vector2 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Index {index} out of range for Vector2"),
        }
    }
}

impl IndexMut<usize> for Vector2 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => panic!("Index {index} out of range for Vector2"),
        }
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.x, self.y)
    }
}

impl approx::AbsDiffEq for Vector2 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl approx::RelativeEq for Vector2 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}
