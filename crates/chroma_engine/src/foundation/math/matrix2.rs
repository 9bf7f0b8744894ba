//! 2x2 column-major matrix.

use std::ops::{Add, Index, IndexMut, Mul, Sub};

use super::{almost_equal, cos, sin, MathError, Radian, Vector2, EPSILON};

/// A 2x2 matrix stored as `data[column][row]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    data: [[f32; 2]; 2],
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix2 {
    /// All zeros.
    pub const ZERO: Self = Self { data: [[0.0; 2]; 2] };

    /// Builds a matrix column by column: `m00, m01` is the first column.
    #[must_use]
    pub const fn new(m00: f32, m01: f32, m10: f32, m11: f32) -> Self {
        Self { data: [[m00, m01], [m10, m11]] }
    }

    /// Builds a matrix from `[column][row]` data.
    #[must_use]
    pub const fn from_columns(data: [[f32; 2]; 2]) -> Self {
        Self { data }
    }

    /// A matrix with `value` on the diagonal.
    #[must_use]
    pub const fn from_diagonal(value: f32) -> Self {
        Self::new(value, 0.0, 0.0, value)
    }

    /// The identity matrix.
    #[must_use]
    pub const fn identity() -> Self {
        Self::from_diagonal(1.0)
    }

    /// Swaps rows and columns.
    #[must_use]
    pub const fn transpose(&self) -> Self {
        let d = &self.data;
        Self::new(d[0][0], d[1][0], d[0][1], d[1][1])
    }

    /// Determinant.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let d = &self.data;
        d[0][0] * d[1][1] - d[0][1] * d[1][0]
    }

    /// Matrix of minors.
    #[must_use]
    pub const fn minors(&self) -> Self {
        let d = &self.data;
        Self::new(d[1][1], d[1][0], d[0][1], d[0][0])
    }

    /// Minors with the checkerboard sign applied.
    #[must_use]
    pub const fn cofactors(&self) -> Self {
        let m = self.minors().data;
        Self::new(m[0][0], -m[0][1], -m[1][0], m[1][1])
    }

    /// Transposed cofactors.
    #[must_use]
    pub const fn adjugate(&self) -> Self {
        self.cofactors().transpose()
    }

    /// Inverse, or [`MathError::SingularMatrix`] when `|det| < 1e-6`.
    pub fn inverse(&self) -> Result<Self, MathError> {
        let determinant = self.determinant();
        if almost_equal(determinant, 0.0) {
            return Err(MathError::SingularMatrix { determinant });
        }
        Ok(self.adjugate() * (1.0 / determinant))
    }

    /// Counter-clockwise rotation.
    #[must_use]
    pub fn create_rotation(angle: impl Into<Radian>) -> Self {
        let angle = angle.into();
        let (c, s) = (cos(angle), sin(angle));
        Self::new(c, s, -s, c)
    }

    /// Axis scale.
    #[must_use]
    pub const fn create_scale(scale: Vector2) -> Self {
        Self::new(scale.x, 0.0, 0.0, scale.y)
    }

    /// Rotation applied after scale, `R * S`.
    #[must_use]
    pub fn create_transform(rotation: impl Into<Radian>, scale: Vector2) -> Self {
        let rotation = rotation.into();
        let (c, s) = (cos(rotation), sin(rotation));
        Self::new(c * scale.x, s * scale.x, -s * scale.y, c * scale.y)
    }
}

impl Index<usize> for Matrix2 {
    type Output = [f32; 2];

    fn index(&self, column: usize) -> &[f32; 2] {
        &self.data[column]
    }
}

impl IndexMut<usize> for Matrix2 {
    fn index_mut(&mut self, column: usize) -> &mut [f32; 2] {
        &mut self.data[column]
    }
}

impl Add for Matrix2 {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        for (column, other) in self.data.iter_mut().zip(rhs.data) {
            for (value, other) in column.iter_mut().zip(other) {
                *value += other;
            }
        }
        self
    }
}

impl Sub for Matrix2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs * -1.0
    }
}

impl Mul<f32> for Matrix2 {
    type Output = Self;

    fn mul(mut self, rhs: f32) -> Self {
        self.data.iter_mut().flatten().for_each(|value| *value *= rhs);
        self
    }
}

impl Mul for Matrix2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (l, r) = (&self.data, &rhs.data);
        Self::new(
            l[0][0] * r[0][0] + l[1][0] * r[0][1],
            l[0][1] * r[0][0] + l[1][1] * r[0][1],
            l[0][0] * r[1][0] + l[1][0] * r[1][1],
            l[0][1] * r[1][0] + l[1][1] * r[1][1],
        )
    }
}

impl Mul<Vector2> for Matrix2 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        let d = &self.data;
        Vector2::new(
            d[0][0] * rhs.x + d[1][0] * rhs.y,
            d[0][1] * rhs.x + d[1][1] * rhs.y,
        )
    }
}

impl approx::AbsDiffEq for Matrix2 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl approx::RelativeEq for Matrix2 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data
            .iter()
            .flatten()
            .zip(other.data.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
