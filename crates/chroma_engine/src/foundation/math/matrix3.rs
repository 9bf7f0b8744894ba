//! 3x3 column-major matrix: 3D rotations/scales and 2D affine transforms.

use std::ops::{Add, Index, IndexMut, Mul, Sub};

use super::{almost_equal, cos, sin, MathError, Radian, Vector2, Vector3, EPSILON};

/// A 3x3 matrix stored as `data[column][row]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    data: [[f32; 3]; 3],
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix3 {
    /// All zeros.
    pub const ZERO: Self = Self { data: [[0.0; 3]; 3] };

    /// Builds a matrix from `[column][row]` data.
    #[must_use]
    pub const fn from_columns(data: [[f32; 3]; 3]) -> Self {
        Self { data }
    }

    /// A matrix with `value` on the diagonal.
    #[must_use]
    pub const fn from_diagonal(value: f32) -> Self {
        Self::from_columns([[value, 0.0, 0.0], [0.0, value, 0.0], [0.0, 0.0, value]])
    }

    /// The identity matrix.
    #[must_use]
    pub const fn identity() -> Self {
        Self::from_diagonal(1.0)
    }

    /// Swaps rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;
        for column in 0..3 {
            for row in 0..3 {
                result.data[row][column] = self.data[column][row];
            }
        }
        result
    }

    /// Determinant by expansion along the first column.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        let d = &self.data;
        d[0][0] * (d[1][1] * d[2][2] - d[1][2] * d[2][1])
            - d[0][1] * (d[1][0] * d[2][2] - d[1][2] * d[2][0])
            + d[0][2] * (d[1][0] * d[2][1] - d[1][1] * d[2][0])
    }

    /// The 2x2 matrix left after removing `column` and `row`.
    #[must_use]
    pub fn submatrix(&self, column: usize, row: usize) -> [[f32; 2]; 2] {
        let mut result = [[0.0; 2]; 2];
        for (target_column, source_column) in (0..3).filter(|&c| c != column).enumerate() {
            for (target_row, source_row) in (0..3).filter(|&r| r != row).enumerate() {
                result[target_column][target_row] = self.data[source_column][source_row];
            }
        }
        result
    }

    /// Matrix of minors.
    #[must_use]
    pub fn minors(&self) -> Self {
        let mut result = Self::ZERO;
        for column in 0..3 {
            for row in 0..3 {
                let [[a, b], [c, d]] = self.submatrix(column, row);
                result.data[column][row] = a * d - b * c;
            }
        }
        result
    }

    /// Minors with the checkerboard sign applied.
    #[must_use]
    pub fn cofactors(&self) -> Self {
        let mut result = self.minors();
        for column in 0..3 {
            for row in 0..3 {
                if (column + row) % 2 == 1 {
                    result.data[column][row] = -result.data[column][row];
                }
            }
        }
        result
    }

    /// Transposed cofactors.
    #[must_use]
    pub fn adjugate(&self) -> Self {
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

    /// 2D translation in homogeneous coordinates.
    #[must_use]
    pub const fn create_translation(translation: Vector2) -> Self {
        Self::from_columns([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [translation.x, translation.y, 1.0]])
    }

    /// 2D scale in homogeneous coordinates.
    #[must_use]
    pub const fn create_scale_2d(scale: Vector2) -> Self {
        Self::from_columns([[scale.x, 0.0, 0.0], [0.0, scale.y, 0.0], [0.0, 0.0, 1.0]])
    }

    /// 2D rotation about the origin in homogeneous coordinates.
    #[must_use]
    pub fn create_rotation_2d(angle: impl Into<Radian>) -> Self {
        Self::create_rotation_z(angle)
    }

    /// 2D rotation about `center`.
    #[must_use]
    pub fn create_rotation_around(center: Vector2, angle: impl Into<Radian>) -> Self {
        let angle = angle.into();
        let (c, s) = (cos(angle), sin(angle));
        Self::from_columns([
            [c, s, 0.0],
            [-s, c, 0.0],
            [
                center.x * (1.0 - c) + center.y * s,
                center.y * (1.0 - c) - center.x * s,
                1.0,
            ],
        ])
    }

    /// 2D affine transform, scale then rotate then translate.
    #[must_use]
    pub fn create_transform_2d(
        translation: Vector2,
        rotation: impl Into<Radian>,
        scale: Vector2,
    ) -> Self {
        let rotation = rotation.into();
        let (c, s) = (cos(rotation), sin(rotation));
        Self::from_columns([
            [c * scale.x, s * scale.x, 0.0],
            [-s * scale.y, c * scale.y, 0.0],
            [translation.x, translation.y, 1.0],
        ])
    }

    /// Rotation about the x axis.
    #[must_use]
    pub fn create_rotation_x(angle: impl Into<Radian>) -> Self {
        let angle = angle.into();
        let (c, s) = (cos(angle), sin(angle));
        Self::from_columns([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])
    }

    /// Rotation about the y axis.
    #[must_use]
    pub fn create_rotation_y(angle: impl Into<Radian>) -> Self {
        let angle = angle.into();
        let (c, s) = (cos(angle), sin(angle));
        Self::from_columns([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    /// Rotation about the z axis.
    #[must_use]
    pub fn create_rotation_z(angle: impl Into<Radian>) -> Self {
        let angle = angle.into();
        let (c, s) = (cos(angle), sin(angle));
        Self::from_columns([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// 3D axis scale.
    #[must_use]
    pub const fn create_scale(scale: Vector3) -> Self {
        Self::from_columns([[scale.x, 0.0, 0.0], [0.0, scale.y, 0.0], [0.0, 0.0, scale.z]])
    }

    /// Z rotation applied after scale, `Rz * S`.
    #[must_use]
    pub fn create_transform(rotation: impl Into<Radian>, scale: Vector3) -> Self {
        Self::create_rotation_z(rotation) * Self::create_scale(scale)
    }
}

impl Index<usize> for Matrix3 {
    type Output = [f32; 3];

    fn index(&self, column: usize) -> &[f32; 3] {
        &self.data[column]
    }
}

impl IndexMut<usize> for Matrix3 {
    fn index_mut(&mut self, column: usize) -> &mut [f32; 3] {
        &mut self.data[column]
    }
}

impl Add for Matrix3 {
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

impl Sub for Matrix3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs * -1.0
    }
}

impl Mul<f32> for Matrix3 {
    type Output = Self;

    fn mul(mut self, rhs: f32) -> Self {
        self.data.iter_mut().flatten().for_each(|value| *value *= rhs);
        self
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut result = Self::ZERO;
        for column in 0..3 {
            for row in 0..3 {
                result.data[column][row] =
                    (0..3).map(|k| self.data[k][row] * rhs.data[column][k]).sum();
            }
        }
        result
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        let d = &self.data;
        Vector3::new(
            d[0][0] * rhs.x + d[1][0] * rhs.y + d[2][0] * rhs.z,
            d[0][1] * rhs.x + d[1][1] * rhs.y + d[2][1] * rhs.z,
            d[0][2] * rhs.x + d[1][2] * rhs.y + d[2][2] * rhs.z,
        )
    }
}

impl approx::AbsDiffEq for Matrix3 {
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

impl approx::RelativeEq for Matrix3 {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Degree;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    fn sample() -> Matrix3 {
        Matrix3::from_columns([[2.0, 0.0, 1.0], [-1.0, 3.0, 2.0], [4.0, 1.0, -2.0]])
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = sample();
        let inverse = m.inverse().unwrap();
        assert_relative_eq!(m * inverse, Matrix3::identity(), epsilon = EPSILON);
        assert_relative_eq!(inverse * m, Matrix3::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_singular_inverse_is_error() {
        assert!(matches!(Matrix3::ZERO.inverse(), Err(MathError::SingularMatrix { .. })));
        let rank_two = Matrix3::from_columns([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 1.0, 1.0]]);
        assert!(rank_two.inverse().is_err());
    }

    #[test]
    fn test_determinant_matches_transpose() {
        let m = sample();
        assert_relative_eq!(m.determinant(), m.transpose().determinant(), epsilon = EPSILON);
        assert_relative_eq!(Matrix3::create_scale(Vector3::new(2.0, 3.0, 4.0)).determinant(), 24.0);
    }

    #[test]
    fn test_axis_rotations_follow_right_hand_rule() {
        let x = Matrix3::create_rotation_x(Degree::new(90.0)) * Vector3::UP;
        assert_relative_eq!(x, Vector3::FRONT, epsilon = EPSILON);
        let y = Matrix3::create_rotation_y(Degree::new(90.0)) * Vector3::FRONT;
        assert_relative_eq!(y, Vector3::RIGHT, epsilon = EPSILON);
        let z = Matrix3::create_rotation_z(Degree::new(90.0)) * Vector3::RIGHT;
        assert_relative_eq!(z, Vector3::UP, epsilon = EPSILON);
    }

    #[test]
    fn test_2d_transform_matches_composition() {
        let translation = Vector2::new(3.0, -1.0);
        let scale = Vector2::new(2.0, 0.5);
        let composed = Matrix3::create_translation(translation)
            * Matrix3::create_rotation_2d(Degree::new(30.0))
            * Matrix3::create_scale_2d(scale);
        assert_relative_eq!(
            Matrix3::create_transform_2d(translation, Degree::new(30.0), scale),
            composed,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_rotation_around_point_keeps_center_fixed() {
        let center = Vector2::new(2.0, 1.0);
        let m = Matrix3::create_rotation_around(center, Degree::new(90.0));
        let fixed = m * Vector3::new(center.x, center.y, 1.0);
        assert_relative_eq!(fixed, Vector3::new(2.0, 1.0, 1.0), epsilon = EPSILON);

        let moved = m * Vector3::new(3.0, 1.0, 1.0);
        assert_relative_eq!(moved, Vector3::new(2.0, 2.0, 1.0), epsilon = EPSILON);
    }
}
