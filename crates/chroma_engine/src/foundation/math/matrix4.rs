//! 4x4 column-major matrix for world, view and projection transforms.
//!
//! Translation lives in column 3. World transforms compose as `T * R * S`.
//! [`Matrix4::create_look_at`] and [`Matrix4::create_perspective`] produce the
//! view/clip pair the renderer expects: camera looking down -z, clip depth
//! mapped to `[-1, 1]`.

use std::ops::{Add, Index, IndexMut, Mul, Sub};

use super::{almost_equal, cos, sin, tan, MathError, Matrix3, Radian, Vector3, Vector4, EPSILON};

/// A 4x4 matrix stored as `data[column][row]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    data: [[f32; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    /// All zeros.
    pub const ZERO: Self = Self { data: [[0.0; 4]; 4] };

    /// Builds a matrix from `[column][row]` data.
    #[must_use]
    pub const fn from_columns(data: [[f32; 4]; 4]) -> Self {
        Self { data }
    }

    /// A matrix with `value` on the diagonal.
    #[must_use]
    pub const fn from_diagonal(value: f32) -> Self {
        let mut data = [[0.0; 4]; 4];
        data[0][0] = value;
        data[1][1] = value;
        data[2][2] = value;
        data[3][3] = value;
        Self { data }
    }

    /// The identity matrix.
    #[must_use]
    pub const fn identity() -> Self {
        Self::from_diagonal(1.0)
    }

    /// Raw `[column][row]` data.
    #[must_use]
    pub const fn columns(&self) -> &[[f32; 4]; 4] {
        &self.data
    }

    /// Swaps rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;
        for column in 0..4 {
            for row in 0..4 {
                result.data[row][column] = self.data[column][row];
            }
        }
        result
    }

    /// The 3x3 matrix left after removing `column` and `row`.
    #[must_use]
    pub fn submatrix(&self, column: usize, row: usize) -> Matrix3 {
        let mut result = [[0.0; 3]; 3];
        for (target_column, source_column) in (0..4).filter(|&c| c != column).enumerate() {
            for (target_row, source_row) in (0..4).filter(|&r| r != row).enumerate() {
                result[target_column][target_row] = self.data[source_column][source_row];
            }
        }
        Matrix3::from_columns(result)
    }

    /// Determinant by Laplace expansion over four 3x3 minors of column 0.
    #[must_use]
    pub fn determinant(&self) -> f32 {
        (0..4)
            .map(|row| {
                let sign = if row % 2 == 0 { 1.0 } else { -1.0 };
                sign * self.data[0][row] * self.submatrix(0, row).determinant()
            })
            .sum()
    }

    /// Matrix of minors.
    #[must_use]
    pub fn minors(&self) -> Self {
        let mut result = Self::ZERO;
        for column in 0..4 {
            for row in 0..4 {
                result.data[column][row] = self.submatrix(column, row).determinant();
            }
        }
        result
    }

    /// Minors with the checkerboard sign applied.
    #[must_use]
    pub fn cofactors(&self) -> Self {
        let mut result = self.minors();
        for column in 0..4 {
            for row in 0..4 {
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

    /// The translation stored in column 3.
    #[must_use]
    pub const fn translation(&self) -> Vector3 {
        let column = &self.data[3];
        Vector3::new(column[0], column[1], column[2])
    }

    /// Transforms a point (`w = 1`) without a perspective divide.
    #[must_use]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        (*self * Vector4::from_point(point)).xyz()
    }

    /// Transforms a direction (`w = 0`), ignoring translation.
    #[must_use]
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        (*self * Vector4::from_direction(direction)).xyz()
    }

    /// Componentwise blend, `self * (1 - t) + other * t`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self * (1.0 - t) + *other * t
    }

    /// Translation by `translation`.
    #[must_use]
    pub const fn create_translation(translation: Vector3) -> Self {
        let mut result = Self::identity();
        result.data[3] = [translation.x, translation.y, translation.z, 1.0];
        result
    }

    /// Rotation about the x axis.
    #[must_use]
    pub fn create_rotation_x(angle: impl Into<Radian>) -> Self {
        let angle = angle.into();
        let (c, s) = (cos(angle), sin(angle));
        Self::from_columns([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the y axis.
    #[must_use]
    pub fn create_rotation_y(angle: impl Into<Radian>) -> Self {
        let angle = angle.into();
        let (c, s) = (cos(angle), sin(angle));
        Self::from_columns([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the z axis.
    #[must_use]
    pub fn create_rotation_z(angle: impl Into<Radian>) -> Self {
        let angle = angle.into();
        let (c, s) = (cos(angle), sin(angle));
        Self::from_columns([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Axis scale.
    #[must_use]
    pub const fn create_scale(scale: Vector3) -> Self {
        let mut result = Self::identity();
        result.data[0][0] = scale.x;
        result.data[1][1] = scale.y;
        result.data[2][2] = scale.z;
        result
    }

    /// `T * Rz * S`: scale, then rotate about z, then translate.
    #[must_use]
    pub fn create_transform(
        translation: Vector3,
        rotation: impl Into<Radian>,
        scale: Vector3,
    ) -> Self {
        Self::create_translation(translation)
            * Self::create_rotation_z(rotation)
            * Self::create_scale(scale)
    }

    /// Perspective projection with a vertical field of view.
    ///
    /// Every parameter must be positive and `near < far`.
    pub fn create_perspective(
        fov_y: impl Into<Radian>,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, MathError> {
        let fov_y = fov_y.into();
        if fov_y.raw() <= 0.0 || aspect_ratio <= 0.0 || near <= 0.0 || far <= 0.0 || near >= far
        {
            return Err(MathError::InvalidPerspective(format!(
                "fov {}, aspect {aspect_ratio}, near {near}, far {far}",
                fov_y.raw()
            )));
        }

        let tan_half_fov = tan(fov_y / 2.0);
        let mut result = Self::ZERO;
        result.data[0][0] = 1.0 / (aspect_ratio * tan_half_fov);
        result.data[1][1] = 1.0 / tan_half_fov;
        result.data[2][2] = -(far + near) / (far - near);
        result.data[2][3] = -1.0;
        result.data[3][2] = -(2.0 * far * near) / (far - near);
        Ok(result)
    }

    /// View matrix for a camera at `eye` looking at `target`.
    #[must_use]
    pub fn create_look_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let forward = (target - eye).normalized();
        let right = up.cross(&forward).normalized();
        let camera_up = forward.cross(&right);

        Self::from_columns([
            [-right.x, camera_up.x, -forward.x, 0.0],
            [-right.y, camera_up.y, -forward.y, 0.0],
            [-right.z, camera_up.z, -forward.z, 0.0],
            [right.dot(&eye), -camera_up.dot(&eye), forward.dot(&eye), 1.0],
        ])
    }
}

impl Index<usize> for Matrix4 {
    type Output = [f32; 4];

    fn index(&self, column: usize) -> &[f32; 4] {
        &self.data[column]
    }
}

impl IndexMut<usize> for Matrix4 {
    fn index_mut(&mut self, column: usize) -> &mut [f32; 4] {
        &mut self.data[column]
    }
}

impl Add for Matrix4 {
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

impl Sub for Matrix4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + rhs * -1.0
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Self;

    fn mul(mut self, rhs: f32) -> Self {
        self.data.iter_mut().flatten().for_each(|value| *value *= rhs);
        self
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut result = Self::ZERO;
        for row in 0..4 {
            for column in 0..4 {
                result.data[column][row] =
                    (0..4).map(|k| self.data[k][row] * rhs.data[column][k]).sum();
            }
        }
        result
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, rhs: Vector4) -> Vector4 {
        let d = &self.data;
        let row = |r: usize| d[0][r] * rhs.x + d[1][r] * rhs.y + d[2][r] * rhs.z + d[3][r] * rhs.w;
        Vector4::new(row(0), row(1), row(2), row(3))
    }
}

impl approx::AbsDiffEq for Matrix4 {
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

impl approx::RelativeEq for Matrix4 {
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

    fn world_transform() -> Matrix4 {
        Matrix4::create_translation(Vector3::new(1.0, -2.0, 3.0))
            * Matrix4::create_rotation_x(Degree::new(30.0))
            * Matrix4::create_rotation_y(Degree::new(-45.0))
            * Matrix4::create_rotation_z(Degree::new(60.0))
            * Matrix4::create_scale(Vector3::new(2.0, 1.0, 0.5))
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = world_transform();
        let inverse = m.inverse().unwrap();
        assert_relative_eq!(m * inverse, Matrix4::identity(), epsilon = EPSILON);
        assert_relative_eq!(inverse * m, Matrix4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_singular_inverse_is_error() {
        assert!(matches!(Matrix4::ZERO.inverse(), Err(MathError::SingularMatrix { .. })));
        let flattened = Matrix4::create_scale(Vector3::new(1.0, 0.0, 1.0));
        assert!(flattened.inverse().is_err());
    }

    #[test]
    fn test_determinant_of_scale() {
        let m = Matrix4::create_scale(Vector3::new(2.0, 3.0, 4.0));
        assert_relative_eq!(m.determinant(), 24.0, epsilon = EPSILON);
        assert_relative_eq!(world_transform().determinant(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_transform_order_is_scale_rotate_translate() {
        let m = Matrix4::create_transform(
            Vector3::new(5.0, 0.0, 0.0),
            Degree::new(90.0),
            Vector3::splat(2.0),
        );
        let moved = m.transform_point(Vector3::RIGHT);
        assert_relative_eq!(moved, Vector3::new(5.0, 2.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(m.translation(), Vector3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_translation_ignores_directions() {
        let m = Matrix4::create_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(m.transform_direction(Vector3::UP), Vector3::UP);
        assert_relative_eq!(m.transform_point(Vector3::ZERO), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_perspective_layout() {
        let m = Matrix4::create_perspective(Degree::new(90.0), 2.0, 1.0, 3.0).unwrap();
        assert_relative_eq!(m[0][0], 0.5, epsilon = EPSILON);
        assert_relative_eq!(m[1][1], 1.0, epsilon = EPSILON);
        assert_relative_eq!(m[2][2], -2.0, epsilon = EPSILON);
        assert_relative_eq!(m[2][3], -1.0);
        assert_relative_eq!(m[3][2], -3.0, epsilon = EPSILON);
        assert_relative_eq!(m[3][3], 0.0);

        // near plane maps to clip depth -1
        let clip = m * Vector4::new(0.0, 0.0, -1.0, 1.0);
        assert_relative_eq!(clip.homogenize().unwrap().z, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_perspective_rejects_bad_parameters() {
        assert!(Matrix4::create_perspective(Degree::new(0.0), 1.0, 0.1, 100.0).is_err());
        assert!(Matrix4::create_perspective(Degree::new(60.0), -1.0, 0.1, 100.0).is_err());
        assert!(Matrix4::create_perspective(Degree::new(60.0), 1.0, 0.0, 100.0).is_err());
        assert!(Matrix4::create_perspective(Degree::new(60.0), 1.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_look_at_maps_target_down_negative_z() {
        let eye = Vector3::new(0.0, 0.0, 10.0);
        let view = Matrix4::create_look_at(eye, Vector3::ZERO, Vector3::UP);

        assert_relative_eq!(view.transform_point(eye), Vector3::ZERO, epsilon = EPSILON);
        assert_relative_eq!(
            view.transform_point(Vector3::ZERO),
            Vector3::new(0.0, 0.0, -10.0),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            view.transform_point(Vector3::new(1.0, 2.0, 10.0)),
            Vector3::new(1.0, 2.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_lerp_blends_componentwise() {
        let start = Matrix4::create_translation(Vector3::ZERO);
        let end = Matrix4::create_translation(Vector3::new(0.0, -1.0, -30.0));
        let halfway = start.lerp(&end, 0.5);
        assert_relative_eq!(halfway.translation(), Vector3::new(0.0, -0.5, -15.0));
        assert_relative_eq!(halfway[3][3], 1.0);
    }
}
