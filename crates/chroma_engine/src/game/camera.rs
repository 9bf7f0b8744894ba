//! # First-Person Camera
//!
//! Orientation is stored as yaw and pitch. The basis is derived from them on
//! demand:
//!
//! - `front = (cos yaw · cos pitch, sin pitch, sin yaw · cos pitch)`
//! - `right = front × world_up`
//! - `up = right × front`
//!
//! Yaw `-90°` with zero pitch looks down `-z`.

use crate::config::CameraSettings;
use crate::foundation::math::{asin, atan2, cos, sin, Degree, MathError, Matrix4, Radian, Vector3};

/// Camera attached to the player's head.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vector3,
    yaw: Radian,
    pitch: Radian,
    world_up: Vector3,
    fov: Degree,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Camera at the origin looking down `-z`.
    #[must_use]
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            position: Vector3::ZERO,
            yaw: Degree::new(-90.0).into(),
            pitch: Radian::new(0.0),
            world_up: Vector3::UP,
            fov: Degree::new(settings.fov_degrees),
            aspect: settings.aspect,
            near: settings.near,
            far: settings.far,
        }
    }

    /// Camera at `eye` aimed at `center`.
    #[must_use]
    pub fn looking_at(
        eye: Vector3,
        center: Vector3,
        world_up: Vector3,
        settings: &CameraSettings,
    ) -> Self {
        let direction = (center - eye).normalized();
        Self {
            position: eye,
            yaw: atan2(direction.z, direction.x),
            pitch: asin(direction.y),
            world_up,
            ..Self::new(settings)
        }
    }

    /// Moves and turns the camera in one step.
    pub fn set_transform(
        &mut self,
        position: Vector3,
        yaw: impl Into<Radian>,
        pitch: impl Into<Radian>,
    ) {
        self.position = position;
        self.yaw = yaw.into();
        self.pitch = pitch.into();
    }

    /// Eye position
    #[must_use]
    pub const fn position(&self) -> Vector3 {
        self.position
    }

    /// Heading around the world up axis
    #[must_use]
    pub const fn yaw(&self) -> Radian {
        self.yaw
    }

    /// Elevation above the horizon
    #[must_use]
    pub const fn pitch(&self) -> Radian {
        self.pitch
    }

    /// Unit view direction
    #[must_use]
    pub fn front(&self) -> Vector3 {
        Vector3::new(
            cos(self.yaw) * cos(self.pitch),
            sin(self.pitch),
            sin(self.yaw) * cos(self.pitch),
        )
        .normalized()
    }

    /// Unit right vector
    #[must_use]
    pub fn right(&self) -> Vector3 {
        self.front().cross(&self.world_up).normalized()
    }

    /// Unit up vector, orthogonal to front and right
    #[must_use]
    pub fn up(&self) -> Vector3 {
        self.right().cross(&self.front()).normalized()
    }

    /// World to view transform
    #[must_use]
    pub fn view_matrix(&self) -> Matrix4 {
        Matrix4::create_look_at(self.position, self.position + self.front(), self.up())
    }

    /// View to clip transform
    pub fn projection_matrix(&self) -> Result<Matrix4, MathError> {
        Matrix4::create_perspective(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vector4;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = Camera::default();
        assert_relative_eq!(camera.front(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.right(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(camera.up(), Vector3::UP, epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_tilts_front_upward() {
        let mut camera = Camera::default();
        camera.set_transform(Vector3::ZERO, Degree::new(0.0), Degree::new(30.0));
        let front = camera.front();
        assert_relative_eq!(front.y, 0.5, epsilon = 1e-6);
        assert_relative_eq!(front.x, 0.75_f32.sqrt(), epsilon = 1e-6);
        assert_relative_eq!(front.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_looking_at_recovers_direction() {
        let camera = Camera::looking_at(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::ZERO,
            Vector3::UP,
            &CameraSettings::default(),
        );
        assert_relative_eq!(camera.front(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_view_matrix_puts_target_on_negative_z() {
        let mut camera = Camera::default();
        camera.set_transform(Vector3::new(0.0, 1.0, 5.0), Degree::new(-90.0), Radian::new(0.0));
        let target = camera.view_matrix() * Vector4::from_point(Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_bad_clip_planes_fail_projection() {
        let settings = CameraSettings {
            near: 10.0,
            far: 1.0,
            ..CameraSettings::default()
        };
        assert!(Camera::new(&settings).projection_matrix().is_err());
        assert!(Camera::default().projection_matrix().is_ok());
    }
}
