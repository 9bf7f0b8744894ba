//! First-person player controller
//!
//! The body is a vertical capsule whose segment runs from the feet position
//! up by `height`. The camera sits halfway up the segment.

use crate::config::{CameraSettings, PlayerSettings};
use crate::foundation::math::{clamp, cos, sin, Degree, Radian, Vector3};
use crate::geometry::Line3D;
use crate::physics::Collider;

use super::camera::Camera;
use super::color::ColorState;
use super::input::PlayerInput;
use super::phone::Phone;

/// Highest upward speed gravity clamping lets through.
const MAX_RISE_SPEED: f32 = 100.0;

/// The player: kinematic state, look angles, collider and color key.
#[derive(Debug, Clone)]
pub struct Player {
    settings: PlayerSettings,
    position: Vector3,
    velocity: Vector3,
    yaw: Radian,
    pitch: Radian,
    grounded: bool,
    jump_held: bool,
    interact_held: bool,
    camera: Camera,
    collider: Collider,
    phone: Phone,
}

impl Player {
    /// Player standing at the origin, looking down `-z`.
    #[must_use]
    pub fn new(settings: &PlayerSettings, camera_settings: &CameraSettings) -> Self {
        let mut player = Self {
            settings: settings.clone(),
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
            yaw: Degree::new(-90.0).into(),
            pitch: Radian::new(0.0),
            grounded: false,
            jump_held: false,
            interact_held: false,
            camera: Camera::new(camera_settings),
            collider: Collider::create_capsule_manual_set(
                Vector3::ZERO,
                Vector3::new(0.0, settings.height, 0.0),
                settings.radius,
            ),
            phone: Phone::new(),
        };
        player.reset();
        player
    }

    /// Back to the spawn state: origin, at rest, facing `-z`, phone cleared.
    pub fn reset(&mut self) {
        self.position = Vector3::ZERO;
        self.velocity = Vector3::ZERO;
        self.grounded = false;
        self.yaw = Degree::new(-90.0).into();
        self.pitch = Radian::new(0.0);
        self.jump_held = false;
        self.interact_held = false;
        self.phone.set_state(ColorState::Inactive);
        self.sync_body();
    }

    /// Applies one frame of input and gravity to the velocity.
    ///
    /// Returns `true` when the interact button was pressed this frame.
    pub fn handle_input(&mut self, input: &PlayerInput, delta_time: f32) -> bool {
        let settings = &self.settings;

        self.yaw += Radian::new(input.mouse_dx * settings.mouse_sensitivity);
        self.pitch += Radian::new(input.mouse_dy * settings.mouse_sensitivity);
        let max_pitch = Radian::from(Degree::new(settings.max_pitch_degrees)).raw();
        self.pitch = Radian::new(clamp(self.pitch.raw(), -max_pitch, max_pitch));

        let view_front = Vector3::new(
            cos(self.yaw) * cos(self.pitch),
            sin(self.pitch),
            sin(self.yaw) * cos(self.pitch),
        );
        let move_front = Vector3::new(view_front.x, 0.0, view_front.z).normalized();
        let right = move_front.cross(&Vector3::UP).normalized();

        self.velocity.x = 0.0;
        self.velocity.z = 0.0;
        if input.forward {
            self.velocity += move_front * settings.move_speed;
        }
        if input.back {
            self.velocity -= move_front * settings.move_speed;
        }
        if input.left {
            self.velocity -= right * settings.move_speed;
        }
        if input.right {
            self.velocity += right * settings.move_speed;
        }

        if input.jump && !self.jump_held && self.grounded {
            self.velocity.y += settings.jump_force;
            log::debug!("Jump from {}", self.position);
        }
        self.jump_held = input.jump;

        let interact = input.interact && !self.interact_held;
        self.interact_held = input.interact;

        self.velocity.y = clamp(
            self.velocity.y - settings.gravity * delta_time,
            -settings.max_fall_speed,
            MAX_RISE_SPEED,
        );
        if self.grounded && self.velocity.y < 0.0 {
            self.velocity.y = 0.0;
        }

        interact
    }

    /// Integrates the velocity and moves the camera and collider along.
    pub fn update_position(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
        self.sync_body();
        log::trace!(
            "Player at {} velocity {} grounded {}",
            self.position,
            self.velocity,
            self.grounded
        );
    }

    /// The capsule where the player would be after `delta_time` at the current velocity.
    #[must_use]
    pub fn stepped_collider(&self, delta_time: f32) -> Collider {
        let feet = self.position + self.velocity * delta_time;
        Collider::create_capsule_manual_set(feet, self.head(feet), self.settings.radius)
    }

    /// Ray from the eye along the view direction.
    #[must_use]
    pub fn interaction_ray(&self) -> Line3D {
        Line3D::new(self.camera.position(), self.camera.front())
    }

    /// Feet position
    #[must_use]
    pub const fn position(&self) -> Vector3 {
        self.position
    }

    /// Teleports the player, keeping velocity.
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
        self.sync_body();
    }

    /// Current velocity
    #[must_use]
    pub const fn velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Overrides the velocity.
    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    /// Whether the player stood on floor during the last collision pass
    #[must_use]
    pub const fn grounded(&self) -> bool {
        self.grounded
    }

    /// Sets the floor contact flag.
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Heading
    #[must_use]
    pub const fn yaw(&self) -> Radian {
        self.yaw
    }

    /// Elevation
    #[must_use]
    pub const fn pitch(&self) -> Radian {
        self.pitch
    }

    /// Head camera
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Capsule at the current position
    #[must_use]
    pub const fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Color key
    #[must_use]
    pub const fn phone(&self) -> &Phone {
        &self.phone
    }

    /// Mutable color key
    pub fn phone_mut(&mut self) -> &mut Phone {
        &mut self.phone
    }

    /// Body and control settings
    #[must_use]
    pub const fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    fn head(&self, feet: Vector3) -> Vector3 {
        feet + Vector3::new(0.0, self.settings.height, 0.0)
    }

    fn sync_body(&mut self) {
        let eye = self.position + Vector3::new(0.0, self.settings.height * 0.5, 0.0);
        let head = self.head(self.position);
        self.camera.set_transform(eye, self.yaw, self.pitch);
        self.collider.update_capsule(self.position, head, self.settings.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn player() -> Player {
        Player::new(&PlayerSettings::default(), &CameraSettings::default())
    }

    #[test]
    fn test_forward_moves_along_negative_z() {
        let mut player = player();
        let input = PlayerInput { forward: true, ..PlayerInput::idle() };
        player.handle_input(&input, DT);

        let velocity = player.velocity();
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(velocity.z, -2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_strafe_right_moves_along_positive_x() {
        let mut player = player();
        let input = PlayerInput { right: true, ..PlayerInput::idle() };
        player.handle_input(&input, DT);
        assert_relative_eq!(player.velocity().x, 2.5, epsilon = 1e-5);
        assert_relative_eq!(player.velocity().z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_gravity_is_clamped() {
        let mut player = player();
        for _ in 0..1000 {
            player.handle_input(&PlayerInput::idle(), DT);
        }
        assert_relative_eq!(player.velocity().y, -50.0, epsilon = 1e-4);
    }

    #[test]
    fn test_jump_needs_ground_and_a_fresh_press() {
        let mut player = player();
        let jump = PlayerInput { jump: true, ..PlayerInput::idle() };

        player.handle_input(&jump, DT);
        assert!(player.velocity().y < 0.0);
        player.handle_input(&PlayerInput::idle(), DT);

        player.set_velocity(Vector3::ZERO);
        player.set_grounded(true);
        player.handle_input(&jump, DT);
        assert!(player.velocity().y > 4.0);

        player.set_velocity(Vector3::ZERO);
        player.handle_input(&jump, DT);
        assert_relative_eq!(player.velocity().y, 0.0);
    }

    #[test]
    fn test_grounded_player_does_not_accumulate_fall_speed() {
        let mut player = player();
        player.set_grounded(true);
        player.handle_input(&PlayerInput::idle(), DT);
        assert_relative_eq!(player.velocity().y, 0.0);
    }

    #[test]
    fn test_interact_fires_on_press_only() {
        let mut player = player();
        let click = PlayerInput { interact: true, ..PlayerInput::idle() };
        assert!(player.handle_input(&click, DT));
        assert!(!player.handle_input(&click, DT));
        assert!(!player.handle_input(&PlayerInput::idle(), DT));
        assert!(player.handle_input(&click, DT));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut player = player();
        let look_up = PlayerInput { mouse_dy: 100_000.0, ..PlayerInput::idle() };
        player.handle_input(&look_up, DT);
        assert_relative_eq!(player.pitch().degree(true), 89.0, epsilon = 1e-3);
    }

    #[test]
    fn test_update_position_moves_camera_and_collider() {
        let mut player = player();
        player.set_velocity(Vector3::new(0.0, 0.0, -6.0));
        player.update_position(0.5);

        assert_relative_eq!(player.position(), Vector3::new(0.0, 0.0, -3.0), epsilon = 1e-6);
        assert_relative_eq!(
            player.camera().position(),
            Vector3::new(0.0, 0.5, -3.0),
            epsilon = 1e-6
        );
        let capsule = player.collider().capsule().unwrap();
        assert_relative_eq!(capsule.end, Vector3::new(0.0, 1.0, -3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_stepped_collider_leads_by_velocity() {
        let mut player = player();
        player.set_velocity(Vector3::new(6.0, 0.0, 0.0));
        let stepped = player.stepped_collider(0.5);
        let capsule = stepped.capsule().unwrap();
        assert_relative_eq!(capsule.start, Vector3::new(3.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(capsule.radius, 0.2);
        assert_relative_eq!(player.position(), Vector3::ZERO);
    }

    #[test]
    fn test_reset_restores_spawn_state() {
        let mut player = player();
        player.phone_mut().set_state(ColorState::Red);
        player.set_velocity(Vector3::new(1.0, 2.0, 3.0));
        player.update_position(1.0);
        player.handle_input(&PlayerInput { mouse_dx: 500.0, ..PlayerInput::idle() }, DT);

        player.reset();
        assert_eq!(player.position(), Vector3::ZERO);
        assert_eq!(player.velocity(), Vector3::ZERO);
        assert_eq!(player.phone().state(), ColorState::Inactive);
        assert_eq!(player.yaw(), Radian::from(Degree::new(-90.0)));
        assert_relative_eq!(
            player.interaction_ray().direction,
            Vector3::new(0.0, 0.0, -1.0),
            epsilon = 1e-6
        );
    }
}
