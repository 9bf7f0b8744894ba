//! Level objects: a placed mesh, its box collider and its gameplay role

use serde::{Deserialize, Serialize};

use crate::assets::MeshInstance;
use crate::foundation::collections::EntityId;
use crate::foundation::math::Matrix4;
use crate::physics::Collider;

use super::color::ColorState;

/// Gameplay role of a level object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameObjectType {
    /// Solid scenery
    Obstacle,
    /// Solid unless the phone holds the door's color
    Door,
    /// Trades colors with the phone when interacted with
    Button,
    /// Ping-pong platform that also trades colors
    MovingObject,
    /// Touching it wins the level
    EndPoint,
    /// Touching it restarts the level
    DeathZone,
}

impl GameObjectType {
    /// Role and color encoded in a level record id.
    ///
    /// | ids  | role          | color      |
    /// |------|---------------|------------|
    /// | 0-3  | door          | `id % 4`   |
    /// | 4-7  | button        | `id % 4`   |
    /// | 8-11 | moving object | `id % 4`   |
    /// | 12   | obstacle      | inactive   |
    /// | 13   | end point     | inactive   |
    /// | 14   | death zone    | inactive   |
    ///
    /// Any other id has no meaning and returns `None`.
    #[must_use]
    pub const fn classify(id: i32) -> Option<(Self, ColorState)> {
        let kind = match id {
            0..=3 => Self::Door,
            4..=7 => Self::Button,
            8..=11 => Self::MovingObject,
            12 => return Some((Self::Obstacle, ColorState::Inactive)),
            13 => return Some((Self::EndPoint, ColorState::Inactive)),
            14 => return Some((Self::DeathZone, ColorState::Inactive)),
            _ => return None,
        };
        Some((kind, ColorState::from_key(id)))
    }

    /// Whether the interaction ray can trade colors with this object.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Button | Self::MovingObject)
    }
}

/// Interpolation state of a moving object.
///
/// `t` runs from 0 to 1 and back at `speed` per second. The model matrix is
/// the component-wise blend `start * (1 - t) + end * t`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingState {
    start: Matrix4,
    end: Matrix4,
    speed: f32,
    t: f32,
    going_to_end: bool,
}

impl MovingState {
    /// Starts at `start`, heading for `end`.
    #[must_use]
    pub const fn new(start: Matrix4, end: Matrix4, speed: f32) -> Self {
        Self {
            start,
            end,
            speed,
            t: 0.0,
            going_to_end: true,
        }
    }

    /// Advances `t` and returns the blended transform.
    pub fn advance(&mut self, delta_time: f32) -> Matrix4 {
        let step = delta_time * self.speed;
        if self.going_to_end {
            self.t += step;
        } else {
            self.t -= step;
        }

        if self.t >= 1.0 {
            self.t = 1.0;
            self.going_to_end = false;
        } else if self.t <= 0.0 {
            self.t = 0.0;
            self.going_to_end = true;
        }

        self.start.lerp(&self.end, self.t)
    }

    /// Interpolation parameter in `[0, 1]`
    #[must_use]
    pub const fn t(&self) -> f32 {
        self.t
    }

    /// Whether the object is moving toward its end transform
    #[must_use]
    pub const fn going_to_end(&self) -> bool {
        self.going_to_end
    }

    /// Transform at `t = 1`
    #[must_use]
    pub const fn end(&self) -> &Matrix4 {
        &self.end
    }
}

/// One placed level object.
#[derive(Debug, Clone)]
pub struct GameObject {
    kind: GameObjectType,
    color: ColorState,
    mesh: MeshInstance,
    collider: Collider,
    motion: Option<MovingState>,
}

impl GameObject {
    /// Creates a static object.
    #[must_use]
    pub const fn new(
        kind: GameObjectType,
        color: ColorState,
        mesh: MeshInstance,
        collider: Collider,
    ) -> Self {
        Self {
            kind,
            color,
            mesh,
            collider,
            motion: None,
        }
    }

    /// Makes the object ping-pong from its current transform to `end`.
    #[must_use]
    pub fn with_motion(mut self, end: Matrix4, speed: f32) -> Self {
        self.motion = Some(MovingState::new(*self.mesh.model_matrix(), end, speed));
        self
    }

    /// Gameplay role
    #[must_use]
    pub const fn kind(&self) -> GameObjectType {
        self.kind
    }

    /// Current color
    #[must_use]
    pub const fn color(&self) -> ColorState {
        self.color
    }

    /// Mutable color, for trading with the phone.
    ///
    /// Call [`GameObject::set_mesh_texture`] afterwards to re-skin the mesh.
    pub fn color_mut(&mut self) -> &mut ColorState {
        &mut self.color
    }

    /// Placed mesh
    #[must_use]
    pub const fn mesh(&self) -> &MeshInstance {
        &self.mesh
    }

    /// Collision volume
    #[must_use]
    pub const fn collider(&self) -> &Collider {
        &self.collider
    }

    /// Interpolation state of a moving object
    #[must_use]
    pub const fn motion(&self) -> Option<&MovingState> {
        self.motion.as_ref()
    }

    /// Binds the collider to this object's arena handle.
    pub fn set_owner(&mut self, id: EntityId) {
        self.collider.set_owner(Some(id));
    }

    /// Shows the texture of the current color.
    pub fn set_mesh_texture(&mut self) {
        self.mesh.set_texture(self.color.texture_name());
    }

    /// Steps a moving object and refits its collider. Static objects are untouched.
    pub fn update_transform(&mut self, delta_time: f32) {
        let Some(motion) = self.motion.as_mut() else {
            return;
        };
        self.mesh.set_model_matrix(motion.advance(delta_time));
        self.collider.update_bounds(&self.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{MeshLibrary, CUBE};
    use crate::foundation::math::Vector3;
    use crate::physics::ColliderType;
    use approx::assert_relative_eq;

    fn moving_cube(end: Vector3) -> GameObject {
        let library = MeshLibrary::with_primitives();
        let mesh = MeshInstance::new(library.get(CUBE).unwrap(), "red_color", Matrix4::identity());
        let collider = Collider::create_from_mesh(ColliderType::Box, &mesh).unwrap();
        GameObject::new(GameObjectType::MovingObject, ColorState::Red, mesh, collider)
            .with_motion(Matrix4::create_translation(end), 0.25)
    }

    #[test]
    fn test_classify_ids() {
        assert_eq!(GameObjectType::classify(2), Some((GameObjectType::Door, ColorState::Blue)));
        assert_eq!(GameObjectType::classify(7), Some((GameObjectType::Button, ColorState::Yellow)));
        assert_eq!(
            GameObjectType::classify(9),
            Some((GameObjectType::MovingObject, ColorState::Red))
        );
        assert_eq!(
            GameObjectType::classify(13),
            Some((GameObjectType::EndPoint, ColorState::Inactive))
        );
        assert_eq!(GameObjectType::classify(15), None);
        assert_eq!(GameObjectType::classify(-1), None);
    }

    #[test]
    fn test_only_buttons_and_platforms_are_interactive() {
        assert!(GameObjectType::Button.is_interactive());
        assert!(GameObjectType::MovingObject.is_interactive());
        assert!(!GameObjectType::Door.is_interactive());
        assert!(!GameObjectType::EndPoint.is_interactive());
    }

    #[test]
    fn test_moving_state_ping_pongs() {
        let mut state = MovingState::new(Matrix4::identity(), Matrix4::identity(), 0.5);
        state.advance(1.0);
        assert_relative_eq!(state.t(), 0.5);
        state.advance(1.5);
        assert_relative_eq!(state.t(), 1.0);
        assert!(!state.going_to_end());
        state.advance(1.0);
        assert_relative_eq!(state.t(), 0.5);
        state.advance(3.0);
        assert_relative_eq!(state.t(), 0.0);
        assert!(state.going_to_end());
    }

    #[test]
    fn test_update_transform_moves_collider() {
        let mut object = moving_cube(Vector3::new(0.0, 0.0, -8.0));
        object.update_transform(2.0);

        assert_relative_eq!(
            object.mesh().model_matrix().translation(),
            Vector3::new(0.0, 0.0, -4.0),
            epsilon = 1e-5
        );
        let bounds = object.collider().aabb().unwrap();
        assert_relative_eq!(bounds.center(), Vector3::new(0.0, 0.0, -4.0), epsilon = 1e-5);
    }

    #[test]
    fn test_texture_follows_color() {
        let mut object = moving_cube(Vector3::ZERO);
        *object.color_mut() = ColorState::Yellow;
        object.set_mesh_texture();
        assert_eq!(object.mesh().texture(), "yellow_color");
    }
}
