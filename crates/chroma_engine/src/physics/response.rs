//! Velocity response to a single contact

use crate::foundation::math::Vector3;

/// Outcome of resolving one contact against the player's velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResponse {
    /// Velocity after the blocking component was removed
    pub velocity: Vector3,
    /// Whether the contact surface counts as floor
    pub grounded: bool,
}

/// Removes the part of `velocity` that drives into the surface.
///
/// `normal` points from the obstacle toward the player. The velocity is
/// projected onto it; when that projection points into the obstacle
/// (`proj · normal < 0`) it is subtracted, leaving the sliding component.
/// The contact grounds the player when `normal · UP >= grounded_threshold`.
#[must_use]
pub fn resolve_contact(
    velocity: Vector3,
    normal: Vector3,
    grounded_threshold: f32,
) -> CollisionResponse {
    let projection = velocity.projected_onto(&normal);
    let grounded = normal.dot(&Vector3::UP) >= grounded_threshold;

    let velocity = if projection.dot(&normal) < 0.0 {
        velocity - projection
    } else {
        velocity
    };

    CollisionResponse { velocity, grounded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_floor_stops_falling_and_grounds() {
        let response = resolve_contact(Vector3::new(1.0, -3.0, 0.5), Vector3::UP, 0.9);
        assert!(response.grounded);
        assert_relative_eq!(response.velocity, Vector3::new(1.0, 0.0, 0.5), epsilon = 1e-6);
    }

    #[test]
    fn test_separating_velocity_is_kept() {
        let velocity = Vector3::new(0.0, 4.0, 0.0);
        let response = resolve_contact(velocity, Vector3::UP, 0.9);
        assert_eq!(response.velocity, velocity);
        assert!(response.grounded);
    }

    #[test]
    fn test_wall_blocks_without_grounding() {
        let wall = Vector3::new(-1.0, 0.0, 0.0);
        let response = resolve_contact(Vector3::new(2.0, -1.0, 1.0), wall, 0.9);
        assert!(!response.grounded);
        assert_relative_eq!(response.velocity, Vector3::new(0.0, -1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_steep_slope_is_not_floor() {
        let slope = Vector3::new(1.0, 1.0, 0.0).normalized();
        assert!(!resolve_contact(Vector3::ZERO, slope, 0.9).grounded);
        assert!(resolve_contact(Vector3::ZERO, slope, 0.7).grounded);
    }
}
