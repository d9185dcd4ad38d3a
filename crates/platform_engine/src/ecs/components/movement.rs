//! Movement component for entities that move through the level
//!
//! Plain motion state integrated by the movement system and corrected by
//! the collision systems. Positions are top-left sprite corners in world
//! coordinates, y growing downward.

use crate::foundation::math::Vec2;

/// Component for entities that can move
#[derive(Debug, Clone)]
pub struct MovementComponent {
    /// Position of the entity's sprite origin
    pub position: Vec2,

    /// Position as of the previous integration step.
    ///
    /// Only the movement system's integration step writes this; collision
    /// correction rewrites `position` alone, so landing and head-bump
    /// tests can ask "which side was the entity on last frame".
    pub last_position: Vec2,

    /// Velocity in units per second
    pub velocity: Vec2,

    /// Acceleration in units per second squared
    pub acceleration: Vec2,
}

impl MovementComponent {
    /// Create a movement component at rest at the given position
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            last_position: position,
            velocity: Vec2::zeros(),
            acceleration: Vec2::zeros(),
        }
    }

    /// Advance position by the current velocity, recording the previous
    /// position first
    pub fn step(&mut self, dt: f32) {
        self.last_position = self.position;
        self.position += self.velocity * dt;
    }

    /// Teleport without integrating, e.g. on respawn.
    ///
    /// Resets `last_position` as well so stale cross-frame collision
    /// tests cannot fire at the new location.
    pub fn warp_to(&mut self, position: Vec2) {
        self.position = position;
        self.last_position = position;
        self.velocity = Vec2::zeros();
        self.acceleration = Vec2::zeros();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_records_last_position() {
        let mut movement = MovementComponent::new(Vec2::new(10.0, 20.0));
        movement.velocity = Vec2::new(30.0, -60.0);

        movement.step(0.5);

        assert_eq!(movement.last_position, Vec2::new(10.0, 20.0));
        assert_eq!(movement.position, Vec2::new(25.0, -10.0));
    }

    #[test]
    fn warp_clears_motion() {
        let mut movement = MovementComponent::new(Vec2::new(0.0, 0.0));
        movement.velocity = Vec2::new(5.0, 5.0);
        movement.step(1.0);

        movement.warp_to(Vec2::new(100.0, 200.0));

        assert_eq!(movement.position, movement.last_position);
        assert_eq!(movement.velocity, Vec2::zeros());
    }
}
