//! Respawn component

use crate::foundation::math::Vec2;

/// Component that holds a respawn delay, its elapsed timer and the
/// position to reappear at; ticked by the respawn system while the owning
/// entity is pooled inactive
#[derive(Debug, Clone)]
pub struct RespawnComponent {
    delay: f32,
    elapsed: f32,
    respawning: bool,

    /// Position the entity reappears at
    pub position: Vec2,
}

impl RespawnComponent {
    /// Create a respawn component reappearing at `position` after `delay`
    /// seconds
    pub fn new(position: Vec2, delay: f32) -> Self {
        Self {
            delay,
            elapsed: 0.0,
            respawning: false,
            position,
        }
    }

    /// Whether the respawn timer is running
    pub const fn is_respawning(&self) -> bool {
        self.respawning
    }

    /// Start (or restart) the respawn timer
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.respawning = true;
    }

    /// Advance the timer; clears the respawning flag once the delay has
    /// elapsed
    pub fn tick(&mut self, dt: f32) {
        if !self.respawning {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.delay {
            self.respawning = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_elapses() {
        let mut respawn = RespawnComponent::new(Vec2::new(10.0, 20.0), 2.0);
        assert!(!respawn.is_respawning());

        respawn.start();
        respawn.tick(1.0);
        assert!(respawn.is_respawning());

        respawn.tick(1.0);
        assert!(!respawn.is_respawning());
    }

    #[test]
    fn restart_resets_elapsed_time() {
        let mut respawn = RespawnComponent::new(Vec2::zeros(), 2.0);
        respawn.start();
        respawn.tick(1.9);
        respawn.start();
        respawn.tick(1.0);
        assert!(respawn.is_respawning());
    }
}
