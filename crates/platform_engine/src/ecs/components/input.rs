//! Intent components
//!
//! Raw device polling lives outside the core; these components hold the
//! boolean intents the input and AI systems translate into state-machine
//! transitions.

use crate::input::InputIntents;

/// Component holding the player's sampled intents for the current frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInputComponent {
    /// Move-left pressed
    pub left: bool,
    /// Move-right pressed
    pub right: bool,
    /// Jump pressed
    pub jump: bool,
}

impl PlayerInputComponent {
    /// Create a component with no intents set
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy this frame's intents from the input source
    pub fn sample(&mut self, intents: InputIntents) {
        self.left = intents.left;
        self.right = intents.right;
        self.jump = intents.jump;
    }
}

/// Component driving a range-patrolling enemy.
///
/// Holds the patrol bounds around the spawn point and raises a turn flag
/// whenever the entity reaches one of them.
#[derive(Debug, Clone, Copy)]
pub struct PatrolComponent {
    left_bound: f32,
    right_bound: f32,
    turn_left: bool,
    turn_right: bool,
}

impl PatrolComponent {
    /// Create a patrol spanning `left_range` units left and `right_range`
    /// units right of `start_x`
    pub fn new(start_x: f32, left_range: f32, right_range: f32) -> Self {
        Self {
            left_bound: start_x - left_range,
            right_bound: start_x + right_range,
            turn_left: false,
            turn_right: false,
        }
    }

    /// Whether the patrol wants the entity walking left
    pub const fn wants_left(&self) -> bool {
        self.turn_left
    }

    /// Whether the patrol wants the entity walking right
    pub const fn wants_right(&self) -> bool {
        self.turn_right
    }

    /// Update the turn flags from the entity's current x position
    pub fn update(&mut self, position_x: f32) {
        if position_x <= self.left_bound {
            self.turn_right = true;
            self.turn_left = false;
        } else if position_x >= self.right_bound {
            self.turn_left = true;
            self.turn_right = false;
        }
    }
}
