//! Input boundary
//!
//! The core never polls hardware. The embedding application samples its
//! input devices and hands the simulation plain boolean intents each
//! frame.

/// Boolean input intents for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntents {
    /// Move left is pressed
    pub left: bool,
    /// Move right is pressed
    pub right: bool,
    /// Jump is pressed
    pub jump: bool,
}

impl InputIntents {
    /// No intents set
    pub fn none() -> Self {
        Self::default()
    }
}
