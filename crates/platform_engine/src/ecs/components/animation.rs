//! Animation component
//!
//! Maps animation identifiers to frame-strip clips. The core never decodes
//! image data; a clip only holds the sheet identifier and its frame grid,
//! and the render boundary resolves the identifier to pixels.

use std::collections::HashMap;

use crate::ecs::components::state::AnimationId;

/// One frame strip: a sprite sheet laid out as a rows x columns grid,
/// played at a fixed rate
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Asset identifier of the sprite sheet
    pub sheet: String,
    /// Grid rows in the sheet
    pub rows: u32,
    /// Grid columns in the sheet
    pub columns: u32,
    /// Playback rate in frames per second
    pub fps: f32,

    frame: u32,
    elapsed: f32,
}

impl AnimationClip {
    /// Create a clip at frame zero
    pub fn new(sheet: impl Into<String>, rows: u32, columns: u32, fps: f32) -> Self {
        Self {
            sheet: sheet.into(),
            rows: rows.max(1),
            columns: columns.max(1),
            fps,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Total frames in the strip
    pub const fn frame_count(&self) -> u32 {
        self.rows * self.columns
    }

    /// Currently displayed frame index
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// Grid cell of the current frame as `(row, column)`
    pub const fn cell(&self) -> (u32, u32) {
        (self.frame / self.columns, self.frame % self.columns)
    }

    /// Whether playback is on the final frame.
    ///
    /// Systems gate one-shot transitions (death, appear) on this.
    pub fn is_finished(&self) -> bool {
        self.frame == self.frame_count() - 1
    }

    /// Advance playback, wrapping past the final frame
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        let frames_elapsed = (self.elapsed * self.fps) as u32;
        self.frame = frames_elapsed % self.frame_count();
    }

    /// Rewind to frame zero
    pub fn reset(&mut self) {
        self.frame = 0;
        self.elapsed = 0.0;
    }
}

/// Component mapping animation ids to clips, plus the clip currently
/// playing
#[derive(Debug, Clone)]
pub struct AnimationComponent {
    clips: HashMap<AnimationId, AnimationClip>,
    current: AnimationId,
}

impl AnimationComponent {
    /// Create an empty animation set starting on the idle id
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
            current: AnimationId::Idle,
        }
    }

    /// Register the clip for an animation id, replacing any previous one
    pub fn add_clip(&mut self, id: AnimationId, clip: AnimationClip) {
        self.clips.insert(id, clip);
    }

    /// Builder-style [`Self::add_clip`]
    pub fn with_clip(mut self, id: AnimationId, clip: AnimationClip) -> Self {
        self.add_clip(id, clip);
        self
    }

    /// The id currently playing
    pub const fn current_id(&self) -> AnimationId {
        self.current
    }

    /// Switch the playing clip; switching resets playback to frame zero
    pub fn set_current(&mut self, id: AnimationId) {
        if id == self.current {
            return;
        }
        self.current = id;
        if let Some(clip) = self.clips.get_mut(&id) {
            clip.reset();
        }
    }

    /// The clip for the current id, falling back to the idle clip when the
    /// id has no registered animation
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        if let Some(clip) = self.clips.get(&self.current) {
            return Some(clip);
        }
        log::debug!(
            "no animation registered for '{}', falling back to idle",
            self.current.as_str()
        );
        self.clips.get(&AnimationId::Idle)
    }

    /// Mutable access to the current clip, with the same idle fallback
    pub fn current_clip_mut(&mut self) -> Option<&mut AnimationClip> {
        let id = if self.clips.contains_key(&self.current) {
            self.current
        } else {
            log::debug!(
                "no animation registered for '{}', falling back to idle",
                self.current.as_str()
            );
            AnimationId::Idle
        };
        self.clips.get_mut(&id)
    }
}

impl Default for AnimationComponent {
    fn default() -> Self {
        Self::new()
    }
}
