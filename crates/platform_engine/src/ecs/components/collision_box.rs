//! Collision box component
//!
//! The axis-aligned rectangle used for every intersection test. It is a
//! pure function of the entity's position, facing direction and fixed
//! offsets, and must be re-derived whenever either changes before a
//! collision system reads it. The offsets let the box be narrower or
//! shorter than the sprite.

use crate::foundation::math::Rect;
use crate::foundation::math::Vec2;

/// Component holding an entity's collision rectangle and the transient
/// ground/slide bounds recorded during resolution
#[derive(Debug, Clone)]
pub struct CollisionBoxComponent {
    rect: Rect,

    /// Sprite width before offsets are applied
    pub base_width: f32,
    /// Sprite height before offsets are applied
    pub base_height: f32,
    /// Inset from the sprite's top edge
    pub top_offset: f32,
    /// Inset from the sprite's bottom edge
    pub bottom_offset: f32,
    /// Inset from the sprite's left edge
    pub left_offset: f32,
    /// Inset from the sprite's right edge
    pub right_offset: f32,

    // Horizontal span of the obstacle currently stood on; set on landing.
    ground_left: f32,
    ground_right: f32,
    // Bottom edge of the wall currently slid against; set on side hits.
    slide_bottom: f32,
}

impl CollisionBoxComponent {
    /// Create a collision box for a sprite of the given size, optionally
    /// inset by per-edge offsets
    pub fn new(
        position: Vec2,
        width: f32,
        height: f32,
        top_offset: f32,
        bottom_offset: f32,
        left_offset: f32,
        right_offset: f32,
    ) -> Self {
        let w = width - left_offset - right_offset;
        let h = height - top_offset - bottom_offset;
        Self {
            rect: Rect::new(position.x + left_offset, position.y + top_offset, w, h),
            base_width: width,
            base_height: height,
            top_offset,
            bottom_offset,
            left_offset,
            right_offset,
            ground_left: 0.0,
            ground_right: f32::MAX,
            slide_bottom: 0.0,
        }
    }

    /// Create a collision box that matches the sprite bounds exactly
    pub fn from_size(position: Vec2, width: f32, height: f32) -> Self {
        Self::new(position, width, height, 0.0, 0.0, 0.0, 0.0)
    }

    /// The current collision rectangle
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Re-derive the rectangle from the entity's position and facing
    /// direction.
    ///
    /// A mirrored sprite swaps the horizontal offsets, which keeps the box
    /// aligned with the drawn pixels when the art is asymmetric.
    pub fn update_position(&mut self, position_x: f32, position_y: f32, direction: i8) {
        self.rect.x = if direction == -1 {
            position_x + self.right_offset
        } else {
            position_x + self.left_offset
        };
        self.rect.y = position_y + self.top_offset;
    }

    /// Record the horizontal span of the obstacle the entity landed on
    pub fn set_ground_segment(&mut self, left: f32, right: f32) {
        self.ground_left = left;
        self.ground_right = right;
    }

    /// The recorded ground segment as `(left, right)`
    pub const fn ground_segment(&self) -> (f32, f32) {
        (self.ground_left, self.ground_right)
    }

    /// Record the bottom edge of the wall the entity is sliding against
    pub fn set_slide_ceiling(&mut self, bottom: f32) {
        self.slide_bottom = bottom;
    }

    /// Whether the entity has walked past the recorded ground segment
    /// (i.e. stepped off the platform edge)
    pub fn is_in_air(&self, position_x: f32, direction: i8) -> bool {
        let (mut left, mut right) = (
            position_x + self.left_offset,
            position_x - self.right_offset + self.base_width,
        );
        if direction == -1 {
            left = position_x + self.right_offset;
            right = position_x - self.left_offset + self.base_width;
        }
        right < self.ground_left || left > self.ground_right
    }

    /// Whether the entity has dropped past the bottom of the wall it was
    /// sliding against
    pub fn is_past_slide_ceiling(&self, position_y: f32) -> bool {
        position_y + self.top_offset >= self.slide_bottom
    }
}
