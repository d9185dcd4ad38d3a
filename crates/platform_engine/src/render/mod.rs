//! Render boundary
//!
//! The simulation core stores sheet identifiers and frame grids; an
//! embedding renderer resolves them to pixels. Systems submit draw
//! commands through this trait and never touch image data.

use crate::foundation::math::Vec2;

/// Sink for per-frame draw commands
pub trait DrawSurface {
    /// Draw one cell of a sprite sheet at a world position, optionally
    /// mirrored horizontally
    fn draw_frame(&mut self, sheet: &str, row: u32, column: u32, position: Vec2, flipped: bool);
}

/// A surface that drops every command; useful for headless simulation
/// and tests
#[derive(Debug, Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn draw_frame(&mut self, _sheet: &str, _row: u32, _column: u32, _position: Vec2, _flipped: bool) {}
}
