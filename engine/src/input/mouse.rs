//! Mouse Input Module
//!
//! Button edges, relative motion and scroll accumulated per frame.
//! Decoupled from winit to use generic types.

use glam::Vec2;

use super::keyboard::KeyState;

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// Mouse state for one frame.
///
/// Motion and scroll accumulate until [`end_frame`](Self::end_frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseState {
    pub left: KeyState,
    pub middle: KeyState,
    pub right: KeyState,
    /// Raw relative motion in device units (x right, y down)
    motion: Vec2,
    /// Scroll in lines (positive = away from the user)
    scroll: f32,
}

impl MouseState {
    /// Create a new mouse state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left.set(pressed),
            MouseButton::Middle => self.middle.set(pressed),
            MouseButton::Right => self.right.set(pressed),
            MouseButton::Other(_) => {}
        }
    }

    /// Accumulate relative motion.
    pub fn handle_motion(&mut self, dx: f32, dy: f32) {
        self.motion += Vec2::new(dx, dy);
    }

    /// Accumulate scroll in lines.
    pub fn handle_scroll(&mut self, lines: f32) {
        self.scroll += lines;
    }

    pub fn motion(&self) -> Vec2 {
        self.motion
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn just_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left.just_pressed,
            MouseButton::Middle => self.middle.just_pressed,
            MouseButton::Right => self.right.just_pressed,
            MouseButton::Other(_) => false,
        }
    }

    /// Clear edges, motion and scroll.
    pub fn end_frame(&mut self) {
        self.left.clear_edges();
        self.middle.clear_edges();
        self.right.clear_edges();
        self.motion = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Reset everything to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
