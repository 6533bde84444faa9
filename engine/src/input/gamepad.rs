//! Gamepad state: two sticks and an "any button" edge.

use glam::Vec2;

/// Analog gamepad axes the rig reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
}

/// Latest stick values plus button edges for the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct GamepadState {
    /// Left stick: movement
    pub left_stick: Vec2,
    /// Right stick: camera
    pub right_stick: Vec2,
    buttons_held: u32,
    any_button_down: bool,
}

/// Stick values below this magnitude read as zero.
pub const STICK_DEAD_ZONE: f32 = 0.1;

fn apply_dead_zone(value: f32) -> f32 {
    if value.abs() < STICK_DEAD_ZONE { 0.0 } else { value.clamp(-1.0, 1.0) }
}

impl GamepadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_axis(&mut self, axis: GamepadAxis, value: f32) {
        let value = apply_dead_zone(value);
        match axis {
            GamepadAxis::LeftStickX => self.left_stick.x = value,
            GamepadAxis::LeftStickY => self.left_stick.y = value,
            GamepadAxis::RightStickX => self.right_stick.x = value,
            GamepadAxis::RightStickY => self.right_stick.y = value,
        }
    }

    pub fn handle_button(&mut self, pressed: bool) {
        if pressed {
            self.buttons_held += 1;
            self.any_button_down = true;
        } else {
            self.buttons_held = self.buttons_held.saturating_sub(1);
        }
    }

    /// Whether any button went down since the last frame.
    pub fn any_button_down(&self) -> bool {
        self.any_button_down
    }

    pub fn any_button_held(&self) -> bool {
        self.buttons_held > 0
    }

    pub fn end_frame(&mut self) {
        self.any_button_down = false;
    }
}
