//! Live device input: keyboard, mouse and gamepad state behind [`InputSource`].

use glam::Vec2;

use super::bindings::{InputAction, KeyBindings};
use super::gamepad::GamepadState;
use super::keyboard::{KeyCode, KeyboardState};
use super::mouse::MouseState;
use super::{Axis, Button, InputFrame, InputSource};

/// Camera degrees per raw mouse count, matching a 0.1 axis sensitivity.
pub const MOUSE_SENSITIVITY: f32 = 0.1;

/// Aggregated device state for one frame.
///
/// Feed platform events in (see the winit bridge), read it through
/// [`InputSource`], then call [`end_frame`](Self::end_frame).
#[derive(Debug, Clone)]
pub struct DeviceInput {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub gamepad: GamepadState,
    pub bindings: KeyBindings,
    pub mouse_sensitivity: f32,
}

impl Default for DeviceInput {
    fn default() -> Self {
        Self::new(KeyBindings::new())
    }
}

impl DeviceInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            gamepad: GamepadState::new(),
            bindings,
            mouse_sensitivity: MOUSE_SENSITIVITY,
        }
    }

    /// Camera degrees per raw mouse count.
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Clear every per-frame edge and accumulated delta.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
        self.gamepad.end_frame();
    }

    /// Release everything, e.g. after the window loses focus.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
        self.gamepad = GamepadState::new();
    }

    /// Copy the current frame into a plain snapshot.
    pub fn snapshot(&self) -> InputFrame {
        InputFrame::capture(self)
    }

    fn movement(&self) -> Vec2 {
        let keys = self.bindings.movement_axes(&self.keyboard);
        if keys != Vec2::ZERO { keys } else { self.gamepad.left_stick }
    }
}

impl InputSource for DeviceInput {
    fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::MouseCameraX => self.mouse.motion().x * self.mouse_sensitivity,
            // Device y grows downward; camera y grows upward.
            Axis::MouseCameraY => -self.mouse.motion().y * self.mouse_sensitivity,
            Axis::GamepadCameraX => self.gamepad.right_stick.x,
            Axis::GamepadCameraY => self.gamepad.right_stick.y,
            Axis::MoveRight => self.movement().x,
            Axis::MoveForward => self.movement().y,
            Axis::Zoom => -self.mouse.scroll(),
        }
    }

    fn button_down(&self, button: Button) -> bool {
        match button {
            Button::MouseLeft => self.mouse.left.just_pressed,
            Button::MouseRight => self.mouse.right.just_pressed,
            Button::Escape => {
                self.keyboard.just_pressed(KeyCode::Escape)
                    || self.bindings.is_action_just_pressed(InputAction::Escape, &self.keyboard)
            }
            Button::GamepadAny => self.gamepad.any_button_down(),
            Button::Jump => self.bindings.is_action_just_pressed(InputAction::Jump, &self.keyboard),
            Button::Crouch => self.bindings.is_action_just_pressed(InputAction::Crouch, &self.keyboard),
        }
    }

    fn button_up(&self, button: Button) -> bool {
        match button {
            Button::MouseLeft => self.mouse.left.just_released,
            Button::MouseRight => self.mouse.right.just_released,
            Button::Escape => self.keyboard.just_released(KeyCode::Escape),
            Button::GamepadAny => false,
            Button::Jump => self.bindings.is_action_just_released(InputAction::Jump, &self.keyboard),
            Button::Crouch => self.bindings.is_action_just_released(InputAction::Crouch, &self.keyboard),
        }
    }
}
