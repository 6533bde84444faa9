//! Input Module
//!
//! Turns raw device state into the two things the rig consumes each tick: a camera
//! rotation delta tagged with the device that produced it, and movement intent for
//! the character.
//!
//! Devices are read through [`InputSource`], which exposes named axes and button
//! edges. [`DeviceInput`] implements it over live keyboard/mouse/gamepad state
//! (fed by the winit bridge); [`InputFrame`] is a plain snapshot that also
//! implements it, handy for scripted sessions and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use slidewalk_engine::input::{DeviceInput, PlayerInput};
//!
//! let mut devices = DeviceInput::default();
//! let mut player = PlayerInput::new();
//!
//! // winit callbacks
//! devices.handle_window_event(&event, player.cursor_mut());
//!
//! // once per frame
//! let tick = player.read(&devices);
//! devices.end_frame();
//! ```

pub mod bindings;
pub mod cursor_manager;
pub mod device;
pub mod gamepad;
pub mod keyboard;
pub mod mouse;
pub mod winit_bridge;

use glam::{Quat, Vec2};
use log::info;

use crate::player::PlayerCharacterInputs;

// Re-export commonly used types at module level
pub use bindings::{InputAction, KeyBindings};
pub use cursor_manager::{CursorAction, CursorManager};
pub use device::{DeviceInput, MOUSE_SENSITIVITY};
pub use gamepad::{GamepadAxis, GamepadState};
pub use keyboard::{KeyCode, KeyState, KeyboardState};
pub use mouse::{MouseButton, MouseState};

/// Device class currently driving the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    #[default]
    None,
    GamePad,
    KeyboardMouse,
}

/// Named analog axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    MouseCameraX,
    MouseCameraY,
    GamepadCameraX,
    GamepadCameraY,
    /// Strafe axis in [-1, 1]
    MoveRight,
    /// Forward axis in [-1, 1]
    MoveForward,
    /// Zoom steps this frame (positive = further away)
    Zoom,
}

/// Named discrete buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    MouseLeft,
    MouseRight,
    Escape,
    /// Any button on any gamepad
    GamepadAny,
    Jump,
    Crouch,
}

/// Device input capability: axes plus per-frame button edges.
pub trait InputSource {
    fn axis(&self, axis: Axis) -> f32;

    /// Whether `button` went down since the previous frame.
    fn button_down(&self, button: Button) -> bool;

    /// Whether `button` came up since the previous frame.
    fn button_up(&self, _button: Button) -> bool {
        false
    }
}

/// Snapshot of one frame of input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub mouse_camera: Vec2,
    pub gamepad_camera: Vec2,
    /// `x` = right, `y` = forward
    pub movement: Vec2,
    pub zoom: f32,
    pub mouse_left_down: bool,
    pub mouse_right_down: bool,
    pub escape_down: bool,
    pub gamepad_any_down: bool,
    pub jump_down: bool,
    pub crouch_down: bool,
    pub crouch_up: bool,
}

impl InputFrame {
    /// Read every axis and edge from `source`.
    pub fn capture<S: InputSource + ?Sized>(source: &S) -> Self {
        Self {
            mouse_camera: Vec2::new(source.axis(Axis::MouseCameraX), source.axis(Axis::MouseCameraY)),
            gamepad_camera: Vec2::new(source.axis(Axis::GamepadCameraX), source.axis(Axis::GamepadCameraY)),
            movement: Vec2::new(source.axis(Axis::MoveRight), source.axis(Axis::MoveForward)),
            zoom: source.axis(Axis::Zoom),
            mouse_left_down: source.button_down(Button::MouseLeft),
            mouse_right_down: source.button_down(Button::MouseRight),
            escape_down: source.button_down(Button::Escape),
            gamepad_any_down: source.button_down(Button::GamepadAny),
            jump_down: source.button_down(Button::Jump),
            crouch_down: source.button_down(Button::Crouch),
            crouch_up: source.button_up(Button::Crouch),
        }
    }
}

impl InputSource for InputFrame {
    fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::MouseCameraX => self.mouse_camera.x,
            Axis::MouseCameraY => self.mouse_camera.y,
            Axis::GamepadCameraX => self.gamepad_camera.x,
            Axis::GamepadCameraY => self.gamepad_camera.y,
            Axis::MoveRight => self.movement.x,
            Axis::MoveForward => self.movement.y,
            Axis::Zoom => self.zoom,
        }
    }

    fn button_down(&self, button: Button) -> bool {
        match button {
            Button::MouseLeft => self.mouse_left_down,
            Button::MouseRight => self.mouse_right_down,
            Button::Escape => self.escape_down,
            Button::GamepadAny => self.gamepad_any_down,
            Button::Jump => self.jump_down,
            Button::Crouch => self.crouch_down,
        }
    }

    fn button_up(&self, button: Button) -> bool {
        button == Button::Crouch && self.crouch_up
    }
}

/// Everything the rig needs from one frame of input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputTick {
    pub input_method: InputMethod,
    /// The classified device changed this frame
    pub method_changed: bool,
    /// Camera rotation delta from the active device
    pub camera_rotation: Vec2,
    pub zoom: f32,
    pub move_axis_forward: f32,
    pub move_axis_right: f32,
    pub jump_down: bool,
    pub crouch_down: bool,
    pub crouch_up: bool,
}

impl InputTick {
    /// Character intent relative to `camera_rotation`.
    pub fn character_inputs(&self, camera_rotation: Quat) -> PlayerCharacterInputs {
        PlayerCharacterInputs {
            move_axis_forward: self.move_axis_forward,
            move_axis_right: self.move_axis_right,
            camera_rotation,
            jump_down: self.jump_down,
            crouch_down: self.crouch_down,
            crouch_up: self.crouch_up,
        }
    }
}

/// Classifies the active device and owns the cursor lock.
#[derive(Debug, Clone, Default)]
pub struct PlayerInput {
    input_method: InputMethod,
    cursor: CursorManager,
}

impl PlayerInput {
    /// Start with no device classified and the cursor locked.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_method(&self) -> InputMethod {
        self.input_method
    }

    pub fn cursor(&self) -> &CursorManager {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorManager {
        &mut self.cursor
    }

    /// Device implied by this frame's edges, checked in a fixed order: mouse
    /// buttons, then Escape, then any gamepad button.
    pub fn classify<S: InputSource + ?Sized>(source: &S) -> Option<InputMethod> {
        let mouse = source.button_down(Button::MouseLeft) || source.button_down(Button::MouseRight);
        if mouse || source.button_down(Button::Escape) {
            Some(InputMethod::KeyboardMouse)
        } else if source.button_down(Button::GamepadAny) {
            Some(InputMethod::GamePad)
        } else {
            None
        }
    }

    /// Read one frame: classify the device, update the cursor lock and collect intent.
    pub fn read<S: InputSource + ?Sized>(&mut self, source: &S) -> InputTick {
        let previous = self.input_method;
        if let Some(method) = Self::classify(source) {
            self.input_method = method;
        }
        let method_changed = previous != self.input_method;
        if method_changed {
            info!("input method: {:?}", self.input_method);
        }

        if source.button_down(Button::Escape) {
            self.cursor.handle_escape();
        } else if source.button_down(Button::MouseLeft) || source.button_down(Button::MouseRight) {
            self.cursor.handle_click();
        }

        let camera_rotation = match self.input_method {
            InputMethod::GamePad => {
                Vec2::new(source.axis(Axis::GamepadCameraX), source.axis(Axis::GamepadCameraY))
            }
            InputMethod::KeyboardMouse | InputMethod::None => {
                Vec2::new(source.axis(Axis::MouseCameraX), source.axis(Axis::MouseCameraY))
            }
        };

        InputTick {
            input_method: self.input_method,
            method_changed,
            camera_rotation,
            zoom: source.axis(Axis::Zoom),
            move_axis_forward: source.axis(Axis::MoveForward),
            move_axis_right: source.axis(Axis::MoveRight),
            jump_down: source.button_down(Button::Jump),
            crouch_down: source.button_down(Button::Crouch),
            crouch_up: source.button_up(Button::Crouch),
        }
    }
}
