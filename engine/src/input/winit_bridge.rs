//! winit event translation
//!
//! Maps winit key codes, mouse buttons and events onto the engine's own input
//! types so nothing past this file depends on the windowing system.

use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use super::cursor_manager::CursorManager;
use super::device::DeviceInput;
use super::keyboard::KeyCode;
use super::mouse::MouseButton;

/// Pixels per scroll line for trackpads reporting pixel deltas.
pub const PIXELS_PER_LINE: f64 = 100.0;

pub fn translate_key_code(key: WinitKeyCode) -> KeyCode {
    match key {
        WinitKeyCode::KeyW => KeyCode::W,
        WinitKeyCode::KeyA => KeyCode::A,
        WinitKeyCode::KeyS => KeyCode::S,
        WinitKeyCode::KeyD => KeyCode::D,
        WinitKeyCode::KeyC => KeyCode::C,
        WinitKeyCode::Space => KeyCode::Space,
        WinitKeyCode::ShiftLeft => KeyCode::ShiftLeft,
        WinitKeyCode::ShiftRight => KeyCode::ShiftRight,
        WinitKeyCode::ControlLeft => KeyCode::ControlLeft,
        WinitKeyCode::ControlRight => KeyCode::ControlRight,
        WinitKeyCode::ArrowUp => KeyCode::ArrowUp,
        WinitKeyCode::ArrowDown => KeyCode::ArrowDown,
        WinitKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        WinitKeyCode::ArrowRight => KeyCode::ArrowRight,
        WinitKeyCode::Escape => KeyCode::Escape,
        WinitKeyCode::Enter => KeyCode::Enter,
        WinitKeyCode::Tab => KeyCode::Tab,
        _ => KeyCode::Unknown,
    }
}

pub fn translate_mouse_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}

/// Scroll delta in lines (positive = away from the user).
pub fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
    }
}

impl DeviceInput {
    /// Feed a window event. Returns true if it was an input event.
    ///
    /// Focus changes also go to `cursor` so the lock can be re-applied.
    pub fn handle_window_event(&mut self, event: &WindowEvent, cursor: &mut CursorManager) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.keyboard
                        .handle_key(translate_key_code(code), event.state == ElementState::Pressed);
                }
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse
                    .handle_button(translate_mouse_button(*button), *state == ElementState::Pressed);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.handle_scroll(scroll_lines(*delta));
                true
            }
            WindowEvent::Focused(focused) => {
                if *focused {
                    cursor.handle_focus_gained();
                } else {
                    self.reset();
                    cursor.handle_focus_lost();
                }
                false
            }
            _ => false,
        }
    }

    /// Feed a raw device event. Mouse motion arrives here, not as a window event,
    /// so it keeps working while the cursor is locked.
    /// Returns true if the motion was applied.
    pub fn handle_device_event(&mut self, event: &DeviceEvent, cursor: &CursorManager) -> bool {
        match event {
            DeviceEvent::MouseMotion { delta } if cursor.is_locked() && cursor.has_focus() => {
                self.mouse.handle_motion(delta.0 as f32, delta.1 as f32);
                true
            }
            _ => false,
        }
    }
}
