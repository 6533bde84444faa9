//! Keyboard Input Module
//!
//! Key state tracking with per-frame press/release edges.
//! Decoupled from winit to use generic key codes.

use std::collections::HashMap;

/// Generic key codes, independent of windowing system.
///
/// Only the keys the rig can bind are listed; everything else maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Movement keys
    W,
    A,
    S,
    D,
    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    C,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Escape,
    Enter,
    Tab,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Held state of a key plus the edges seen since the last [`end_frame`](KeyboardState::end_frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub pressed: bool,
    pub just_pressed: bool,
    pub just_released: bool,
}

impl KeyState {
    /// Apply a press/release. Repeats of the current state produce no edge.
    pub fn set(&mut self, pressed: bool) {
        if pressed && !self.pressed {
            self.just_pressed = true;
        } else if !pressed && self.pressed {
            self.just_released = true;
        }
        self.pressed = pressed;
    }

    /// Drop the edges, keep the held state.
    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Tracks every key the platform reported this session.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    keys: HashMap<KeyCode, KeyState>,
}

impl KeyboardState {
    /// Create a keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        self.keys.entry(key).or_default().set(pressed);
    }

    /// Whether `key` is held down.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|k| k.pressed)
    }

    /// Whether `key` went down since the last frame.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|k| k.just_pressed)
    }

    /// Whether `key` came up since the last frame.
    pub fn just_released(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|k| k.just_released)
    }

    /// Check if any key is currently held.
    pub fn any_pressed(&self) -> bool {
        self.keys.values().any(|k| k.pressed)
    }

    /// Clear per-frame edges. Call once at the end of every frame.
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            state.clear_edges();
        }
    }

    /// Release everything (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.keys.clear();
    }
}
