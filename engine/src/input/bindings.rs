//! Input Bindings Module
//!
//! Maps physical keys to logical actions. Several keys may drive the same action
//! (WASD and the arrow keys both move), but a key drives at most one action.

use std::collections::HashMap;

use glam::Vec2;

use super::keyboard::{KeyCode, KeyboardState};

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W, Up)
    MoveForward,
    /// Move backward (default: S, Down)
    MoveBack,
    /// Strafe left (default: A, Left)
    MoveLeft,
    /// Strafe right (default: D, Right)
    MoveRight,
    /// Jump (default: Space)
    Jump,
    /// Crouch (default: Ctrl, C)
    Crouch,
    /// Release the cursor (default: Escape)
    Escape,
}

/// Key to action table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Default bindings: WASD and arrows move, Space jumps, Ctrl or C crouches.
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::ControlLeft, InputAction::Crouch);
        bindings.bind(KeyCode::C, InputAction::Crouch);
        bindings.bind(KeyCode::Escape, InputAction::Escape);

        bindings
    }

    /// Bindings with nothing bound.
    pub fn empty() -> Self {
        Self { key_to_action: HashMap::new() }
    }

    /// Bind `key` to `action`, replacing whatever `key` did before.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.key_to_action.insert(key, action);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_to_action.remove(&key);
    }

    /// Remove every key bound to `action`.
    pub fn unbind_action(&mut self, action: InputAction) {
        self.key_to_action.retain(|_, bound| *bound != action);
    }

    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// All keys bound to `action`, in no particular order.
    pub fn keys_for(&self, action: InputAction) -> impl Iterator<Item = KeyCode> + '_ {
        self.key_to_action
            .iter()
            .filter(move |(_, bound)| **bound == action)
            .map(|(&key, _)| key)
    }

    /// Whether any key bound to `action` is held.
    pub fn is_action_pressed(&self, action: InputAction, keyboard: &KeyboardState) -> bool {
        self.keys_for(action).any(|key| keyboard.is_pressed(key))
    }

    /// Whether any key bound to `action` went down this frame.
    pub fn is_action_just_pressed(&self, action: InputAction, keyboard: &KeyboardState) -> bool {
        self.keys_for(action).any(|key| keyboard.just_pressed(key))
    }

    /// Whether any key bound to `action` came up this frame.
    pub fn is_action_just_released(&self, action: InputAction, keyboard: &KeyboardState) -> bool {
        self.keys_for(action).any(|key| keyboard.just_released(key))
    }

    /// Digital movement axes: `x` = right, `y` = forward, each in {-1, 0, 1}.
    pub fn movement_axes(&self, keyboard: &KeyboardState) -> Vec2 {
        let axis = |positive: InputAction, negative: InputAction| {
            let mut value = 0.0;
            if self.is_action_pressed(positive, keyboard) {
                value += 1.0;
            }
            if self.is_action_pressed(negative, keyboard) {
                value -= 1.0;
            }
            value
        };
        Vec2::new(
            axis(InputAction::MoveRight, InputAction::MoveLeft),
            axis(InputAction::MoveForward, InputAction::MoveBack),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(keys: &[KeyCode]) -> KeyboardState {
        let mut keyboard = KeyboardState::new();
        for &key in keys {
            keyboard.handle_key(key, true);
        }
        keyboard
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::D), Some(InputAction::MoveRight));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(InputAction::Jump));
        assert_eq!(bindings.get_action(KeyCode::ControlLeft), Some(InputAction::Crouch));
        assert_eq!(bindings.get_action(KeyCode::Escape), Some(InputAction::Escape));
        assert_eq!(bindings.get_action(KeyCode::Tab), None);
    }

    #[test]
    fn test_keys_for_action() {
        let bindings = KeyBindings::new();
        let mut keys: Vec<_> = bindings.keys_for(InputAction::Crouch).collect();
        keys.sort_by_key(|k| format!("{k:?}"));
        assert_eq!(keys, vec![KeyCode::C, KeyCode::ControlLeft]);
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::new();
        bindings.bind(KeyCode::W, InputAction::Jump);

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::Jump));
        // Arrow up still moves forward
        assert!(bindings.keys_for(InputAction::MoveForward).any(|k| k == KeyCode::ArrowUp));
    }

    #[test]
    fn test_unbind_action() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_action(InputAction::MoveForward);

        let keyboard = pressed(&[KeyCode::W]);
        assert!(!bindings.is_action_pressed(InputAction::MoveForward, &keyboard));
        assert_eq!(bindings.keys_for(InputAction::MoveForward).count(), 0);
    }

    #[test]
    fn test_movement_axes() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.movement_axes(&pressed(&[KeyCode::W, KeyCode::D])), Vec2::new(1.0, 1.0));
        assert_eq!(bindings.movement_axes(&pressed(&[KeyCode::S])), Vec2::new(0.0, -1.0));
        // Opposite keys cancel
        assert_eq!(bindings.movement_axes(&pressed(&[KeyCode::A, KeyCode::D])), Vec2::ZERO);
    }

    #[test]
    fn test_action_edges() {
        let bindings = KeyBindings::new();
        let mut keyboard = pressed(&[KeyCode::C]);
        assert!(bindings.is_action_just_pressed(InputAction::Crouch, &keyboard));

        keyboard.end_frame();
        keyboard.handle_key(KeyCode::C, false);
        assert!(bindings.is_action_just_released(InputAction::Crouch, &keyboard));
    }
}
