//! Cursor Manager Module
//!
//! Cursor lock state for the orbit camera. The cursor starts locked, Escape
//! releases it and a mouse click locks it again.
//!
//! # Usage
//!
//! ```rust,ignore
//! use slidewalk_engine::input::{CursorAction, CursorManager};
//!
//! let mut cursor = CursorManager::new();
//!
//! if escape_pressed {
//!     cursor.handle_escape();
//! }
//! if cursor.is_dirty() {
//!     window.set_cursor_grab(cursor.grab_mode())?;
//!     window.set_cursor_visible(cursor.is_cursor_visible());
//!     cursor.clear_dirty();
//! }
//! ```

use log::debug;
use winit::window::CursorGrabMode;

/// Actions that the CursorManager recommends after handling events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAction {
    /// No action needed
    None,
    /// Cursor state changed; push it to the window
    ApplyState,
}

/// Tracks whether the cursor should be locked to the window.
#[derive(Debug, Clone)]
pub struct CursorManager {
    /// User preference: locked for camera control
    locked: bool,
    /// Whether the window currently has focus
    has_focus: bool,
    /// State changed and needs to be applied to the window
    state_dirty: bool,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorManager {
    /// Create a manager with the cursor locked.
    pub fn new() -> Self {
        Self {
            locked: true,
            has_focus: true,
            state_dirty: true, // Need to apply initial state
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_dirty(&self) -> bool {
        self.state_dirty
    }

    pub fn clear_dirty(&mut self) {
        self.state_dirty = false;
    }

    fn set_locked(&mut self, locked: bool) -> CursorAction {
        if self.locked == locked {
            return CursorAction::None;
        }
        self.locked = locked;
        self.state_dirty = true;
        debug!("cursor {}", if locked { "locked" } else { "released" });
        CursorAction::ApplyState
    }

    /// Escape pressed: release the cursor.
    pub fn handle_escape(&mut self) -> CursorAction {
        self.set_locked(false)
    }

    /// Mouse clicked: lock the cursor again.
    pub fn handle_click(&mut self) -> CursorAction {
        self.set_locked(true)
    }

    /// Window regained focus; the lock preference is re-applied.
    pub fn handle_focus_gained(&mut self) -> CursorAction {
        self.has_focus = true;
        self.state_dirty = true;
        CursorAction::ApplyState
    }

    /// Window lost focus; the cursor is freed but the preference is kept.
    pub fn handle_focus_lost(&mut self) -> CursorAction {
        self.has_focus = false;
        self.state_dirty = true;
        CursorAction::ApplyState
    }

    /// Grab mode the window should use right now.
    pub fn grab_mode(&self) -> CursorGrabMode {
        if self.locked && self.has_focus {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        }
    }

    /// Cursor is hidden only while locked and focused.
    pub fn is_cursor_visible(&self) -> bool {
        !(self.locked && self.has_focus)
    }
}
