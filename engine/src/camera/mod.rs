//! Camera Module
//!
//! Third-person orbit camera with obstruction avoidance.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod controller;

pub use controller::{CameraTuning, OrbitCamera, MAX_OBSTRUCTIONS};
