//! Player Module
//!
//! Character movement logic driven by a character motor.
//!
//! # Components
//!
//! - [`CharacterMovement`] - Camera-relative kinematic movement with slope following,
//!   unstable-ground sliding and air drag
//! - [`MovementTuning`] - Per-session movement parameters
//! - [`PlayerCharacterInputs`] - Per-tick intent handed over by the input layer

pub mod movement_controller;

pub use movement_controller::{
    CharacterMovement, MovementTuning, PlayerCharacterInputs,
    AIR_SPEED, DRAG, GRAVITY, MOVEMENT_SHARPNESS, MOVE_SPEED, ROTATION_SHARPNESS, SLIDE_SPEED,
};
