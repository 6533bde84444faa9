//! Slidewalk Engine Library
//!
//! Third-person character controller, orbit camera rig, player input mapping and a
//! procedural spiral slide, with no dependency on any renderer or physics engine.
//!
//! # Modules
//!
//! - [`physics`] - Motor callbacks, grounding reports and sphere-cast queries
//! - [`player`] - Camera-relative kinematic character movement
//! - [`camera`] - Orbit camera with follow smoothing and obstruction avoidance
//! - [`input`] - Device classification, cursor lock and per-tick intent
//! - [`world`] - Slide generator and keyframe curves
//! - [`debug`] - Per-frame debug line buffer
//! - [`config`] - JSON rig configuration
//! - [`rig`] - Input → camera → character tick sequence
//!
//! # Example
//!
//! ```ignore
//! use slidewalk_engine::{EmptyWorld, InputFrame, PlayerRig, RigConfig};
//!
//! let config = RigConfig::default();
//! let mut rig = PlayerRig::new(&config);
//!
//! // once per frame
//! rig.tick(&InputFrame::default(), &EmptyWorld, config.time_step);
//! for line in rig.debug_lines_mut().drain() {
//!     // draw line.origin -> line.end()
//! }
//! ```

pub mod camera;
pub mod config;
pub mod debug;
pub mod input;
pub mod physics;
pub mod player;
pub mod rig;
pub mod world;

// Re-export commonly used types at crate level
pub use camera::{CameraTuning, OrbitCamera};
pub use config::{ConfigError, RigConfig};
pub use debug::DebugLines;
pub use input::{DeviceInput, InputFrame, InputMethod, InputSource, PlayerInput};
pub use physics::{CharacterController, ColliderWorld, EmptyWorld, PhysicsQuery, PlaneMotor, Transform};
pub use player::{CharacterMovement, MovementTuning, PlayerCharacterInputs};
pub use rig::PlayerRig;
pub use world::{Curve, SlideGenerator, SlideSettings};
