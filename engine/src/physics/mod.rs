//! Physics capabilities for the character rig
//!
//! Nothing here simulates rigid bodies. The controller and camera only need two
//! things from a physics engine, and both are expressed as traits:
//!
//! - a character motor that probes ground, moves a capsule and calls back into the
//!   controller ([`motor::CharacterController`])
//! - sphere casts against the world ([`query::PhysicsQuery`])
//!
//! # Unit System
//!
//! **1 unit = 1 meter**, velocities in m/s, angles in degrees unless a name says
//! otherwise.
//!
//! # Submodules
//!
//! - [`types`] - glam re-exports and the vector helpers (plane projection, look rotation)
//! - [`motor`] - motor state, grounding reports, controller callbacks, [`PlaneMotor`]
//! - [`query`] - sphere-cast queries, layer masks, [`ColliderWorld`]

pub mod motor;
pub mod query;
pub mod types;

pub use motor::{
    CharacterController, GroundingReport, HitStabilityReport, MotorHit, MotorState, PlaneMotor,
};
pub use query::{
    CastHit, ColliderId, ColliderShape, ColliderWorld, EmptyWorld, LayerMask, PhysicsQuery,
    SphereCast, TriggerInteraction,
};
pub use types::{Quat, Transform, Vec2, Vec3};
