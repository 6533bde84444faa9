//! Character Movement
//!
//! Kinematic third-person movement driven by a character motor. The motor owns
//! position and collision; this controller only decides the velocity and facing the
//! motor should use for the step.
//!
//! # Movement Model
//!
//! - **Grounded (stable)**: velocity is re-oriented along the ground tangent so slopes
//!   cost no speed, then eased toward `intent * move_speed` at `movement_sharpness`.
//! - **Sliding (unstable ground)**: eased toward a downhill slide velocity that the
//!   player can speed up, brake and steer sideways.
//! - **Free fall**: gravity plus horizontal drag `1 / (1 + drag * dt)`.
//!
//! Ascending velocity is cancelled as soon as the character is off stable ground.
//!
//! # Usage
//!
//! ```rust,ignore
//! use slidewalk_engine::physics::PlaneMotor;
//! use slidewalk_engine::player::{CharacterMovement, MovementTuning, PlayerCharacterInputs};
//!
//! let mut motor = PlaneMotor::flat(Vec3::ZERO);
//! let mut movement = CharacterMovement::new(MovementTuning::default());
//!
//! // Each frame:
//! movement.set_inputs(&inputs, motor.state().character_up);
//! motor.tick(&mut movement, delta_time);
//! ```

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::motor::{CharacterController, MotorState};
use crate::physics::types::{
    approximately_zero, clamp_magnitude, look_rotation, project_on_plane, smoothing_factor,
    split_vertical,
};

/// Grounded move speed in meters per second
pub const MOVE_SPEED: f32 = 3.0;

/// Grounded velocity sharpness (1/s)
pub const MOVEMENT_SHARPNESS: f32 = 15.0;

/// Air control acceleration in m/s^2
pub const AIR_SPEED: f32 = 5.0;

/// Horizontal air drag coefficient (1/s)
pub const DRAG: f32 = 0.1;

/// Gravity acceleration in m/s^2
pub const GRAVITY: Vec3 = Vec3::new(0.0, -15.0, 0.0);

/// Base downhill slide speed in m/s
pub const SLIDE_SPEED: f32 = 8.0;

/// Facing sharpness (1/s)
pub const ROTATION_SHARPNESS: f32 = 10.0;

/// Per-session movement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    /// Grounded target speed (m/s)
    pub move_speed: f32,
    /// How fast grounded velocity converges on the target
    pub movement_sharpness: f32,
    /// Horizontal acceleration from intent while falling (m/s^2)
    pub air_speed: f32,
    /// Horizontal drag while falling
    pub drag: f32,
    pub gravity: Vec3,
    /// Downhill speed on unstable ground with no intent (m/s)
    pub slide_speed: f32,
    /// Extra gain when steering downhill
    pub slide_downhill_multiplier: f32,
    /// Braking gain when steering uphill
    pub slide_uphill_multiplier: f32,
    /// Sideways steering speed while sliding, scaled by steepness
    pub slide_left_right_speed: f32,
    pub slide_sharpness: f32,
    /// How fast facing turns toward the planar velocity
    pub rotation_sharpness: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            move_speed: MOVE_SPEED,
            movement_sharpness: MOVEMENT_SHARPNESS,
            air_speed: AIR_SPEED,
            drag: DRAG,
            gravity: GRAVITY,
            slide_speed: SLIDE_SPEED,
            slide_downhill_multiplier: 0.5,
            slide_uphill_multiplier: 0.8,
            slide_left_right_speed: 4.0,
            slide_sharpness: 5.0,
            rotation_sharpness: ROTATION_SHARPNESS,
        }
    }
}

/// Per-tick player intent handed to the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerCharacterInputs {
    /// Forward/back axis in [-1, 1]
    pub move_axis_forward: f32,
    /// Right/left axis in [-1, 1]
    pub move_axis_right: f32,
    /// Camera orientation the axes are relative to
    pub camera_rotation: Quat,
    pub jump_down: bool,
    pub crouch_down: bool,
    pub crouch_up: bool,
}

impl Default for PlayerCharacterInputs {
    fn default() -> Self {
        Self {
            move_axis_forward: 0.0,
            move_axis_right: 0.0,
            camera_rotation: Quat::IDENTITY,
            jump_down: false,
            crouch_down: false,
            crouch_up: false,
        }
    }
}

/// Kinematic character movement controller.
///
/// Implements [`CharacterController`] so any motor can drive it. Intent is set once
/// per frame with [`set_inputs`](Self::set_inputs) and consumed by every physics step
/// until the next call.
#[derive(Debug, Clone, Default)]
pub struct CharacterMovement {
    tuning: MovementTuning,

    /// World-space intent, magnitude <= 1
    move_input: Vec3,

    /// Last inputs received, kept for action flags
    inputs: PlayerCharacterInputs,
}

impl CharacterMovement {
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            tuning,
            move_input: Vec3::ZERO,
            inputs: PlayerCharacterInputs::default(),
        }
    }

    pub fn get_tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    /// World-space movement intent from the last [`set_inputs`](Self::set_inputs).
    pub fn get_move_input(&self) -> Vec3 {
        self.move_input
    }

    pub fn get_inputs(&self) -> &PlayerCharacterInputs {
        &self.inputs
    }

    /// Convert camera-relative axes into a world-space intent on the up plane.
    ///
    /// The axes are clamped to unit length first so diagonals are not faster.
    pub fn set_inputs(&mut self, inputs: &PlayerCharacterInputs, character_up: Vec3) {
        let clamped = clamp_magnitude(
            Vec3::new(inputs.move_axis_right, 0.0, inputs.move_axis_forward),
            1.0,
        );

        let mut camera_direction =
            project_on_plane(inputs.camera_rotation * Vec3::Z, character_up).normalize_or_zero();
        if camera_direction == Vec3::ZERO {
            // Looking straight along up; the camera's up axis points where it faces.
            camera_direction =
                project_on_plane(inputs.camera_rotation * Vec3::Y, character_up).normalize_or_zero();
        }

        self.move_input = if camera_direction == Vec3::ZERO {
            Vec3::ZERO
        } else {
            look_rotation(camera_direction, character_up) * clamped
        };
        self.inputs = *inputs;
    }

    fn update_grounded_velocity(&self, motor: &MotorState, current_velocity: &mut Vec3, dt: f32) {
        let normal = motor.grounding.ground_normal;

        let speed = current_velocity.length();
        *current_velocity = motor.direction_tangent_to_surface(*current_velocity, normal) * speed;

        let target = motor.direction_tangent_to_surface(self.move_input, normal)
            * self.move_input.length()
            * self.tuning.move_speed;

        *current_velocity = current_velocity.lerp(target, smoothing_factor(self.tuning.movement_sharpness, dt));
    }

    /// Returns false when the ground gives no usable downhill direction.
    fn update_sliding_velocity(&self, motor: &MotorState, current_velocity: &mut Vec3, dt: f32) -> bool {
        let up = motor.character_up;
        let normal = motor.grounding.ground_normal;

        let sliding = project_on_plane(-up, normal).normalize_or_zero();
        if sliding == Vec3::ZERO {
            return false;
        }
        let sliding_right = sliding.cross(normal);

        let tangent_input = project_on_plane(self.move_input, normal);
        let downhill = sliding.dot(tangent_input);
        let gain = if downhill > 0.0 {
            self.tuning.slide_downhill_multiplier
        } else {
            self.tuning.slide_uphill_multiplier
        };
        let downhill_modifier = 1.0 + downhill * gain;

        let steepness = -sliding.dot(up);
        let side_modifier =
            sliding_right.dot(tangent_input) * steepness * self.tuning.slide_left_right_speed;

        let target = sliding * self.tuning.slide_speed * downhill_modifier + sliding_right * side_modifier;
        *current_velocity = current_velocity.lerp(target, smoothing_factor(self.tuning.slide_sharpness, dt));
        true
    }

    fn update_falling_velocity(&self, motor: &MotorState, current_velocity: &mut Vec3, dt: f32) {
        let up = motor.character_up;

        let air_input = project_on_plane(self.move_input, up);
        if air_input != Vec3::ZERO {
            *current_velocity += air_input * self.tuning.air_speed * dt;
        }

        *current_velocity += self.tuning.gravity * dt;

        let (vertical, horizontal) = split_vertical(*current_velocity, up);
        *current_velocity = vertical + horizontal / (1.0 + self.tuning.drag * dt);
    }
}

impl CharacterController for CharacterMovement {
    fn update_rotation(&mut self, motor: &MotorState, current_rotation: &mut Quat, dt: f32) {
        if approximately_zero(motor.base_velocity.length_squared()) {
            return;
        }

        let planar = project_on_plane(motor.base_velocity, motor.character_up);
        if approximately_zero(planar.length_squared()) {
            return;
        }

        let target = look_rotation(planar, motor.character_up);
        *current_rotation = current_rotation.slerp(target, smoothing_factor(self.tuning.rotation_sharpness, dt));
    }

    fn update_velocity(&mut self, motor: &MotorState, current_velocity: &mut Vec3, dt: f32) {
        if motor.grounding.is_stable_on_ground {
            self.update_grounded_velocity(motor, current_velocity, dt);
            return;
        }

        let up = motor.character_up;
        let rising = current_velocity.dot(up);
        if rising > 0.0 {
            *current_velocity -= up * rising;
        }

        // TODO: stop sliding once the slope exceeds a max slide angle so the
        // character can't slip off ledges from unstable ground.
        if motor.grounding.found_any_ground && self.update_sliding_velocity(motor, current_velocity, dt) {
            return;
        }
        self.update_falling_velocity(motor, current_velocity, dt);
    }
}
