//! Orbit Camera Module
//!
//! Third-person orbit camera around a follow target. Each input tick the camera:
//!
//! 1. yaws its planar direction around the target's up axis (free, unclamped)
//! 2. accumulates a pitch angle clamped to `[min_vertical_angle, max_vertical_angle]`,
//!    easing gamepad input near the limits
//! 3. smooths the follow position and orientation with `1 - e^(-sharpness * dt)`
//! 4. sphere-casts backwards from the follow point and pulls in toward the closest
//!    obstruction, or eases back out to the target distance
//! 5. places itself `distance` behind the follow point plus a screen-space offset
//!
//! Angles are in degrees. A positive vertical angle looks down at the target.
//! This is window-system agnostic; input arrives as a 2D delta tagged with the
//! device that produced it.

use glam::{Quat, Vec2, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::input::InputMethod;
use crate::physics::query::{CastHit, ColliderId, LayerMask, PhysicsQuery, SphereCast, TriggerInteraction};
use crate::physics::types::{look_rotation, smoothing_factor, Transform};

/// Maximum sphere-cast hits inspected per obstruction check
pub const MAX_OBSTRUCTIONS: usize = 32;

/// Camera framing, distance and rotation parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Screen-space offset along the camera's right (x) and up (y) axes
    pub offset: Vec2,
    /// Follow position sharpness (higher = tighter follow)
    pub following_sharpness: f32,

    pub default_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Distance change per unit of zoom input
    pub distance_movement_speed: f32,
    /// How fast the distance recovers once unobstructed
    pub distance_movement_sharpness: f32,

    pub invert_x: bool,
    pub invert_y: bool,
    /// Starting pitch in degrees
    pub default_vertical_angle: f32,
    pub min_vertical_angle: f32,
    pub max_vertical_angle: f32,
    /// Degrees per unit of rotation input
    pub rotation_speed: f32,
    pub gamepad_rotation_sharpness: f32,
    pub mouse_rotation_sharpness: f32,
    /// Angular band (degrees) near the pitch limits where gamepad input eases off
    pub smoothing_margin: f32,

    /// Sweep radius for obstruction checks
    pub obstruction_radius: f32,
    pub obstruction_layers: LayerMask,
    /// How fast the camera pulls in toward an obstruction
    pub obstruction_sharpness: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            following_sharpness: 10000.0,
            default_distance: 6.0,
            min_distance: 5.0,
            max_distance: 10.0,
            distance_movement_speed: 5.0,
            distance_movement_sharpness: 10.0,
            invert_x: false,
            invert_y: false,
            default_vertical_angle: 20.0,
            min_vertical_angle: -45.0,
            max_vertical_angle: 70.0,
            rotation_speed: 1.0,
            gamepad_rotation_sharpness: 5.0,
            mouse_rotation_sharpness: 10000.0,
            smoothing_margin: 25.0,
            obstruction_radius: 0.2,
            obstruction_layers: LayerMask::ALL,
            obstruction_sharpness: 10000.0,
        }
    }
}

/// Clamp without panicking on inverted bounds (upper bound wins).
fn clamp_between(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

impl CameraTuning {
    /// Clamp the default distance and default vertical angle into their bounds.
    pub fn validated(mut self) -> Self {
        self.default_distance = clamp_between(self.default_distance, self.min_distance, self.max_distance);
        self.default_vertical_angle = clamp_between(
            self.default_vertical_angle,
            self.min_vertical_angle,
            self.max_vertical_angle,
        );
        self
    }

    /// Easing factor applied to gamepad pitch input near the limits.
    ///
    /// Returns `(toward_max, toward_min)`, each `1.0` outside the smoothing margin and
    /// ramping down to a `0.1` floor at the bound.
    pub fn gamepad_edge_modifiers(&self, vertical_angle: f32) -> (f32, f32) {
        let ease = |delta: f32| {
            if delta < self.smoothing_margin {
                (delta / self.smoothing_margin + 0.1).clamp(0.0, 1.0)
            } else {
                1.0
            }
        };
        (
            ease(self.max_vertical_angle - vertical_angle),
            ease(vertical_angle - self.min_vertical_angle),
        )
    }
}

/// Orbit camera state
///
/// Owns the camera pose plus everything it smooths between ticks. Collision comes
/// from any [`PhysicsQuery`] passed to [`process_input`](Self::process_input).
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    tuning: CameraTuning,
    /// Colliders the obstruction check never stops on (usually the character's own)
    ignored_colliders: Vec<ColliderId>,

    /// Camera pose in world space
    transform: Transform,
    follow: Option<Transform>,

    /// Yaw direction on the follow target's up plane
    planar_direction: Vec3,
    target_distance: f32,
    current_distance: f32,
    /// Accumulated pitch in degrees
    target_vertical_angle: f32,
    current_follow_position: Vec3,

    rotation_sharpness: f32,
    input_method: InputMethod,
    distance_is_obstructed: bool,

    /// Reused sphere-cast buffer
    obstructions: Vec<CastHit>,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraTuning::default())
    }
}

impl OrbitCamera {
    /// Create a camera. The tuning is validated first.
    pub fn new(tuning: CameraTuning) -> Self {
        let tuning = tuning.validated();
        Self {
            tuning,
            ignored_colliders: Vec::new(),
            transform: Transform::IDENTITY,
            follow: None,
            planar_direction: Vec3::Z,
            target_distance: tuning.default_distance,
            current_distance: tuning.default_distance,
            target_vertical_angle: tuning.default_vertical_angle,
            current_follow_position: Vec3::ZERO,
            rotation_sharpness: tuning.mouse_rotation_sharpness,
            input_method: InputMethod::None,
            distance_is_obstructed: false,
            obstructions: Vec::with_capacity(MAX_OBSTRUCTIONS),
        }
    }

    /// Create a camera that ignores the given colliders during obstruction checks.
    pub fn with_ignored_colliders(tuning: CameraTuning, ignored: impl IntoIterator<Item = ColliderId>) -> Self {
        let mut camera = Self::new(tuning);
        camera.ignored_colliders.extend(ignored);
        camera
    }

    pub fn get_tuning(&self) -> &CameraTuning {
        &self.tuning
    }

    pub fn get_transform(&self) -> Transform {
        self.transform
    }

    pub fn get_position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn get_rotation(&self) -> Quat {
        self.transform.rotation
    }

    pub fn get_forward(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn get_planar_direction(&self) -> Vec3 {
        self.planar_direction
    }

    pub fn get_follow_transform(&self) -> Option<Transform> {
        self.follow
    }

    pub fn get_follow_position(&self) -> Vec3 {
        self.current_follow_position
    }

    pub fn get_target_distance(&self) -> f32 {
        self.target_distance
    }

    /// Set the desired distance directly. Not clamped; use [`zoom`](Self::zoom) for input.
    pub fn set_target_distance(&mut self, distance: f32) {
        self.target_distance = distance;
    }

    pub fn get_current_distance(&self) -> f32 {
        self.current_distance
    }

    pub fn get_vertical_angle(&self) -> f32 {
        self.target_vertical_angle
    }

    pub fn get_rotation_sharpness(&self) -> f32 {
        self.rotation_sharpness
    }

    pub fn get_input_method(&self) -> InputMethod {
        self.input_method
    }

    pub fn is_obstructed(&self) -> bool {
        self.distance_is_obstructed
    }

    pub fn ignored_colliders(&self) -> &[ColliderId] {
        &self.ignored_colliders
    }

    /// Attach to a new target, snapping the planar direction and follow position.
    pub fn set_follow_transform(&mut self, target: Transform) {
        self.follow = Some(target);
        self.planar_direction = target.forward();
        self.current_follow_position = target.position;
    }

    /// Update the live target pose without snapping; smoothing picks it up.
    pub fn track_follow_transform(&mut self, target: Transform) {
        if self.follow.is_none() {
            self.set_follow_transform(target);
        } else {
            self.follow = Some(target);
        }
    }

    pub fn clear_follow_transform(&mut self) {
        self.follow = None;
    }

    /// Switch the rotation sharpness to the one matching `method`.
    pub fn transition_input_method(&mut self, method: InputMethod) {
        if method == self.input_method {
            return;
        }
        self.rotation_sharpness = match method {
            InputMethod::GamePad => self.tuning.gamepad_rotation_sharpness,
            InputMethod::KeyboardMouse | InputMethod::None => self.tuning.mouse_rotation_sharpness,
        };
        debug!("camera input method {:?} -> {:?}", self.input_method, method);
        self.input_method = method;
    }

    /// Move the target distance by `amount` zoom steps (positive = further away).
    pub fn zoom(&mut self, amount: f32) {
        if self.distance_is_obstructed && amount.abs() > 0.0 {
            self.target_distance = self.current_distance;
        }
        self.target_distance = clamp_between(
            self.target_distance + amount * self.tuning.distance_movement_speed,
            self.tuning.min_distance,
            self.tuning.max_distance,
        );
    }

    /// Run one camera tick.
    ///
    /// No-op while no follow target is set.
    ///
    /// # Arguments
    /// * `rotation_input` - Raw yaw (x) and pitch (y) input this tick
    /// * `method` - Device the input came from; gamepad input eases near pitch limits
    /// * `delta_time` - Time since last tick in seconds
    /// * `world` - Geometry the camera must not clip through
    pub fn process_input<Q>(&mut self, rotation_input: Vec2, method: InputMethod, delta_time: f32, world: &Q)
    where
        Q: PhysicsQuery + ?Sized,
    {
        let Some(follow) = self.follow else {
            return;
        };

        let mut input = rotation_input;
        if self.tuning.invert_x {
            input.x = -input.x;
        }
        if self.tuning.invert_y {
            input.y = -input.y;
        }

        let up = follow.up().normalize_or(Vec3::Y);
        self.rotate_horizontal(input.x, up);
        self.rotate_vertical(input.y, method == InputMethod::GamePad);

        let t = smoothing_factor(self.tuning.following_sharpness, delta_time);
        self.current_follow_position = self.current_follow_position.lerp(follow.position, t);

        let target_rotation = look_rotation(self.planar_direction, up)
            * Quat::from_rotation_x(self.target_vertical_angle.to_radians());
        let t = smoothing_factor(self.rotation_sharpness, delta_time);
        self.transform.rotation = self.transform.rotation.slerp(target_rotation, t).normalize();

        self.handle_obstructions(world, delta_time);

        let mut position = self.current_follow_position - self.transform.forward() * self.current_distance;
        position += self.transform.right() * self.tuning.offset.x;
        position += self.transform.up() * self.tuning.offset.y;
        self.transform.position = position;
    }

    fn rotate_horizontal(&mut self, input_x: f32, up: Vec3) {
        let yaw = Quat::from_axis_angle(up, (input_x * self.tuning.rotation_speed).to_radians());
        self.planar_direction = yaw * self.planar_direction;
    }

    fn rotate_vertical(&mut self, input_y: f32, gamepad: bool) {
        let (toward_max, toward_min) = if gamepad {
            self.tuning.gamepad_edge_modifiers(self.target_vertical_angle)
        } else {
            (1.0, 1.0)
        };
        // Negative input raises the angle.
        let modifier = if input_y < 0.0 { toward_max } else { toward_min };

        self.target_vertical_angle -= input_y * self.tuning.rotation_speed * modifier;
        self.target_vertical_angle = clamp_between(
            self.target_vertical_angle,
            self.tuning.min_vertical_angle,
            self.tuning.max_vertical_angle,
        );
    }

    /// Closest valid obstruction distance behind the follow point.
    fn closest_obstruction<Q>(&mut self, world: &Q) -> Option<f32>
    where
        Q: PhysicsQuery + ?Sized,
    {
        let cast = SphereCast {
            origin: self.current_follow_position,
            radius: self.tuning.obstruction_radius,
            direction: -self.transform.forward(),
            max_distance: self.target_distance,
            layers: self.tuning.obstruction_layers,
            triggers: TriggerInteraction::Ignore,
            max_hits: MAX_OBSTRUCTIONS,
        };
        world.sphere_cast(&cast, &mut self.obstructions);

        self.obstructions
            .iter()
            .take(MAX_OBSTRUCTIONS)
            .filter(|hit| hit.distance > 0.0 && !self.ignored_colliders.contains(&hit.collider))
            .map(|hit| hit.distance)
            .fold(None, |closest: Option<f32>, d| Some(closest.map_or(d, |c| c.min(d))))
    }

    fn handle_obstructions<Q>(&mut self, world: &Q, delta_time: f32)
    where
        Q: PhysicsQuery + ?Sized,
    {
        let was_obstructed = self.distance_is_obstructed;

        match self.closest_obstruction(world) {
            Some(hit_distance) => {
                self.distance_is_obstructed = true;
                let t = smoothing_factor(self.tuning.obstruction_sharpness, delta_time);
                let eased = self.current_distance + (hit_distance - self.current_distance) * t;
                self.current_distance = eased.min(self.target_distance);
            }
            None => {
                self.distance_is_obstructed = false;
                let t = smoothing_factor(self.tuning.distance_movement_sharpness, delta_time);
                self.current_distance += (self.target_distance - self.current_distance) * t;
            }
        }

        if was_obstructed != self.distance_is_obstructed {
            debug!(
                "camera obstruction {} at distance {:.2}",
                if self.distance_is_obstructed { "entered" } else { "cleared" },
                self.current_distance
            );
        }
    }
}
