//! Character motor capability
//!
//! A motor owns the physical state of a character (position, rotation, velocity,
//! grounding) and calls back into a [`CharacterController`] every physics step:
//!
//! ```text
//! before_character_update -> ground probe -> post_grounding_update
//!   -> update_rotation -> update_velocity -> move + collide -> after_character_update
//! ```
//!
//! The controller never touches the motor directly. It reads a [`MotorState`]
//! snapshot and writes its decisions into the `&mut` rotation/velocity it is handed.
//!
//! [`PlaneMotor`] is a reference motor over a single infinite ground plane. It
//! exists so controllers can be driven without a physics engine; it does no
//! general collision detection.

use glam::{Quat, Vec3};

use super::query::ColliderId;
use super::types::{direction_tangent_to_surface, project_on_plane};

/// Per-step ground contact report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundingReport {
    /// Any ground under the character, stable or not.
    pub found_any_ground: bool,
    /// Ground the character can stand on (slope within the stable limit).
    pub is_stable_on_ground: bool,
    pub ground_normal: Vec3,
    pub ground_point: Vec3,
}

impl GroundingReport {
    /// No ground contact at all.
    pub fn airborne() -> Self {
        Self {
            found_any_ground: false,
            is_stable_on_ground: false,
            ground_normal: Vec3::Y,
            ground_point: Vec3::ZERO,
        }
    }

    /// Standing on walkable ground.
    pub fn stable(normal: Vec3, point: Vec3) -> Self {
        Self {
            found_any_ground: true,
            is_stable_on_ground: true,
            ground_normal: normal.normalize_or(Vec3::Y),
            ground_point: point,
        }
    }

    /// Touching ground that is too steep to stand on.
    pub fn unstable(normal: Vec3, point: Vec3) -> Self {
        Self {
            found_any_ground: true,
            is_stable_on_ground: false,
            ground_normal: normal.normalize_or(Vec3::Y),
            ground_point: point,
        }
    }
}

impl Default for GroundingReport {
    fn default() -> Self {
        Self::airborne()
    }
}

/// Read-only view of the motor handed to controller callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorState {
    pub position: Vec3,
    pub rotation: Quat,
    /// Velocity the motor moved with during the previous step.
    pub base_velocity: Vec3,
    pub character_up: Vec3,
    pub grounding: GroundingReport,
}

impl MotorState {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            base_velocity: Vec3::ZERO,
            character_up: rotation * Vec3::Y,
            grounding: GroundingReport::airborne(),
        }
    }

    /// Reorient `direction` onto the plane of `surface_normal`, keeping its heading
    /// relative to the character's up. Unit length or zero.
    pub fn direction_tangent_to_surface(&self, direction: Vec3, surface_normal: Vec3) -> Vec3 {
        direction_tangent_to_surface(direction, surface_normal, self.character_up)
    }
}

impl Default for MotorState {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Contact reported to the controller by the motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorHit {
    pub collider: ColliderId,
    pub normal: Vec3,
    pub point: Vec3,
}

/// Stability verdict for a contact. Controllers may override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitStabilityReport {
    pub is_stable: bool,
}

/// Callbacks a motor invokes on the character logic every physics step.
///
/// Only [`update_rotation`](Self::update_rotation) and
/// [`update_velocity`](Self::update_velocity) are required; the remaining hooks
/// default to no-ops and "every collider is solid".
pub trait CharacterController {
    fn before_character_update(&mut self, _motor: &MotorState, _dt: f32) {}

    fn post_grounding_update(&mut self, _motor: &MotorState, _dt: f32) {}

    fn update_rotation(&mut self, motor: &MotorState, current_rotation: &mut Quat, dt: f32);

    fn update_velocity(&mut self, motor: &MotorState, current_velocity: &mut Vec3, dt: f32);

    fn after_character_update(&mut self, _motor: &MotorState, _dt: f32) {}

    fn is_collider_valid_for_collisions(&self, _collider: ColliderId) -> bool {
        true
    }

    fn on_ground_hit(&mut self, _hit: &MotorHit, _report: &mut HitStabilityReport) {}

    fn on_movement_hit(&mut self, _hit: &MotorHit, _report: &mut HitStabilityReport) {}

    fn process_hit_stability_report(&mut self, _hit: &MotorHit, _report: &mut HitStabilityReport) {}

    fn on_discrete_collision_detected(&mut self, _collider: ColliderId) {}
}

/// Default stable slope limit in degrees.
pub const MAX_STABLE_SLOPE_ANGLE: f32 = 60.0;

/// Distance below the feet within which ground is still detected.
pub const GROUND_PROBE_DISTANCE: f32 = 0.05;

/// Reference kinematic motor over one infinite ground plane.
#[derive(Debug, Clone)]
pub struct PlaneMotor {
    state: MotorState,
    plane_point: Vec3,
    plane_normal: Vec3,
    ground_collider: ColliderId,
    max_stable_slope_angle: f32,
}

impl PlaneMotor {
    /// Motor standing at `position` with a ground plane through `plane_point`.
    pub fn new(position: Vec3, plane_point: Vec3, plane_normal: Vec3) -> Self {
        Self {
            state: MotorState::new(position, Quat::IDENTITY),
            plane_point,
            plane_normal: plane_normal.normalize_or(Vec3::Y),
            ground_collider: ColliderId(0),
            max_stable_slope_angle: MAX_STABLE_SLOPE_ANGLE,
        }
    }

    /// Flat ground at `y = 0`.
    pub fn flat(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, Vec3::Y)
    }

    pub fn with_max_stable_slope_angle(mut self, degrees: f32) -> Self {
        self.max_stable_slope_angle = degrees;
        self
    }

    pub fn with_ground_collider(mut self, collider: ColliderId) -> Self {
        self.ground_collider = collider;
        self
    }

    pub fn state(&self) -> &MotorState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn rotation(&self) -> Quat {
        self.state.rotation
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.base_velocity
    }

    pub fn grounding(&self) -> &GroundingReport {
        &self.state.grounding
    }

    /// Teleport without touching velocity.
    pub fn set_position(&mut self, position: Vec3) {
        self.state.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.state.base_velocity = velocity;
    }

    fn signed_height(&self, position: Vec3) -> f32 {
        (position - self.plane_point).dot(self.plane_normal)
    }

    fn probe_ground<C: CharacterController>(&mut self, controller: &mut C) {
        let height = self.signed_height(self.state.position);
        let leaving = self.state.base_velocity.dot(self.plane_normal) > 1e-4;

        if height > GROUND_PROBE_DISTANCE || leaving
            || !controller.is_collider_valid_for_collisions(self.ground_collider)
        {
            self.state.grounding = GroundingReport::airborne();
            return;
        }

        let point = self.state.position - self.plane_normal * height;
        let hit = MotorHit {
            collider: self.ground_collider,
            normal: self.plane_normal,
            point,
        };
        let slope = self.plane_normal.angle_between(self.state.character_up).to_degrees();
        let mut report = HitStabilityReport {
            is_stable: slope <= self.max_stable_slope_angle,
        };
        controller.process_hit_stability_report(&hit, &mut report);
        controller.on_ground_hit(&hit, &mut report);

        self.state.grounding = if report.is_stable {
            // Snap onto walkable ground.
            self.state.position = point;
            GroundingReport::stable(self.plane_normal, point)
        } else {
            GroundingReport::unstable(self.plane_normal, point)
        };
    }

    /// Advance one physics step, driving `controller` through every callback.
    pub fn tick<C: CharacterController>(&mut self, controller: &mut C, dt: f32) {
        controller.before_character_update(&self.state, dt);

        self.state.character_up = self.state.rotation * Vec3::Y;
        self.probe_ground(controller);
        controller.post_grounding_update(&self.state, dt);

        let mut rotation = self.state.rotation;
        controller.update_rotation(&self.state, &mut rotation, dt);
        self.state.rotation = rotation.normalize();

        let mut velocity = self.state.base_velocity;
        controller.update_velocity(&self.state, &mut velocity, dt);

        let mut position = self.state.position + velocity * dt;
        let height = self.signed_height(position);
        if height < 0.0 && controller.is_collider_valid_for_collisions(self.ground_collider) {
            position -= self.plane_normal * height;
            let hit = MotorHit {
                collider: self.ground_collider,
                normal: self.plane_normal,
                point: position,
            };
            let mut report = HitStabilityReport::default();
            controller.on_movement_hit(&hit, &mut report);
            if velocity.dot(self.plane_normal) < 0.0 {
                velocity = project_on_plane(velocity, self.plane_normal);
            }
        }

        self.state.position = position;
        self.state.base_velocity = velocity;
        controller.after_character_update(&self.state, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Controller that keeps a fixed velocity and counts callbacks.
    #[derive(Default)]
    struct Constant {
        velocity: Vec3,
        calls: Vec<&'static str>,
        ground_hits: usize,
    }

    impl CharacterController for Constant {
        fn before_character_update(&mut self, _motor: &MotorState, _dt: f32) {
            self.calls.push("before");
        }
        fn post_grounding_update(&mut self, _motor: &MotorState, _dt: f32) {
            self.calls.push("grounding");
        }
        fn update_rotation(&mut self, _motor: &MotorState, _rotation: &mut Quat, _dt: f32) {
            self.calls.push("rotation");
        }
        fn update_velocity(&mut self, _motor: &MotorState, velocity: &mut Vec3, _dt: f32) {
            self.calls.push("velocity");
            *velocity = self.velocity;
        }
        fn after_character_update(&mut self, _motor: &MotorState, _dt: f32) {
            self.calls.push("after");
        }
        fn on_ground_hit(&mut self, _hit: &MotorHit, _report: &mut HitStabilityReport) {
            self.ground_hits += 1;
        }
    }

    #[test]
    fn test_callback_order() {
        let mut motor = PlaneMotor::flat(Vec3::ZERO);
        let mut controller = Constant::default();
        motor.tick(&mut controller, 0.1);
        assert_eq!(controller.calls, ["before", "grounding", "rotation", "velocity", "after"]);
    }

    #[test]
    fn test_flat_ground_is_stable() {
        let mut motor = PlaneMotor::flat(Vec3::ZERO);
        let mut controller = Constant::default();
        motor.tick(&mut controller, 0.1);
        assert!(motor.grounding().is_stable_on_ground);
        assert_eq!(controller.ground_hits, 1);
    }

    #[test]
    fn test_high_above_ground_is_airborne() {
        let mut motor = PlaneMotor::flat(Vec3::new(0.0, 5.0, 0.0));
        let mut controller = Constant::default();
        motor.tick(&mut controller, 0.1);
        assert!(!motor.grounding().found_any_ground);
    }

    #[test]
    fn test_steep_plane_is_unstable() {
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize() + Vec3::new(0.0, 0.0, 1.0);
        let mut motor = PlaneMotor::new(Vec3::ZERO, Vec3::ZERO, normal);
        let mut controller = Constant::default();
        motor.tick(&mut controller, 0.1);
        assert!(motor.grounding().found_any_ground);
        assert!(!motor.grounding().is_stable_on_ground);
    }

    #[test]
    fn test_movement_never_sinks_below_plane() {
        let mut motor = PlaneMotor::flat(Vec3::new(0.0, 0.5, 0.0));
        let mut controller = Constant {
            velocity: Vec3::new(1.0, -20.0, 0.0),
            ..Default::default()
        };
        motor.tick(&mut controller, 0.1);
        assert!(motor.position().y.abs() < 1e-5);
        assert!(motor.velocity().y.abs() < 1e-5);
        assert!((motor.velocity().x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_state_tangent_helper() {
        let state = MotorState::default();
        let d = state.direction_tangent_to_surface(Vec3::X, Vec3::Y);
        assert!((d - Vec3::X).length() < 1e-6);
    }
}
