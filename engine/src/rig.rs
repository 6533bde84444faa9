//! Player Rig
//!
//! Wires input, the orbit camera and the character together. Each [`tick`](PlayerRig::tick)
//! runs the same fixed sequence:
//!
//! 1. read input (device classification, cursor lock, intent)
//! 2. update the camera (input-method transition, zoom, follow, rotation, obstructions)
//! 3. hand the camera-relative intent to the character and step the motor
//!
//! The camera reads the character pose from the previous tick, so the character
//! always moves relative to the camera orientation the player saw.

use crate::camera::OrbitCamera;
use crate::config::RigConfig;
use crate::debug::lines::{
    CAMERA_CLEAR_COLOR, CAMERA_INPUT_COLOR, CAMERA_OBSTRUCTED_COLOR, VELOCITY_COLOR,
};
use crate::debug::DebugLines;
use crate::input::{InputSource, InputTick, PlayerInput};
use crate::physics::query::{ColliderId, PhysicsQuery};
use crate::physics::types::{Transform, clamp_magnitude};
use crate::physics::PlaneMotor;
use crate::player::CharacterMovement;

/// World length of the look-input line per unit of camera rotation input.
pub const CAMERA_INPUT_LINE_SCALE: f32 = 0.25;

/// Collider id the rig gives its own character.
pub const CHARACTER_COLLIDER: ColliderId = ColliderId(u32::MAX);

/// One player: input, camera and character.
#[derive(Debug, Clone)]
pub struct PlayerRig {
    input: PlayerInput,
    camera: OrbitCamera,
    movement: CharacterMovement,
    motor: PlaneMotor,
    debug_lines: DebugLines,
    last_input: InputTick,
}

impl PlayerRig {
    /// Build a rig on flat ground at the configured spawn point.
    pub fn new(config: &RigConfig) -> Self {
        let motor = PlaneMotor::flat(config.spawn_position)
            .with_max_stable_slope_angle(config.max_stable_slope_angle);
        Self::with_motor(config, motor)
    }

    /// Build a rig around an existing motor.
    pub fn with_motor(config: &RigConfig, motor: PlaneMotor) -> Self {
        let mut camera = OrbitCamera::with_ignored_colliders(config.camera, [CHARACTER_COLLIDER]);
        camera.set_follow_transform(Transform::new(motor.position(), motor.rotation()));
        Self {
            input: PlayerInput::new(),
            camera,
            movement: CharacterMovement::new(config.movement),
            motor,
            debug_lines: DebugLines::default(),
            last_input: InputTick::default(),
        }
    }

    pub fn input(&self) -> &PlayerInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut PlayerInput {
        &mut self.input
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn movement(&self) -> &CharacterMovement {
        &self.movement
    }

    pub fn motor(&self) -> &PlaneMotor {
        &self.motor
    }

    pub fn motor_mut(&mut self) -> &mut PlaneMotor {
        &mut self.motor
    }

    /// Input read on the most recent tick.
    pub fn last_input(&self) -> &InputTick {
        &self.last_input
    }

    pub fn character_transform(&self) -> Transform {
        Transform::new(self.motor.position(), self.motor.rotation())
    }

    /// Lines queued since the last drain; the drawing layer empties this once per frame.
    pub fn debug_lines_mut(&mut self) -> &mut DebugLines {
        &mut self.debug_lines
    }

    /// Advance one frame.
    pub fn tick<S, Q>(&mut self, source: &S, world: &Q, dt: f32)
    where
        S: InputSource + ?Sized,
        Q: PhysicsQuery + ?Sized,
    {
        let tick = self.input.read(source);

        if tick.method_changed {
            self.camera.transition_input_method(tick.input_method);
        }
        self.camera.zoom(tick.zoom);
        self.camera.track_follow_transform(self.character_transform());
        self.camera
            .process_input(tick.camera_rotation, tick.input_method, dt, world);

        let up = self.motor.state().character_up;
        self.movement
            .set_inputs(&tick.character_inputs(self.camera.get_rotation()), up);
        self.motor.tick(&mut self.movement, dt);

        self.queue_debug_lines(&tick);
        self.last_input = tick;
    }

    fn queue_debug_lines(&mut self, tick: &InputTick) {
        let position = self.motor.position();
        self.debug_lines.push(position, self.motor.velocity(), VELOCITY_COLOR);

        let follow = self.camera.get_follow_position();
        let color = if self.camera.is_obstructed() {
            CAMERA_OBSTRUCTED_COLOR
        } else {
            CAMERA_CLEAR_COLOR
        };
        self.debug_lines
            .push(follow, self.camera.get_position() - follow, color);

        // Look input drawn in the camera's screen plane, at most one unit long.
        let view = self.camera.get_transform();
        let look = view.right() * tick.camera_rotation.x + view.up() * tick.camera_rotation.y;
        self.debug_lines.push(
            follow,
            clamp_magnitude(look * CAMERA_INPUT_LINE_SCALE, 1.0),
            CAMERA_INPUT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputFrame, InputMethod};
    use crate::physics::EmptyWorld;
    use glam::{Vec2, Vec3};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_camera_starts_behind_spawn() {
        let rig = PlayerRig::new(&RigConfig::default());
        assert_eq!(rig.camera().get_follow_position(), Vec3::ZERO);
        assert_eq!(rig.camera().get_planar_direction(), Vec3::Z);
        assert_eq!(rig.camera().ignored_colliders(), &[CHARACTER_COLLIDER]);
    }

    #[test]
    fn test_idle_tick_stays_put() {
        let mut rig = PlayerRig::new(&RigConfig::default());
        rig.tick(&InputFrame::default(), &EmptyWorld, DT);
        assert!(rig.motor().position().length() < 1e-5);
        assert!(rig.motor().grounding().is_stable_on_ground);
        // Camera sits default_distance behind the character, above it.
        let distance = rig.camera().get_position().distance(rig.motor().position());
        assert!((distance - 6.0).abs() < 1e-3);
        assert!(rig.camera().get_position().y > 0.0);
    }

    #[test]
    fn test_gamepad_switch_changes_sharpness() {
        let mut rig = PlayerRig::new(&RigConfig::default());
        let frame = InputFrame { gamepad_any_down: true, ..Default::default() };
        rig.tick(&frame, &EmptyWorld, DT);
        assert_eq!(rig.input().input_method(), InputMethod::GamePad);
        assert_eq!(rig.camera().get_input_method(), InputMethod::GamePad);
        assert_eq!(rig.camera().get_rotation_sharpness(), 5.0);
        assert!(rig.last_input().method_changed);
    }

    #[test]
    fn test_forward_input_moves_away_from_camera() {
        let mut rig = PlayerRig::new(&RigConfig::default());
        let frame = InputFrame { movement: Vec2::new(0.0, 1.0), ..Default::default() };
        for _ in 0..60 {
            rig.tick(&frame, &EmptyWorld, DT);
        }
        let position = rig.motor().position();
        assert!(position.z > 1.5, "moved to {position:?}");
        assert!(position.x.abs() < 1e-3);
        assert!(position.y.abs() < 1e-4);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut rig = PlayerRig::new(&RigConfig::default());
        let frame = InputFrame { zoom: 10.0, ..Default::default() };
        rig.tick(&frame, &EmptyWorld, DT);
        assert_eq!(rig.camera().get_target_distance(), 10.0);
    }

    #[test]
    fn test_debug_lines_drained_per_frame() {
        let mut rig = PlayerRig::new(&RigConfig::default());
        rig.tick(&InputFrame::default(), &EmptyWorld, DT);
        let first = rig.debug_lines_mut().drain().count();
        assert_eq!(first, 3);
        rig.tick(&InputFrame::default(), &EmptyWorld, DT);
        assert_eq!(rig.debug_lines_mut().len(), 3);
    }

    #[test]
    fn test_look_input_line_follows_gamepad_axes() {
        let mut rig = PlayerRig::new(&RigConfig::default());
        let frame = InputFrame {
            gamepad_any_down: true,
            gamepad_camera: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        rig.tick(&frame, &EmptyWorld, DT);

        let right = rig.camera().get_transform().right();
        let line = rig.debug_lines_mut().lines()[2];
        assert_eq!(line.color, CAMERA_INPUT_COLOR);
        assert!(line.offset.length() > 0.0);
        assert!(line.offset.length() <= 1.0 + 1e-5);
        assert!(line.offset.normalize().dot(right) > 0.999);
    }

    #[test]
    fn test_idle_look_input_line_is_empty() {
        let mut rig = PlayerRig::new(&RigConfig::default());
        rig.tick(&InputFrame::default(), &EmptyWorld, DT);
        let line = rig.debug_lines_mut().lines()[2];
        assert_eq!(line.offset, Vec3::ZERO);
    }
}
