//! Slide Sandbox - headless rig session
//!
//! Run with: `cargo run --bin slide-sandbox -- [rig.json]`
//!
//! Loads a rig config (defaults when no path is given), generates the slide,
//! then drives a scripted input session through the player rig and logs the
//! character and camera state. Set `RUST_LOG=debug` to see input-method and
//! obstruction transitions.
//!
//! Script:
//! - idle, then walk forward
//! - gamepad look right while strafing
//! - mouse click (back to keyboard/mouse), zoom out toward a wall
//! - Escape releases the cursor
//! - finally a drop onto a steep slope to exercise sliding

use std::path::PathBuf;

use glam::{Vec2, Vec3};

use slidewalk_engine::physics::PlaneMotor;
use slidewalk_engine::{
    ColliderWorld, InputFrame, PlayerRig, RigConfig, SlideGenerator, Transform,
};

/// One scripted phase: a frame repeated for a number of ticks.
struct Phase {
    name: &'static str,
    ticks: usize,
    frame: InputFrame,
}

fn script() -> Vec<Phase> {
    vec![
        Phase { name: "idle", ticks: 30, frame: InputFrame::default() },
        Phase {
            name: "walk forward",
            ticks: 120,
            frame: InputFrame { movement: Vec2::new(0.0, 1.0), ..Default::default() },
        },
        Phase {
            name: "gamepad select",
            ticks: 1,
            frame: InputFrame { gamepad_any_down: true, ..Default::default() },
        },
        Phase {
            name: "gamepad look + strafe",
            ticks: 90,
            frame: InputFrame {
                gamepad_camera: Vec2::new(1.0, -0.5),
                movement: Vec2::new(1.0, 0.0),
                ..Default::default()
            },
        },
        Phase {
            name: "mouse click",
            ticks: 1,
            frame: InputFrame { mouse_left_down: true, ..Default::default() },
        },
        Phase {
            name: "zoom out",
            ticks: 10,
            frame: InputFrame { zoom: 1.0, mouse_camera: Vec2::new(0.5, 0.0), ..Default::default() },
        },
        Phase {
            name: "release cursor",
            ticks: 1,
            frame: InputFrame { escape_down: true, ..Default::default() },
        },
    ]
}

fn log_state(rig: &PlayerRig, label: &str) {
    let position = rig.motor().position();
    let velocity = rig.motor().velocity();
    let camera = rig.camera();
    log::info!(
        "[{label}] pos=({:.2}, {:.2}, {:.2}) speed={:.2} grounded={} camera_dist={:.2} pitch={:.1} obstructed={} method={:?} cursor_locked={}",
        position.x,
        position.y,
        position.z,
        velocity.length(),
        rig.motor().grounding().is_stable_on_ground,
        camera.get_current_distance(),
        camera.get_vertical_angle(),
        camera.is_obstructed(),
        rig.input().input_method(),
        rig.input().cursor().is_locked(),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => RigConfig::load(&path)?,
        None => {
            log::info!("no config given, using defaults");
            RigConfig::default()
        }
    };
    let dt = config.time_step;

    let slide = SlideGenerator::new(config.slide.clone(), Transform::from_position(config.slide_origin));
    let segments = slide.generate();
    let (vertices, indices) = slide.generate_combined_mesh();
    log::info!(
        "slide mesh: {} segments, {} vertices, {} triangles",
        segments.len(),
        vertices.len(),
        indices.len() / 3
    );
    if let Some(last) = segments.last() {
        log::info!("slide ends at height {:.2}, angle {:.1} deg", last.height2, last.theta2.to_degrees());
    }

    // A wall behind the spawn for the camera to run into.
    let mut world = ColliderWorld::new();
    let spawn = config.spawn_position;
    world.add_box(spawn + Vec3::new(-4.0, 0.0, -9.0), spawn + Vec3::new(4.0, 4.0, -8.0));

    let mut rig = PlayerRig::new(&config);
    for phase in script() {
        for _ in 0..phase.ticks {
            rig.tick(&phase.frame, &world, dt);
            rig.debug_lines_mut().drain();
        }
        log_state(&rig, phase.name);
    }

    // Steep ground: 70 degrees from up is past the stable slope limit.
    let tilt = 70f32.to_radians();
    let normal = Vec3::new(0.0, tilt.cos(), tilt.sin());
    let motor = PlaneMotor::new(spawn + Vec3::Y * 0.01, spawn, normal)
        .with_max_stable_slope_angle(config.max_stable_slope_angle);
    let mut sliding = PlayerRig::with_motor(&config, motor);
    for _ in 0..120 {
        sliding.tick(&InputFrame::default(), &world, dt);
        sliding.debug_lines_mut().drain();
    }
    log_state(&sliding, "steep slope");

    Ok(())
}
