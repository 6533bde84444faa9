//! Config Tests - Loading Rig Configuration Files

use std::path::PathBuf;

use glam::Vec3;
use slidewalk_engine::config::{ConfigError, RigConfig};
use slidewalk_engine::world::Curve;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("slidewalk_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_load_partial_file() {
    let path = temp_path("partial");
    std::fs::write(
        &path,
        r#"{
            "movement": { "move_speed": 5.0, "gravity": [0.0, -9.81, 0.0] },
            "slide": {
                "angle": 720.0,
                "outer_radius": [{ "time": 0.0, "value": 12.0 }, { "time": 12.566, "value": 16.0 }]
            },
            "spawn_position": [1.0, 0.0, -2.0]
        }"#,
    )
    .unwrap();

    let config = RigConfig::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(config.movement.move_speed, 5.0);
    assert_eq!(config.movement.gravity, Vec3::new(0.0, -9.81, 0.0));
    assert_eq!(config.movement.drag, 0.1);
    assert_eq!(config.slide.angle, 720.0);
    assert_eq!(config.slide.inner_radius, Curve::constant(8.0));
    assert!((config.slide.outer_radius.evaluate(6.283) - 14.0).abs() < 1e-2);
    assert_eq!(config.spawn_position, Vec3::new(1.0, 0.0, -2.0));
    assert_eq!(config.camera.default_distance, 6.0);
}

#[test]
fn test_round_trip_through_json() {
    let mut config = RigConfig::default();
    config.camera.invert_x = true;
    config.movement.slide_speed = 11.0;
    config.slide.delta_height = Curve::linear(0.0, -0.1, 6.0, -0.6);

    let json = serde_json::to_string(&config).unwrap();
    let parsed = RigConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_validation_errors() {
    let cases = [
        r#"{ "slide": { "angle_interval": -5.0 } }"#,
        r#"{ "slide": { "angle": 1e30, "angle_interval": 1e-30 } }"#,
        r#"{ "time_step": 0.0 }"#,
        r#"{ "camera": { "min_vertical_angle": 80.0 } }"#,
        r#"{ "movement": { "drag": -1.0 } }"#,
    ];
    for json in cases {
        match RigConfig::from_json_str(json) {
            Err(ConfigError::Invalid(msg)) => assert!(!msg.is_empty()),
            other => panic!("expected Invalid for {json}, got {other:?}"),
        }
    }
}

#[test]
fn test_wrong_type_is_json_error() {
    let err = RigConfig::from_json_str(r#"{ "movement": { "move_speed": "fast" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().starts_with("JSON error"));
}
