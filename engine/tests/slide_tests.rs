//! Slide Tests - Spiral Slide Generation
//!
//! Segment layout, continuity and mesh export for the slide generator.

use glam::Vec3;
use slidewalk_engine::physics::Transform;
use slidewalk_engine::world::{
    Curve, Keyframe, SEGMENT_INDICES, SlideGenerator, SlideSettings, SurfaceTag,
};

fn generate(settings: SlideSettings) -> Vec<slidewalk_engine::world::SlideSegment> {
    SlideGenerator::new(settings, Transform::IDENTITY).generate()
}

// ============================================================================
// Sweep Tests
// ============================================================================

#[test]
fn test_default_sweep() {
    let segments = generate(SlideSettings::default());
    assert_eq!(segments.len(), 36);
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.index, i);
        assert_eq!(segment.tag, SurfaceTag::Slide);
        assert_eq!(segment.indices().len(), 36);
    }
    let last = segments.last().unwrap();
    assert!((last.theta2 - std::f32::consts::TAU).abs() < 1e-4);
}

#[test]
fn test_partial_last_segment_kept() {
    // 0, 40, 80: the last segment starts below 100 and overshoots to 120.
    let settings = SlideSettings { angle_interval: 40.0, angle: 100.0, ..Default::default() };
    let segments = generate(settings);
    assert_eq!(segments.len(), 3);
    assert!((segments[2].theta2.to_degrees() - 120.0).abs() < 1e-3);
}

#[test]
fn test_zero_angle_is_empty() {
    let settings = SlideSettings { angle: 0.0, ..Default::default() };
    assert!(generate(settings).is_empty());
}

#[test]
fn test_negative_interval_is_empty() {
    let settings = SlideSettings { angle_interval: -10.0, ..Default::default() };
    assert!(generate(settings).is_empty());
}

// ============================================================================
// Curve-Driven Shape Tests
// ============================================================================

#[test]
fn test_radius_curve_widens_slide() {
    let settings = SlideSettings {
        outer_radius: Curve::linear(0.0, 10.0, std::f32::consts::TAU, 20.0),
        ..Default::default()
    };
    let segments = generate(settings);

    let first_width = (segments[0].vertices[3] - segments[0].vertices[0]).length();
    let last_width = (segments[35].vertices[2] - segments[35].vertices[1]).length();
    assert!((first_width - 2.0).abs() < 1e-4);
    assert!((last_width - 12.0).abs() < 1e-3);
}

#[test]
fn test_height_curve_sampled_at_start_angle_in_radians() {
    // Flat for the first radian, then dropping 1 per segment.
    let delta = Curve::new(vec![
        Keyframe::new(0.0, 0.0),
        Keyframe::new(1.0, 0.0),
        Keyframe::new(1.0 + 1e-3, -1.0),
    ]);
    let settings = SlideSettings { delta_height: delta, ..Default::default() };
    let segments = generate(settings);

    // 50 degrees is below one radian, 60 degrees is above it.
    assert_eq!(segments[5].height2, 0.0);
    assert!((segments[6].height2 + 1.0).abs() < 1e-5);
    assert!((segments[7].height - segments[6].height2).abs() < 1e-6);
}

#[test]
fn test_world_space_follows_parent() {
    let parent = Transform::new(Vec3::new(0.0, 10.0, 0.0), glam::Quat::from_rotation_y(90f32.to_radians()));
    let segments = SlideGenerator::new(SlideSettings::default(), parent).generate();

    let world = segments[0].world_vertices();
    // Local +X maps to world -Z under a 90 degree yaw.
    assert!((world[0] - Vec3::new(0.0, 10.0, -8.0)).length() < 1e-4);
}

// ============================================================================
// Mesh Tests
// ============================================================================

#[test]
fn test_indices_cover_all_vertices() {
    let mut used = [false; 8];
    for &i in SEGMENT_INDICES.iter() {
        used[i as usize] = true;
    }
    assert!(used.iter().all(|&u| u));
}

#[test]
fn test_collision_triangles() {
    let segments = generate(SlideSettings::default());
    let triangles: Vec<[Vec3; 3]> = segments.iter().flat_map(|s| s.triangles()).collect();
    assert_eq!(triangles.len(), 36 * 12);
    for [a, b, c] in &triangles {
        assert!((*b - *a).cross(*c - *a).length() > 1e-6);
    }
}

#[test]
fn test_combined_mesh_matches_segments() {
    let generator = SlideGenerator::new(SlideSettings::default(), Transform::IDENTITY);
    let (vertices, indices) = generator.generate_combined_mesh();
    assert_eq!(vertices.len(), 36 * 36);
    assert_eq!(indices.len(), vertices.len());
    assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    assert_eq!(bytes.len(), vertices.len() * 40);
}
