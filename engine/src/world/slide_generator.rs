//! Slide Generator
//!
//! Builds a spiral slide out of prism segments. The sweep starts at angle `0` and
//! advances by `angle_interval` while the angle is below the total `angle`:
//!
//! ```text
//! segment i: theta_i .. theta_i + step, height h_i .. h_i + dh(theta_i)
//! h_{i+1} = h_i + dh(theta_i)
//! ```
//!
//! Radius and height-delta curves are evaluated at the segment's start/end angle
//! in radians. Each segment is a closed prism: a top quad along the slide surface
//! and the same quad pushed down by `bottom_offset`.
//!
//! # Vertex layout
//!
//! ```text
//! top:    0 inner@start  1 inner@end  2 outer@end  3 outer@start
//! bottom: 4..7 as 0..3, offset down
//! ```

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::curve::Curve;
use crate::physics::types::Transform;

/// Upper bound on segments in one sweep.
pub const MAX_SEGMENTS: usize = 4096;

/// Default drop from the top surface to the underside.
pub const BOTTOM_OFFSET: f32 = 0.1;

/// Triangles of one segment (12 triangles, outward winding).
pub const SEGMENT_INDICES: [u32; 36] = [
    // top
    0, 1, 2, 0, 2, 3,
    // bottom
    4, 6, 5, 4, 7, 6,
    // inner wall
    0, 4, 5, 0, 5, 1,
    // outer wall
    3, 2, 6, 3, 6, 7,
    // start cap
    0, 3, 7, 0, 7, 4,
    // end cap
    1, 5, 6, 1, 6, 2,
];

/// Base color of generated slide geometry.
pub const SLIDE_COLOR: [f32; 4] = [0.85, 0.55, 0.20, 1.0];

/// Gameplay tag carried by generated surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceTag {
    Slide,
}

/// Inputs to the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSettings {
    pub inner_radius: Curve,
    pub outer_radius: Curve,
    /// Height change per segment, by start angle
    pub delta_height: Curve,
    /// Segment width in degrees
    pub angle_interval: f32,
    /// Total sweep in degrees
    pub angle: f32,
    pub bottom_offset: f32,
}

impl Default for SlideSettings {
    fn default() -> Self {
        Self {
            inner_radius: Curve::constant(8.0),
            outer_radius: Curve::constant(12.0),
            delta_height: Curve::constant(-0.3),
            angle_interval: 10.0,
            angle: 360.0,
            bottom_offset: BOTTOM_OFFSET,
        }
    }
}

impl SlideSettings {
    /// Human-readable reason the settings cannot produce geometry, if any.
    pub fn problem(&self) -> Option<String> {
        if !(self.angle_interval.is_finite() && self.angle_interval > 0.0) {
            return Some(format!("angle_interval must be positive, got {}", self.angle_interval));
        }
        if !self.angle.is_finite() {
            return Some(format!("angle must be finite, got {}", self.angle));
        }
        let segments = (self.angle / self.angle_interval).ceil();
        if segments > MAX_SEGMENTS as f32 {
            return Some(format!(
                "angle / angle_interval gives {segments} segments, limit is {MAX_SEGMENTS}"
            ));
        }
        None
    }

    /// Number of segments a sweep produces.
    pub fn segment_count(&self) -> usize {
        if self.problem().is_some() || self.angle <= 0.0 {
            return 0;
        }
        (self.angle / self.angle_interval).ceil() as usize
    }
}

/// GPU vertex for slide meshes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SlideVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(SlideVertex, [f32; 10]);

impl SlideVertex {
    pub fn new(position: Vec3, normal: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        }
    }
}

/// One generated prism.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSegment {
    pub index: usize,
    /// Start angle in radians
    pub theta: f32,
    /// End angle in radians
    pub theta2: f32,
    pub height: f32,
    pub height2: f32,
    /// Local-space corners, see the module docs for the layout
    pub vertices: [Vec3; 8],
    pub tag: SurfaceTag,
    /// Transform of the generator the segment hangs under
    pub parent: Transform,
}

impl SlideSegment {
    pub fn indices(&self) -> &'static [u32] {
        &SEGMENT_INDICES
    }

    pub fn world_vertices(&self) -> [Vec3; 8] {
        self.vertices.map(|v| self.parent.transform_point(v))
    }

    /// World-space triangles, e.g. for a mesh collider.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        let world = self.world_vertices();
        self.indices()
            .chunks_exact(3)
            .map(move |tri| [world[tri[0] as usize], world[tri[1] as usize], world[tri[2] as usize]])
    }

    /// Flat-shaded mesh: three vertices per triangle with the face normal.
    pub fn generate_mesh(&self) -> (Vec<SlideVertex>, Vec<u32>) {
        let mut vertices = Vec::with_capacity(SEGMENT_INDICES.len());
        let mut indices = Vec::with_capacity(SEGMENT_INDICES.len());
        for [a, b, c] in self.triangles() {
            let normal = (b - a).cross(c - a).normalize_or_zero();
            for p in [a, b, c] {
                indices.push(vertices.len() as u32);
                vertices.push(SlideVertex::new(p, normal, SLIDE_COLOR));
            }
        }
        (vertices, indices)
    }
}

/// Generator placed at `transform`.
#[derive(Debug, Clone, Default)]
pub struct SlideGenerator {
    pub settings: SlideSettings,
    pub transform: Transform,
}

impl SlideGenerator {
    pub fn new(settings: SlideSettings, transform: Transform) -> Self {
        Self { settings, transform }
    }

    fn corner(radius: &Curve, theta: f32, height: f32) -> Vec3 {
        let r = radius.evaluate(theta);
        Vec3::new(theta.cos() * r, height, theta.sin() * r)
    }

    fn segment(&self, index: usize, theta: f32, theta2: f32, height: f32, height2: f32) -> SlideSegment {
        let s = &self.settings;
        let top = [
            Self::corner(&s.inner_radius, theta, height),
            Self::corner(&s.inner_radius, theta2, height2),
            Self::corner(&s.outer_radius, theta2, height2),
            Self::corner(&s.outer_radius, theta, height),
        ];
        let down = Vec3::new(0.0, s.bottom_offset, 0.0);
        SlideSegment {
            index,
            theta,
            theta2,
            height,
            height2,
            vertices: [
                top[0],
                top[1],
                top[2],
                top[3],
                top[0] - down,
                top[1] - down,
                top[2] - down,
                top[3] - down,
            ],
            tag: SurfaceTag::Slide,
            parent: self.transform,
        }
    }

    /// Run the sweep. Invalid settings produce no segments.
    pub fn generate(&self) -> Vec<SlideSegment> {
        if let Some(problem) = self.settings.problem() {
            warn!("slide not generated: {problem}");
            return Vec::new();
        }

        let step = self.settings.angle_interval.to_radians();
        let count = self.settings.segment_count();
        let mut segments = Vec::new();
        let mut height = 0.0;
        for index in 0..count {
            let theta = index as f32 * step;
            let delta = self.settings.delta_height.evaluate(theta);
            segments.push(self.segment(index, theta, theta + step, height, height + delta));
            height += delta;
        }

        info!("generated {} slide segments, total drop {:.2}", segments.len(), -height);
        segments
    }

    /// All segments merged into one flat-shaded mesh.
    pub fn generate_combined_mesh(&self) -> (Vec<SlideVertex>, Vec<u32>) {
        let segments = self.generate();
        let mut all_vertices = Vec::with_capacity(segments.len() * SEGMENT_INDICES.len());
        let mut all_indices = Vec::with_capacity(segments.len() * SEGMENT_INDICES.len());
        for segment in &segments {
            let (vertices, indices) = segment.generate_mesh();
            let base = all_vertices.len() as u32;
            all_vertices.extend(vertices);
            all_indices.extend(indices.into_iter().map(|i| i + base));
        }
        (all_vertices, all_indices)
    }
}
