//! Debug Line Buffer
//!
//! Per-tick queue of `(origin, offset, color)` segments. Gameplay code pushes
//! while it updates; the drawing layer drains the whole buffer once per frame.
//! Pushes past the capacity are dropped and counted.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Maximum number of lines kept per frame.
pub const MAX_DEBUG_LINES: usize = 256;

/// Velocity ray color.
pub const VELOCITY_COLOR: Vec4 = Vec4::new(0.2, 0.9, 0.2, 1.0);
/// Camera ray color on a clear path.
pub const CAMERA_CLEAR_COLOR: Vec4 = Vec4::new(0.2, 0.6, 1.0, 1.0);
/// Camera ray color while obstructed.
pub const CAMERA_OBSTRUCTED_COLOR: Vec4 = Vec4::new(1.0, 0.25, 0.2, 1.0);

/// Camera look input color.
pub const CAMERA_INPUT_COLOR: Vec4 = Vec4::new(1.0, 0.85, 0.1, 1.0);

/// One segment from `origin` to `origin + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub origin: Vec3,
    pub offset: Vec3,
    pub color: Vec4,
}

impl DebugLine {
    pub fn end(&self) -> Vec3 {
        self.origin + self.offset
    }
}

/// Line-list vertex for a debug draw pass.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(LineVertex, [u8; 28]);

/// Bounded line queue.
#[derive(Debug, Clone)]
pub struct DebugLines {
    lines: Vec<DebugLine>,
    capacity: usize,
    dropped: usize,
}

impl Default for DebugLines {
    fn default() -> Self {
        Self::new(MAX_DEBUG_LINES)
    }
}

impl DebugLines {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Queue a line. Returns false if the buffer is full.
    pub fn push(&mut self, origin: Vec3, offset: Vec3, color: Vec4) -> bool {
        if self.lines.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.lines.push(DebugLine { origin, offset, color });
        true
    }

    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines rejected since the last drain.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Take every queued line and reset the drop counter.
    pub fn drain(&mut self) -> std::vec::Drain<'_, DebugLine> {
        if self.dropped > 0 {
            log::debug!("debug line buffer full, dropped {} lines", self.dropped);
            self.dropped = 0;
        }
        self.lines.drain(..)
    }

    /// Drain into line-list vertices (two per line).
    pub fn drain_vertices(&mut self) -> Vec<LineVertex> {
        let mut vertices = Vec::with_capacity(self.lines.len() * 2);
        for line in self.drain() {
            let color = line.color.to_array();
            vertices.push(LineVertex { position: line.origin.to_array(), color });
            vertices.push(LineVertex { position: line.end().to_array(), color });
        }
        vertices
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.dropped = 0;
    }
}
