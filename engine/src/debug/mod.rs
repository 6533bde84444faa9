//! Debug visualization buffers.

pub mod lines;

pub use lines::{DebugLine, DebugLines, LineVertex, MAX_DEBUG_LINES};
