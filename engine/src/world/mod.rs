//! World Module
//!
//! Procedural level geometry: the spiral slide and the keyframe curves that shape it.

pub mod curve;
pub mod slide_generator;

pub use curve::{Curve, Keyframe};
pub use slide_generator::{
    MAX_SEGMENTS, SEGMENT_INDICES, SlideGenerator, SlideSegment, SlideSettings, SlideVertex, SurfaceTag,
};
