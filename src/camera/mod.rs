//! Camera model for the embedded scenes.
//!
//! Provides a look-at camera with trackball-style motion primitives,
//! display/world conversion and bounds-based framing.

/// Axis-aligned bounds used for camera framing.
pub mod bounds;
/// Core camera struct and GPU uniform type.
pub mod core;

pub use self::bounds::Bounds;
pub use self::core::{Camera, CameraUniform, DisplayRect};
