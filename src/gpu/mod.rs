//! GPU resource management utilities.
//!
//! Provides wgpu device initialization, the off-screen color/depth surface
//! and synchronous depth readback.

/// Synchronous depth-buffer readback.
pub mod readback;
/// wgpu device and queue initialization.
pub mod render_context;
/// Off-screen color + depth render surface.
pub mod surface;
