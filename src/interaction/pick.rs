//! Depth-buffer picking under the pointer.

use glam::{IVec2, Vec3};

use crate::error::EmbedError;
use crate::render::{scene_rect, DepthWindow, PixelRect, RenderWindow};

/// Default pick tolerance, as a fraction of the window diagonal.
pub const DEFAULT_TOLERANCE: f32 = 0.002;

/// Constant added to the squared screen distance so depth dominates for
/// samples right next to the pointer.
const SCREEN_DISTANCE_BIAS: f32 = 101.0;

/// Sample of `window` that minimizes `depth * (screen_dist² + 101)`.
///
/// Only samples in front of the far plane (`depth < 1.0`) are candidates.
/// Ties keep the first sample in scan order (bottom row first, left to
/// right). Returns the pixel and its depth.
#[must_use]
pub fn select_nearest(window: &DepthWindow, center: IVec2) -> Option<(IVec2, f32)> {
    let mut best: Option<(IVec2, f32, f32)> = None;
    for (pixel, depth) in window.iter() {
        if depth >= 1.0 {
            continue;
        }
        let offset = pixel - center;
        let screen = offset.length_squared() as f32;
        let score = depth * (screen + SCREEN_DISTANCE_BIAS);
        if best.is_none_or(|(_, _, s)| score < s) {
            best = Some((pixel, depth, score));
        }
    }
    best.map(|(pixel, depth, _)| (pixel, depth))
}

/// Square of side `2 * ceil(tolerance * diagonal) + 1` around `position`.
#[must_use]
pub fn pick_rect(window: &dyn RenderWindow, position: IVec2, tolerance: f32) -> PixelRect {
    let extent = (tolerance * window.size().diagonal()).ceil() as i32;
    PixelRect::around(position, extent.max(0))
}

/// World point of the geometry nearest to `position` (display coordinates),
/// unprojected with the camera of the sub-scene at `scene`.
///
/// Returns `Ok(None)` when nothing was drawn inside the pick window.
///
/// # Errors
///
/// Propagates depth readback failures.
pub fn acquire(
    window: &mut dyn RenderWindow,
    scene: usize,
    position: IVec2,
    tolerance: f32,
) -> Result<Option<Vec3>, EmbedError> {
    if !window.size().is_positive() {
        return Ok(None);
    }
    let rect = pick_rect(window, position, tolerance);
    let depth = window.read_depth(rect)?;
    let Some((pixel, z)) = select_nearest(&depth, position) else {
        return Ok(None);
    };
    let size = window.size();
    let Some(scene) = window.scenes().get(scene) else {
        return Ok(None);
    };
    let viewport = scene_rect(scene.as_ref(), size);
    let display = Vec3::new(pixel.x as f32 + 0.5, pixel.y as f32 + 0.5, z);
    let world = scene.camera().display_to_world(display, &viewport);
    Ok(world.is_finite().then_some(world))
}
