//! Off-screen texture render target.
//!
//! [`TextureRenderTarget`] owns the color/depth surface and the attached
//! sub-scenes. Each call to [`render`](TextureRenderTarget::render) makes
//! sure the surface matches the requested size, draws every scene and waits
//! for the GPU before handing back a [`TextureHandle`] the GUI can sample.
//!
//! GPU work goes through the [`SurfaceBackend`] trait; [`WgpuBackend`] is
//! the production implementation.

mod backend;
mod depth;
mod frame;
mod target;

pub use backend::{SurfaceBackend, WgpuBackend};
pub use depth::{DepthWindow, PixelRect};
pub use frame::{Frame, Smoothing};
pub use target::{RenderWindow, TextureRenderTarget};

use crate::camera::DisplayRect;
use crate::scene::Scene;

/// Pixel extent requested by the GUI. Panels may report zero or negative
/// sizes while collapsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Size from width and height.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both dimensions strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Length of the diagonal in pixels.
    #[must_use]
    pub fn diagonal(&self) -> f32 {
        (self.width as f32).hypot(self.height as f32)
    }

    /// Width over height, `1.0` when degenerate.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height > 0 {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }
}

/// Row order of the rendered texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureOrigin {
    /// Row 0 is the top of the image (wgpu render targets).
    TopLeft,
    /// Row 0 is the bottom of the image; GUIs must flip it vertically.
    BottomLeft,
}

/// Identifies the texture produced by a render.
///
/// `generation` increases by one every time the surface is reallocated, so
/// a changed handle means the GUI must re-register the texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    /// Allocation counter of the underlying surface.
    pub generation: u64,
    /// Surface size the texture was rendered at.
    pub size: Size,
}

/// Display-space rectangle covered by `scene` on a surface of `size`.
#[must_use]
pub fn scene_rect(scene: &dyn Scene, size: Size) -> DisplayRect {
    let [x0, y0, x1, y1] = scene.viewport();
    let (w, h) = (size.width as f32, size.height as f32);
    DisplayRect {
        x: x0 * w,
        y: y0 * h,
        width: (x1 - x0) * w,
        height: (y1 - y0) * h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_requires_both_dimensions() {
        assert!(Size::new(1, 1).is_positive());
        assert!(!Size::new(0, 300).is_positive());
        assert!(!Size::new(400, 0).is_positive());
        assert!(!Size::new(-5, 300).is_positive());
    }

    #[test]
    fn diagonal_of_three_four_five() {
        assert_eq!(Size::new(3, 4).diagonal(), 5.0);
    }
}
