//! Scene collaborator interface.
//!
//! The embedded viewport does not own a scene graph. Applications implement
//! [`Scene`] for each sub-scene they attach to a
//! [`TextureRenderTarget`](crate::render::TextureRenderTarget); the target
//! and the interaction layer only go through this trait.

mod marker;

pub use marker::{PivotMarker, SphereMesh};

use crate::camera::{Bounds, Camera};
use crate::error::EmbedError;
use crate::render::Frame;

/// A sub-scene drawn into the shared off-screen surface.
///
/// Sub-scenes are drawn in attachment order, each into its own normalized
/// viewport. Camera interaction is routed to the interactive sub-scene
/// under the pointer.
pub trait Scene: Send {
    /// Active camera.
    fn camera(&self) -> &Camera;

    /// Mutable access to the active camera.
    fn camera_mut(&mut self) -> &mut Camera;

    /// Bounds of the visible geometry, `None` if nothing is visible.
    fn visible_bounds(&self) -> Option<Bounds>;

    /// Normalized `[xmin, ymin, xmax, ymax]` region of the surface, origin
    /// at the bottom-left.
    fn viewport(&self) -> [f32; 4] {
        [0.0, 0.0, 1.0, 1.0]
    }

    /// Whether pointer interaction may select this sub-scene.
    fn is_interactive(&self) -> bool {
        true
    }

    /// Frame all visible geometry for the given viewport aspect ratio.
    fn reset_camera(&mut self, aspect: f32) {
        if let Some(bounds) = self.visible_bounds() {
            self.camera_mut().reset_to_bounds(&bounds, aspect);
        }
    }

    /// Refit the camera clipping planes around the visible geometry.
    fn reset_camera_clipping_range(&mut self) {
        if let Some(bounds) = self.visible_bounds() {
            self.camera_mut().reset_clipping_range(&bounds);
        }
    }

    /// Show (`Some`) or hide (`None`) the pivot marker. Scenes that do not
    /// draw a marker can ignore this.
    fn set_pivot_marker(&mut self, marker: Option<&PivotMarker>) {
        let _ = marker;
    }

    /// Record draw commands for this sub-scene.
    ///
    /// # Errors
    ///
    /// Implementations return [`EmbedError::Render`] for GPU failures they
    /// detect; the target propagates them out of `render`.
    fn draw(&mut self, frame: &mut Frame<'_>) -> Result<(), EmbedError>;
}
