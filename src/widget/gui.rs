use crate::input::InputSnapshot;
use crate::render::{Size, TextureHandle, TextureOrigin};

/// Flags for the child region hosting the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChildFlags {
    /// Draw a frame around the region.
    pub border: bool,
    /// Never show scrollbars.
    pub no_scrollbar: bool,
    /// Wheel events over the region do not scroll the parent.
    pub no_scroll_with_mouse: bool,
}

/// Texture coordinates of the image's top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// UV at the top-left corner.
    pub min: [f32; 2],
    /// UV at the bottom-right corner.
    pub max: [f32; 2],
}

impl UvRect {
    /// Texture shown as stored.
    pub const FULL: Self = Self {
        min: [0.0, 0.0],
        max: [1.0, 1.0],
    };

    /// Texture flipped vertically.
    pub const FLIPPED: Self = Self {
        min: [0.0, 1.0],
        max: [1.0, 0.0],
    };

    /// UVs that show a texture with the given row order upright.
    #[must_use]
    pub fn for_origin(origin: TextureOrigin) -> Self {
        match origin {
            TextureOrigin::TopLeft => Self::FULL,
            TextureOrigin::BottomLeft => Self::FLIPPED,
        }
    }
}

/// The rendered texture as handed to the GUI.
#[derive(Debug, Clone, Copy)]
pub struct TextureRef<'a> {
    /// Identity of the texture; a new generation means a new allocation.
    pub handle: TextureHandle,
    /// wgpu view of the texture, for GUIs rendering on the same device.
    pub view: Option<&'a wgpu::TextureView>,
}

/// What the embedding widget needs from an immediate-mode GUI for one
/// frame.
///
/// Sizes are in physical pixels. [`input_snapshot`](Self::input_snapshot)
/// reports the pointer relative to the image drawn by the last
/// [`image`](Self::image) call.
pub trait GuiFrame {
    /// Space left in the current layout.
    fn available_size(&self) -> Size;

    /// Physical pixels per logical GUI unit.
    fn pixels_per_point(&self) -> f32 {
        1.0
    }

    /// Open a child region of `size`.
    fn begin_child(&mut self, id: &str, size: Size, flags: ChildFlags);

    /// Close the region opened by [`begin_child`](Self::begin_child).
    fn end_child(&mut self);

    /// Draw `texture` filling `size` with the given texture coordinates.
    fn image(&mut self, texture: TextureRef<'_>, size: Size, uv: UvRect);

    /// Input seen by the image this frame.
    fn input_snapshot(&self) -> InputSnapshot;
}
