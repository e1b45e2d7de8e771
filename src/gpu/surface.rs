//! Off-screen color + depth render surface.

use crate::error::EmbedError;

/// Color format of the composited texture. `egui-wgpu` can only register
/// native textures in this format.
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Depth format. Single-sample `Depth32Float` can be copied to a buffer,
/// which pivot picking relies on.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A color texture and a depth texture of the same extent, plus their
/// default views.
///
/// The color texture is created with `RENDER_ATTACHMENT | TEXTURE_BINDING |
/// COPY_SRC` usage so it can be drawn into, sampled by the GUI renderer and
/// read back. The depth texture is `RENDER_ATTACHMENT | COPY_SRC`.
pub struct RenderSurface {
    /// RGBA8 color attachment.
    pub color: wgpu::Texture,
    /// Full view of [`color`](Self::color).
    pub color_view: wgpu::TextureView,
    /// Depth attachment.
    pub depth: wgpu::Texture,
    /// Full view of [`depth`](Self::depth).
    pub depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl RenderSurface {
    /// Allocate both attachments at the given extent.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Embedded Color Target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Embedded Depth Target"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let color_view =
            color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view =
            depth.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            color,
            color_view,
            depth,
            depth_view,
            width,
            height,
        }
    }

    /// Extent in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Destroy both textures, reporting any validation error the driver
    /// raises while doing so.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Render`] if the device reports an error inside
    /// the release scope.
    pub fn release(self, device: &wgpu::Device) -> Result<(), EmbedError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        self.color.destroy();
        self.depth.destroy();
        match pollster::block_on(device.pop_error_scope()) {
            Some(e) => Err(EmbedError::Render(format!(
                "releasing {}x{} surface: {e}",
                self.width, self.height
            ))),
            None => Ok(()),
        }
    }
}
