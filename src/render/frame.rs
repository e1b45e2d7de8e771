use crate::camera::DisplayRect;

/// Antialiasing hints forwarded to scenes. The off-screen surface itself is
/// single-sampled so its depth can be read back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Smoothing {
    /// Smooth line primitives.
    pub lines: bool,
    /// Smooth point primitives.
    pub points: bool,
    /// Smooth polygon edges.
    pub polygons: bool,
}

/// Per-scene drawing context handed to [`Scene::draw`](crate::scene::Scene::draw).
///
/// The surface has already been cleared; scenes load both attachments and
/// draw on top.
pub struct Frame<'a> {
    /// Device the surface lives on.
    pub device: &'a wgpu::Device,
    /// Queue for buffer uploads.
    pub queue: &'a wgpu::Queue,
    /// Encoder shared by every scene this frame.
    pub encoder: &'a mut wgpu::CommandEncoder,
    /// Color attachment view.
    pub color: &'a wgpu::TextureView,
    /// Depth attachment view.
    pub depth: &'a wgpu::TextureView,
    /// Surface format of [`color`](Self::color).
    pub color_format: wgpu::TextureFormat,
    /// Surface format of [`depth`](Self::depth).
    pub depth_format: wgpu::TextureFormat,
    /// Full surface extent in pixels.
    pub surface_size: (u32, u32),
    /// Region of the surface this scene draws into.
    pub viewport: DisplayRect,
    /// Antialiasing hints.
    pub smoothing: Smoothing,
}

impl Frame<'_> {
    /// Aspect ratio of this scene's viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.viewport.aspect()
    }

    /// Begin a render pass that loads both attachments and is restricted to
    /// this scene's viewport.
    pub fn begin_pass(&mut self, label: &str) -> wgpu::RenderPass<'_> {
        let mut pass =
            self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.color,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: self.depth,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        let vp = self.viewport;
        // wgpu viewports are top-left based.
        let top = self.surface_size.1 as f32 - (vp.y + vp.height);
        pass.set_viewport(vp.x, top, vp.width, vp.height, 0.0, 1.0);
        pass
    }
}
