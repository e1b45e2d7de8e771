use super::{
    scene_rect, DepthWindow, Frame, PixelRect, Size, Smoothing, TextureOrigin,
};
use crate::error::EmbedError;
use crate::gpu::readback;
use crate::gpu::render_context::RenderContext;
use crate::gpu::surface::{RenderSurface, COLOR_FORMAT, DEPTH_FORMAT};
use crate::scene::Scene;

/// GPU operations the render target needs.
///
/// Implementations own the device-side state; the target owns the
/// surface value and decides when to allocate, draw and release.
pub trait SurfaceBackend: Send {
    /// Allocated color + depth surface.
    type Surface: Send;

    /// Allocate a surface of the given positive size.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Render`] if allocation fails.
    fn allocate(&mut self, size: Size) -> Result<Self::Surface, EmbedError>;

    /// Release a surface.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Render`] if the driver reports an error.
    fn release(&mut self, surface: Self::Surface) -> Result<(), EmbedError>;

    /// Clear the surface to `background` and draw every scene in order.
    ///
    /// # Errors
    ///
    /// Propagates scene draw errors.
    fn draw(
        &mut self,
        surface: &Self::Surface,
        scenes: &mut [Box<dyn Scene>],
        background: [f32; 4],
        smoothing: Smoothing,
    ) -> Result<(), EmbedError>;

    /// Block until the last draw has finished on the GPU.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Render`] if the device is lost.
    fn wait_for_completion(&mut self) -> Result<(), EmbedError>;

    /// Read depth samples under `rect` (display coordinates).
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Render`] if the readback fails.
    fn read_depth(
        &mut self,
        surface: &Self::Surface,
        rect: PixelRect,
    ) -> Result<DepthWindow, EmbedError>;

    /// Row order of the color texture.
    fn origin(&self) -> TextureOrigin;

    /// Color view the GUI can sample, when the surface lives on a wgpu
    /// device.
    fn color_view<'s>(
        &self,
        surface: &'s Self::Surface,
    ) -> Option<&'s wgpu::TextureView> {
        let _ = surface;
        None
    }
}

/// [`SurfaceBackend`] drawing with wgpu into a [`RenderSurface`].
pub struct WgpuBackend {
    context: RenderContext,
    last_submission: Option<wgpu::SubmissionIndex>,
}

impl WgpuBackend {
    /// Backend on the given device.
    #[must_use]
    pub fn new(context: RenderContext) -> Self {
        Self {
            context,
            last_submission: None,
        }
    }

    /// The device and queue this backend renders with.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    fn clear(
        encoder: &mut wgpu::CommandEncoder,
        surface: &RenderSurface,
        background: [f32; 4],
    ) {
        let [r, g, b, a] = background.map(f64::from);
        let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Embedded Clear Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &surface.color_view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &surface.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
    }
}

impl SurfaceBackend for WgpuBackend {
    type Surface = RenderSurface;

    fn allocate(&mut self, size: Size) -> Result<RenderSurface, EmbedError> {
        let device = &self.context.device;
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let surface = RenderSurface::new(
            device,
            size.width as u32,
            size.height as u32,
        );
        let validation = pollster::block_on(device.pop_error_scope());
        let oom = pollster::block_on(device.pop_error_scope());
        match validation.or(oom) {
            Some(e) => Err(EmbedError::Render(format!(
                "allocating {}x{} surface: {e}",
                size.width, size.height
            ))),
            None => Ok(surface),
        }
    }

    fn release(&mut self, surface: RenderSurface) -> Result<(), EmbedError> {
        surface.release(&self.context.device)
    }

    fn draw(
        &mut self,
        surface: &RenderSurface,
        scenes: &mut [Box<dyn Scene>],
        background: [f32; 4],
        smoothing: Smoothing,
    ) -> Result<(), EmbedError> {
        let mut encoder = self.context.create_encoder();
        Self::clear(&mut encoder, surface, background);

        let (width, height) = surface.size();
        let size = Size::new(width as i32, height as i32);
        for scene in scenes.iter_mut() {
            let viewport = scene_rect(scene.as_ref(), size);
            if viewport.width <= 0.0 || viewport.height <= 0.0 {
                continue;
            }
            let mut frame = Frame {
                device: &self.context.device,
                queue: &self.context.queue,
                encoder: &mut encoder,
                color: &surface.color_view,
                depth: &surface.depth_view,
                color_format: COLOR_FORMAT,
                depth_format: DEPTH_FORMAT,
                surface_size: (width, height),
                viewport,
                smoothing,
            };
            scene.draw(&mut frame)?;
        }

        self.last_submission = Some(self.context.submit(encoder));
        Ok(())
    }

    fn wait_for_completion(&mut self) -> Result<(), EmbedError> {
        let submission_index = self.last_submission.take();
        self.context
            .device
            .poll(wgpu::PollType::Wait {
                submission_index,
                timeout: None,
            })
            .map(|_| ())
            .map_err(|e| EmbedError::Render(format!("waiting for GPU: {e}")))
    }

    fn read_depth(
        &mut self,
        surface: &RenderSurface,
        rect: PixelRect,
    ) -> Result<DepthWindow, EmbedError> {
        readback::read_depth(
            &self.context.device,
            &self.context.queue,
            surface,
            rect,
        )
    }

    fn origin(&self) -> TextureOrigin {
        TextureOrigin::TopLeft
    }

    fn color_view<'s>(
        &self,
        surface: &'s RenderSurface,
    ) -> Option<&'s wgpu::TextureView> {
        Some(&surface.color_view)
    }
}
