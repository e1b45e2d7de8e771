//! Standalone window hosting one [`EmbeddedViewport`] in an egui central
//! panel.

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use super::egui_frame::{EguiFrame, EguiTextures};
use super::EmbeddedViewport;
use crate::error::EmbedError;
use crate::gpu::render_context::RenderContext;

/// Run the host until its window closes or the viewport is closed.
pub(crate) fn run(viewport: EmbeddedViewport) -> Result<(), EmbedError> {
    let event_loop = event_loop()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = HostApp {
        viewport,
        egui_ctx: egui::Context::default(),
        textures: EguiTextures::new(),
        window: None,
        gpu: None,
        result: Ok(()),
    };
    event_loop
        .run_app(&mut app)
        .map_err(|e| EmbedError::Host(e.to_string()))?;
    app.viewport.close();
    app.result
}

fn event_loop() -> Result<EventLoop<()>, EmbedError> {
    let mut builder = EventLoop::builder();
    #[cfg(target_os = "linux")]
    {
        use winit::platform::{
            wayland::EventLoopBuilderExtWayland, x11::EventLoopBuilderExtX11,
        };
        let _ = EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
        let _ = EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    }
    #[cfg(target_os = "windows")]
    {
        use winit::platform::windows::EventLoopBuilderExtWindows;
        let _ = builder.with_any_thread(true);
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    if std::thread::current().name() != Some("main") {
        return Err(EmbedError::Host(
            "the standalone host can only run on the main thread on this \
             platform"
                .to_owned(),
        ));
    }
    builder
        .build()
        .map_err(|e| EmbedError::Host(e.to_string()))
}

struct HostGpu {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct HostApp {
    viewport: EmbeddedViewport,
    egui_ctx: egui::Context,
    textures: EguiTextures,
    window: Option<Arc<Window>>,
    gpu: Option<HostGpu>,
    result: Result<(), EmbedError>,
}

impl HostApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EmbedError) {
        log::error!("{error}");
        self.result = Err(error);
        event_loop.exit();
    }

    fn create_gpu(&self, window: &Arc<Window>) -> Result<HostGpu, EmbedError> {
        let context = self.viewport.context();
        let inner = window.inner_size();
        let (surface, mut config) = context
            .create_surface(Arc::clone(window), (inner.width, inner.height))?;
        // egui expects a linear framebuffer.
        if let Some(adapter) = context.adapter() {
            let caps = surface.get_capabilities(adapter);
            if let Some(format) = caps.formats.iter().find(|f| !f.is_srgb()) {
                config.format = *format;
                surface.configure(&context.device, &config);
            }
        }

        let renderer = egui_wgpu::Renderer::new(
            &context.device,
            config.format,
            egui_wgpu::RendererOptions::default(),
        );
        let state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &**window,
            Some(window.scale_factor() as f32),
            window.theme(),
            Some(context.device.limits().max_texture_dimension_2d as usize),
        );
        Ok(HostGpu {
            surface,
            config,
            state,
            renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.config.width = width.max(1);
        gpu.config.height = height.max(1);
        gpu.surface
            .configure(&self.viewport.context().device, &gpu.config);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu)) = (self.window.clone(), self.gpu.as_mut())
        else {
            return;
        };
        let started = Instant::now();
        let context = self.viewport.context().clone();

        let raw_input = gpu.state.take_egui_input(&window);
        let mut frame_result = Ok(None);
        let mut input_taken = false;
        let viewport = &mut self.viewport;
        let textures = &mut self.textures;
        let renderer = &mut gpu.renderer;
        // egui reruns the closure when a pass is discarded; input belongs
        // to the first pass only.
        let mut output = self.egui_ctx.run(raw_input, |ctx| {
            let _ = egui::CentralPanel::default()
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    let mut gui =
                        EguiFrame::new(ui, textures, renderer, &context.device);
                    frame_result = if input_taken {
                        viewport.draw_only(&mut gui, None)
                    } else {
                        input_taken = true;
                        viewport.frame(&mut gui, None)
                    };
                });
        });
        gpu.state.handle_platform_output(
            &window,
            std::mem::take(&mut output.platform_output),
        );
        if let Err(e) = frame_result {
            self.fail(event_loop, e);
            return;
        }

        present(gpu, &context, &window, &self.egui_ctx, output);
        log::trace!("host frame in {:?}", started.elapsed());

        if self.viewport.is_closed() {
            event_loop.exit();
        } else {
            window.request_redraw();
        }
    }
}

/// Tessellate one egui frame and draw it to the window surface.
fn present(
    gpu: &mut HostGpu,
    context: &RenderContext,
    window: &Window,
    egui_ctx: &egui::Context,
    output: egui::FullOutput,
) {
    let frame = match gpu.surface.get_current_texture() {
        Ok(frame) => frame,
        Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
            gpu.surface.configure(&context.device, &gpu.config);
            window.request_redraw();
            return;
        }
        Err(e) => {
            log::warn!("skipping host frame: {e}");
            window.request_redraw();
            return;
        }
    };
    let view = frame
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let screen = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [gpu.config.width, gpu.config.height],
        pixels_per_point: output.pixels_per_point,
    };
    let primitives = egui_ctx.tessellate(output.shapes, output.pixels_per_point);
    for (id, delta) in &output.textures_delta.set {
        gpu.renderer
            .update_texture(&context.device, &context.queue, *id, delta);
    }

    let mut encoder = context.create_encoder();
    let commands = gpu.renderer.update_buffers(
        &context.device,
        &context.queue,
        &mut encoder,
        &primitives,
        &screen,
    );
    {
        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Host GUI Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();
        gpu.renderer.render(&mut pass, &primitives, &screen);
    }
    let _ = context
        .queue
        .submit(commands.into_iter().chain(std::iter::once(encoder.finish())));
    frame.present();
    for id in &output.textures_delta.free {
        gpu.renderer.free_texture(id);
    }
}

impl ApplicationHandler for HostApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let options = &self.viewport.options().window;
        let [width, height] = options.size;
        let attrs = Window::default_attributes()
            .with_title(&options.title)
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, EmbedError::Host(e.to_string()));
                return;
            }
        };
        match self.create_gpu(&window) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.viewport.close();
            event_loop.exit();
            return;
        }
        let (Some(window), Some(gpu)) = (self.window.as_ref(), self.gpu.as_mut())
        else {
            return;
        };
        let response = gpu.state.on_window_event(window, &event);
        if response.repaint {
            window.request_redraw();
        }

        match event {
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewport.is_closed() {
            event_loop.exit();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = self.gpu.as_mut() {
            self.textures.free(&mut gpu.renderer);
        }
    }
}
