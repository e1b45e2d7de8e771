use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::gui::{ChildFlags, GuiFrame, TextureRef, UvRect};
use super::registry::{self, BackendEntry};
use crate::error::EmbedError;
use crate::gpu::render_context::RenderContext;
use crate::input::EventTranslator;
use crate::interaction::{
    CameraStyle, InteractionController, Interactor, PickCallback, PivotStyle,
    Trackball,
};
use crate::options::{GuiBackend, Options};
use crate::render::{
    RenderWindow, Size, Smoothing, SurfaceBackend, TextureHandle,
    TextureRenderTarget, WgpuBackend,
};
use crate::scene::Scene;

const CHILD_ID: &str = "##Viewport";

/// Callback run once when the viewport closes.
pub type BeforeClose = Box<dyn FnOnce() + Send>;

/// Join handle of a standalone host running on a worker thread.
pub type HostHandle = JoinHandle<Result<(), EmbedError>>;

/// Requests a viewport close from any thread.
#[derive(Debug, Clone)]
pub struct CloseHandle(Arc<AtomicBool>);

impl CloseHandle {
    /// Ask the viewport to close. Its host exits on the next frame.
    pub fn close(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a close was requested or performed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A 3D view rendered off-screen and shown as an image inside an
/// immediate-mode GUI, with pointer and key input driving its camera.
///
/// Call [`frame`](Self::frame) once per GUI frame from inside a window or
/// panel, or hand the whole viewport to [`show`](EmbeddedViewport::show)
/// for a standalone window.
pub struct EmbeddedViewport<B: SurfaceBackend = WgpuBackend> {
    options: Options,
    gui_backend: &'static BackendEntry,
    target: TextureRenderTarget<B>,
    interactor: Interactor,
    translator: EventTranslator,
    before_close: Option<BeforeClose>,
    closed: Arc<AtomicBool>,
}

impl EmbeddedViewport<WgpuBackend> {
    /// Viewport on a new headless device.
    ///
    /// # Errors
    ///
    /// Invalid options, an unavailable GUI backend, or GPU initialization
    /// failure.
    pub fn new(options: Options) -> Result<Self, EmbedError> {
        options.validate()?;
        let context = pollster::block_on(RenderContext::new_headless())?;
        Self::with_context(options, context)
    }

    /// Viewport rendering on an existing device, typically the one the
    /// host GUI renders with so the texture can be sampled directly.
    ///
    /// # Errors
    ///
    /// Invalid options or an unavailable GUI backend.
    pub fn with_context(
        options: Options,
        context: RenderContext,
    ) -> Result<Self, EmbedError> {
        Self::with_backend(options, WgpuBackend::new(context))
    }

    /// Device and queue the viewport renders with.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        self.target.backend().context()
    }

    /// Open a standalone window hosting this viewport.
    ///
    /// Blocks until the window closes, unless
    /// [`background_thread`](crate::options::WindowOptions::background_thread)
    /// is set, in which case the host runs on a worker thread and its join
    /// handle is returned.
    ///
    /// # Errors
    ///
    /// [`EmbedError::BackendUnavailable`] without the `egui` feature,
    /// [`EmbedError::ThreadSpawn`] if the worker cannot start, and host
    /// failures when running in the foreground.
    pub fn show(
        mut self,
        title: &str,
        size: [u32; 2],
        before_close: Option<BeforeClose>,
    ) -> Result<Option<HostHandle>, EmbedError> {
        let host = registry::lookup(GuiBackend::Egui)?;
        if size[0] == 0 || size[1] == 0 {
            return Err(EmbedError::InvalidConfiguration(format!(
                "window size must be positive, got {}x{}",
                size[0], size[1]
            )));
        }
        title.clone_into(&mut self.options.window.title);
        self.options.window.size = size;
        if before_close.is_some() {
            self.before_close = before_close;
        }
        log::debug!("showing viewport in a standalone {} window", host.name);

        if self.options.window.background_thread {
            let handle = std::thread::Builder::new()
                .name("embedview-host".to_owned())
                .spawn(move || self.run_host())
                .map_err(EmbedError::ThreadSpawn)?;
            Ok(Some(handle))
        } else {
            self.run_host()?;
            Ok(None)
        }
    }

    #[cfg(feature = "egui")]
    fn run_host(self) -> Result<(), EmbedError> {
        super::host::run(self)
    }

    #[cfg(not(feature = "egui"))]
    fn run_host(self) -> Result<(), EmbedError> {
        drop(self);
        registry::lookup(GuiBackend::Egui).map(|_| ())
    }
}

impl<B: SurfaceBackend> EmbeddedViewport<B> {
    /// Viewport drawing through `backend`.
    ///
    /// # Errors
    ///
    /// Invalid options or an unavailable GUI backend.
    pub fn with_backend(options: Options, backend: B) -> Result<Self, EmbedError> {
        options.validate()?;
        let gui_backend = registry::lookup(options.window.backend)?;

        let mut target = TextureRenderTarget::new(backend);
        target.set_background(options.window.clear_color);
        target.set_smoothing(Smoothing {
            lines: options.window.line_smoothing,
            points: options.window.point_smoothing,
            polygons: options.window.polygon_smoothing,
        });

        Ok(Self {
            interactor: Interactor::new(InteractionController::from_options(
                &options,
            )),
            translator: EventTranslator::new(options.interaction.pointer_policy),
            gui_backend,
            target,
            options,
            before_close: None,
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Render and place the viewport in the current GUI layout, then feed
    /// this frame's input to the camera.
    ///
    /// `size` defaults to the space the GUI has left. Input is only
    /// processed once a texture exists.
    ///
    /// # Errors
    ///
    /// Render failures; the child region is not opened in that case.
    pub fn frame(
        &mut self,
        gui: &mut dyn GuiFrame,
        size: Option<Size>,
    ) -> Result<Option<TextureHandle>, EmbedError> {
        self.place(gui, size, true)
    }

    /// Like [`frame`](Self::frame) but leaves this frame's input alone.
    ///
    /// For GUI passes repeated within one host frame, whose input has
    /// already been processed.
    ///
    /// # Errors
    ///
    /// Render failures.
    pub fn draw_only(
        &mut self,
        gui: &mut dyn GuiFrame,
        size: Option<Size>,
    ) -> Result<Option<TextureHandle>, EmbedError> {
        self.place(gui, size, false)
    }

    fn place(
        &mut self,
        gui: &mut dyn GuiFrame,
        size: Option<Size>,
        process_input: bool,
    ) -> Result<Option<TextureHandle>, EmbedError> {
        let size = size.unwrap_or_else(|| gui.available_size());
        let handle = self.render(size)?;

        gui.begin_child(
            CHILD_ID,
            size,
            ChildFlags {
                border: self.options.window.border,
                no_scrollbar: true,
                no_scroll_with_mouse: true,
            },
        );
        if let Some(handle) = handle {
            let texture = TextureRef {
                handle,
                view: self.target.color_view(),
            };
            gui.image(texture, size, UvRect::for_origin(self.target.origin()));
            if process_input {
                let snapshot = gui.input_snapshot();
                self.translator.process(
                    &snapshot,
                    &mut self.interactor.bind(&mut self.target),
                );
            }
        }
        gui.end_child();
        Ok(handle)
    }

    /// Render at `size` without touching any GUI.
    ///
    /// # Errors
    ///
    /// Allocation, draw and GPU wait failures.
    pub fn render(&mut self, size: Size) -> Result<Option<TextureHandle>, EmbedError> {
        self.interactor.refresh(&mut self.target);
        self.target.render(size)
    }

    /// Run the before-close callback (once) and mark the viewport closed.
    pub fn close(&mut self) {
        if let Some(callback) = self.before_close.take() {
            callback();
        }
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Whether [`close`](Self::close) ran or a [`CloseHandle`] requested it.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Handle that can close the viewport from another thread.
    #[must_use]
    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle(Arc::clone(&self.closed))
    }

    /// Replace the before-close callback.
    pub fn set_before_close(&mut self, callback: Option<BeforeClose>) {
        self.before_close = callback;
    }

    /// Switch to pivot-point interaction with the configured parameters.
    pub fn enable_pivot_style(&mut self) {
        let style = PivotStyle::new(&self.options.interaction, &self.options.pivot);
        self.install_style(Box::new(style));
    }

    /// Switch to focal-point trackball interaction.
    pub fn enable_trackball_style(&mut self) {
        let style = Trackball::new(&self.options.interaction);
        self.install_style(Box::new(style));
    }

    fn install_style(&mut self, style: Box<dyn CameraStyle>) {
        for scene in self.target.scenes_mut() {
            scene.set_pivot_marker(None);
        }
        self.interactor.controller_mut().set_style(style);
    }

    /// The pivot style, if it is the installed one.
    pub fn pivot_style_mut(&mut self) -> Option<&mut PivotStyle> {
        self.interactor.controller_mut().pivot_style_mut()
    }

    /// Callback for the pick key.
    pub fn set_pick_callback(&mut self, callback: Option<PickCallback>) {
        self.interactor.controller_mut().set_pick_callback(callback);
    }

    /// Attach a sub-scene.
    pub fn add_scene(&mut self, scene: Box<dyn Scene>) {
        self.target.add_scene(scene);
    }

    /// Detach the sub-scene at `index`.
    pub fn remove_scene(&mut self, index: usize) -> Option<Box<dyn Scene>> {
        self.target.remove_scene(index)
    }

    /// Options the viewport was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// GUI backend selected by the options.
    #[must_use]
    pub fn gui_backend(&self) -> &'static BackendEntry {
        self.gui_backend
    }

    /// The off-screen target.
    #[must_use]
    pub fn target(&self) -> &TextureRenderTarget<B> {
        &self.target
    }

    /// Mutable access to the off-screen target.
    pub fn target_mut(&mut self) -> &mut TextureRenderTarget<B> {
        &mut self.target
    }

    /// The event receiver.
    #[must_use]
    pub fn interactor(&self) -> &Interactor {
        &self.interactor
    }

    /// Mutable access to the event receiver, e.g. to rebind keys.
    pub fn interactor_mut(&mut self) -> &mut Interactor {
        &mut self.interactor
    }
}
