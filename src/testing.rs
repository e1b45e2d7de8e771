//! In-memory stand-ins for the GPU, the GUI and application scenes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::camera::{Bounds, Camera};
use crate::error::EmbedError;
use crate::input::{CanonicalEvent, EventInformation, InputSnapshot};
use crate::interaction::InteractionEngine;
use crate::render::{
    DepthWindow, Frame, PixelRect, RenderWindow, Size, Smoothing,
    SurfaceBackend, TextureOrigin,
};
use crate::scene::{PivotMarker, Scene};
use crate::widget::{ChildFlags, GuiFrame, TextureRef, UvRect};

/// Calls seen by a [`FakeBackend`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BackendStats {
    pub allocations: usize,
    pub releases: usize,
    pub draws: usize,
    pub waits: usize,
}

/// Surface of a [`FakeBackend`]: just its size.
#[derive(Debug)]
pub(crate) struct FakeSurface {
    pub size: Size,
}

/// Backend that counts calls and never touches a GPU. Scenes are not
/// drawn since a [`Frame`] needs a real device.
#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    stats: BackendStats,
    pub fail_release: bool,
}

impl FakeBackend {
    pub fn stats(&self) -> BackendStats {
        self.stats
    }
}

impl SurfaceBackend for FakeBackend {
    type Surface = FakeSurface;

    fn allocate(&mut self, size: Size) -> Result<FakeSurface, EmbedError> {
        self.stats.allocations += 1;
        Ok(FakeSurface { size })
    }

    fn release(&mut self, surface: FakeSurface) -> Result<(), EmbedError> {
        self.stats.releases += 1;
        if self.fail_release {
            return Err(EmbedError::Render(format!(
                "release of {}x{} surface failed",
                surface.size.width, surface.size.height
            )));
        }
        Ok(())
    }

    fn draw(
        &mut self,
        _surface: &FakeSurface,
        _scenes: &mut [Box<dyn Scene>],
        _background: [f32; 4],
        _smoothing: Smoothing,
    ) -> Result<(), EmbedError> {
        self.stats.draws += 1;
        Ok(())
    }

    fn wait_for_completion(&mut self) -> Result<(), EmbedError> {
        self.stats.waits += 1;
        Ok(())
    }

    fn read_depth(
        &mut self,
        _surface: &FakeSurface,
        rect: PixelRect,
    ) -> Result<DepthWindow, EmbedError> {
        Ok(DepthWindow::far(rect))
    }

    fn origin(&self) -> TextureOrigin {
        TextureOrigin::BottomLeft
    }
}

/// Shared call counter.
#[derive(Debug, Clone, Default)]
pub(crate) struct Counter(Arc<AtomicUsize>);

impl Counter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        let _ = self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Last marker a [`FakeScene`] was asked to show, `None` once hidden.
#[derive(Debug, Clone, Default)]
pub(crate) struct MarkerSlot(Arc<Mutex<Option<PivotMarker>>>);

impl MarkerSlot {
    pub fn get(&self) -> Option<PivotMarker> {
        self.0.lock().ok().and_then(|marker| *marker)
    }

    fn set(&self, marker: Option<&PivotMarker>) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = marker.copied();
        }
    }
}

/// Scene with a plain camera and optional bounds. Drawing is a no-op.
#[derive(Debug)]
pub(crate) struct FakeScene {
    pub camera: Camera,
    pub bounds: Option<Bounds>,
    pub viewport: [f32; 4],
    pub interactive: bool,
    resets: Counter,
    marker: MarkerSlot,
}

impl Default for FakeScene {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            bounds: None,
            viewport: [0.0, 0.0, 1.0, 1.0],
            interactive: true,
            resets: Counter::default(),
            marker: MarkerSlot::default(),
        }
    }
}

impl FakeScene {
    /// Scene plus a counter of its camera resets.
    pub fn counting() -> (Self, Counter) {
        let scene = Self::default();
        let resets = scene.resets.clone();
        (scene, resets)
    }

    /// Scene plus a view of the marker it was last given.
    pub fn with_marker_slot() -> (Self, MarkerSlot) {
        let scene = Self::default();
        let slot = scene.marker.clone();
        (scene, slot)
    }
}

impl Scene for FakeScene {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn visible_bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    fn viewport(&self) -> [f32; 4] {
        self.viewport
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn reset_camera(&mut self, aspect: f32) {
        self.resets.bump();
        if let Some(bounds) = self.bounds {
            self.camera.reset_to_bounds(&bounds, aspect);
        }
    }

    fn set_pivot_marker(&mut self, marker: Option<&PivotMarker>) {
        self.marker.set(marker);
    }

    fn draw(&mut self, _frame: &mut Frame<'_>) -> Result<(), EmbedError> {
        Ok(())
    }
}

/// Render window backed by a CPU depth buffer, every pixel far until set.
pub(crate) struct FakeWindow {
    pub size: Size,
    pub scenes: Vec<Box<dyn Scene>>,
    // Row-major, top row first.
    depth: Vec<f32>,
}

impl FakeWindow {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            scenes: Vec::new(),
            depth: vec![1.0; (width * height).max(0) as usize],
        }
    }

    pub fn with_scene(mut self, scene: FakeScene) -> Self {
        self.scenes.push(Box::new(scene));
        self
    }

    /// Set the depth at a display pixel (origin bottom-left).
    pub fn set_depth(&mut self, x: i32, y: i32, depth: f32) {
        let row = self.size.height - 1 - y;
        let index = (row * self.size.width + x) as usize;
        if let Some(sample) = self.depth.get_mut(index) {
            *sample = depth;
        }
    }
}

impl RenderWindow for FakeWindow {
    fn size(&self) -> Size {
        self.size
    }

    fn scenes(&self) -> &[Box<dyn Scene>] {
        &self.scenes
    }

    fn scenes_mut(&mut self) -> &mut [Box<dyn Scene>] {
        &mut self.scenes
    }

    fn read_depth(&mut self, rect: PixelRect) -> Result<DepthWindow, EmbedError> {
        let mut window = DepthWindow::far(rect);
        window.fill_from_top_down(&self.depth, self.size.width, self.size.height);
        Ok(window)
    }
}

/// One call received by a [`RecordingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Info(EventInformation),
    Invoke(CanonicalEvent),
}

/// Engine that records what it is given.
#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    pub calls: Vec<Call>,
}

impl InteractionEngine for RecordingEngine {
    fn set_event_information_flip_y(&mut self, info: EventInformation) {
        self.calls.push(Call::Info(info));
    }

    fn invoke(&mut self, event: CanonicalEvent) {
        self.calls.push(Call::Invoke(event));
    }
}

/// One call received by a [`FakeGui`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GuiCall {
    BeginChild {
        id: String,
        size: Size,
        flags: ChildFlags,
    },
    Image {
        generation: u64,
        size: Size,
        uv: UvRect,
    },
    EndChild,
}

/// GUI with a fixed layout size and a scripted input snapshot.
#[derive(Debug, Default)]
pub(crate) struct FakeGui {
    pub available: Size,
    pub snapshot: InputSnapshot,
    pub calls: Vec<GuiCall>,
}

impl FakeGui {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            available: Size::new(width, height),
            ..Self::default()
        }
    }
}

impl GuiFrame for FakeGui {
    fn available_size(&self) -> Size {
        self.available
    }

    fn begin_child(&mut self, id: &str, size: Size, flags: ChildFlags) {
        self.calls.push(GuiCall::BeginChild {
            id: id.to_owned(),
            size,
            flags,
        });
    }

    fn end_child(&mut self) {
        self.calls.push(GuiCall::EndChild);
    }

    fn image(&mut self, texture: TextureRef<'_>, size: Size, uv: UvRect) {
        self.calls.push(GuiCall::Image {
            generation: texture.handle.generation,
            size,
            uv,
        });
    }

    fn input_snapshot(&self) -> InputSnapshot {
        self.snapshot
    }
}
