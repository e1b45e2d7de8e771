use super::{
    DepthWindow, PixelRect, Size, Smoothing, SurfaceBackend, TextureHandle,
    TextureOrigin, WgpuBackend,
};
use crate::error::EmbedError;
use crate::scene::Scene;

/// What the interaction layer needs from the window it manipulates.
pub trait RenderWindow {
    /// Current surface size; zero before the first render.
    fn size(&self) -> Size;

    /// Attached sub-scenes in draw order.
    fn scenes(&self) -> &[Box<dyn Scene>];

    /// Mutable access to the attached sub-scenes.
    fn scenes_mut(&mut self) -> &mut [Box<dyn Scene>];

    /// Read depth samples under `rect` (display coordinates). Pixels not
    /// covered by the surface read as far.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedError::Render`] if the readback fails.
    fn read_depth(&mut self, rect: PixelRect) -> Result<DepthWindow, EmbedError>;
}

/// Off-screen color + depth surface sized to a GUI panel.
///
/// The surface is allocated lazily on the first render with a positive
/// size and reallocated whenever the requested size changes. Requests with
/// a non-positive dimension leave everything untouched.
pub struct TextureRenderTarget<B: SurfaceBackend = WgpuBackend> {
    backend: B,
    surface: Option<B::Surface>,
    size: Size,
    generation: u64,
    handle: Option<TextureHandle>,
    scenes: Vec<Box<dyn Scene>>,
    background: [f32; 4],
    smoothing: Smoothing,
}

impl<B: SurfaceBackend> TextureRenderTarget<B> {
    /// Target with no surface and no scenes.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            surface: None,
            size: Size::default(),
            generation: 0,
            handle: None,
            scenes: Vec::new(),
            background: [0.0, 0.0, 0.0, 1.0],
            smoothing: Smoothing::default(),
        }
    }

    /// Render every scene at `requested` and wait for the GPU.
    ///
    /// Returns the handle of the texture that now holds the image, or the
    /// previous handle unchanged if `requested` is not positive. `None`
    /// means nothing has been rendered yet.
    ///
    /// # Errors
    ///
    /// Propagates allocation, release, draw and wait failures.
    pub fn render(
        &mut self,
        requested: Size,
    ) -> Result<Option<TextureHandle>, EmbedError> {
        if !requested.is_positive() {
            return Ok(self.handle);
        }
        if self.surface.is_none() || requested != self.size {
            self.reallocate(requested)?;
        }

        let Some(surface) = self.surface.as_ref() else {
            return Ok(self.handle);
        };
        self.backend.draw(
            surface,
            &mut self.scenes,
            self.background,
            self.smoothing,
        )?;
        self.backend.wait_for_completion()?;

        let handle = TextureHandle {
            generation: self.generation,
            size: self.size,
        };
        self.handle = Some(handle);
        Ok(self.handle)
    }

    fn reallocate(&mut self, size: Size) -> Result<(), EmbedError> {
        if let Some(old) = self.surface.take() {
            self.handle = None;
            self.backend.release(old)?;
        }
        let surface = self.backend.allocate(size)?;
        self.surface = Some(surface);
        self.size = size;
        self.generation += 1;
        log::debug!(
            "allocated {}x{} render surface (generation {})",
            size.width,
            size.height,
            self.generation
        );

        for scene in &mut self.scenes {
            let aspect = super::scene_rect(scene.as_ref(), size).aspect();
            scene.reset_camera(aspect);
        }
        Ok(())
    }

    /// Handle of the last successful render.
    #[must_use]
    pub fn texture_handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    /// Row order of the rendered texture.
    #[must_use]
    pub fn origin(&self) -> TextureOrigin {
        self.backend.origin()
    }

    /// Color view of the current surface, for GUIs that sample wgpu
    /// textures directly.
    #[must_use]
    pub fn color_view(&self) -> Option<&wgpu::TextureView> {
        self.surface
            .as_ref()
            .and_then(|surface| self.backend.color_view(surface))
    }

    /// Attach a sub-scene; it is drawn after the ones already attached.
    pub fn add_scene(&mut self, scene: Box<dyn Scene>) {
        self.scenes.push(scene);
    }

    /// Detach and return the sub-scene at `index`.
    pub fn remove_scene(&mut self, index: usize) -> Option<Box<dyn Scene>> {
        (index < self.scenes.len()).then(|| self.scenes.remove(index))
    }

    /// Clear color (linear RGBA).
    pub fn set_background(&mut self, color: [f32; 4]) {
        self.background = color;
    }

    /// Antialiasing hints forwarded to scenes.
    pub fn set_smoothing(&mut self, smoothing: Smoothing) {
        self.smoothing = smoothing;
    }

    /// Current antialiasing hints.
    #[must_use]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// The backend doing the GPU work.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: SurfaceBackend> RenderWindow for TextureRenderTarget<B> {
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
        match self.surface.as_ref() {
            Some(surface) => self.backend.read_depth(surface, rect),
            None => Ok(DepthWindow::far(rect)),
        }
    }
}

impl<B: SurfaceBackend> Drop for TextureRenderTarget<B> {
    fn drop(&mut self) {
        if let Some(surface) = self.surface.take() {
            if let Err(e) = self.backend.release(surface) {
                log::debug!("ignoring error while releasing render surface: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, FakeScene};

    fn target() -> TextureRenderTarget<FakeBackend> {
        TextureRenderTarget::new(FakeBackend::default())
    }

    #[test]
    fn handle_is_none_before_first_render() {
        let mut target = target();
        assert_eq!(target.texture_handle(), None);
        assert_eq!(target.render(Size::new(0, 0)).unwrap(), None);
        let handle = target.render(Size::new(10, 10)).unwrap();
        assert!(handle.is_some());
    }

    #[test]
    fn same_size_allocates_once() {
        let mut target = target();
        let first = target.render(Size::new(400, 300)).unwrap();
        let second = target.render(Size::new(400, 300)).unwrap();
        assert_eq!(target.backend().stats().allocations, 1);
        assert_eq!(target.backend().stats().draws, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_size_never_allocates_or_changes_handle() {
        let mut target = target();
        let _ = target.render(Size::new(0, 0)).unwrap();
        let _ = target.render(Size::new(50, 0)).unwrap();
        assert_eq!(target.backend().stats().allocations, 0);
        assert_eq!(target.backend().stats().draws, 0);

        let before = target.render(Size::new(64, 64)).unwrap();
        let after = target.render(Size::new(64, 0)).unwrap();
        assert_eq!(before, after);
        assert_eq!(target.backend().stats().allocations, 1);
    }

    #[test]
    fn resize_sequence() {
        let mut target = target();
        let _ = target.render(Size::new(400, 300)).unwrap();
        assert_eq!(target.backend().stats().allocations, 1);
        let _ = target.render(Size::new(400, 300)).unwrap();
        assert_eq!(target.backend().stats().allocations, 1);
        let big = target.render(Size::new(800, 600)).unwrap().unwrap();
        assert_eq!(target.backend().stats().allocations, 2);
        assert_eq!(target.backend().stats().releases, 1);
        let kept = target.render(Size::new(0, 300)).unwrap().unwrap();
        assert_eq!(kept, big);
        assert_eq!(kept.size, Size::new(800, 600));
        assert_eq!(target.size(), Size::new(800, 600));
        assert_eq!(target.backend().stats().allocations, 2);
    }

    #[test]
    fn reallocation_bumps_generation() {
        let mut target = target();
        let a = target.render(Size::new(10, 10)).unwrap().unwrap();
        let b = target.render(Size::new(20, 10)).unwrap().unwrap();
        assert_eq!(b.generation, a.generation + 1);
    }

    #[test]
    fn reallocation_resets_every_scene_camera() {
        let mut target = target();
        let (scene_a, resets_a) = FakeScene::counting();
        let (scene_b, resets_b) = FakeScene::counting();
        target.add_scene(Box::new(scene_a));
        target.add_scene(Box::new(scene_b));

        let _ = target.render(Size::new(100, 100)).unwrap();
        let _ = target.render(Size::new(100, 100)).unwrap();
        assert_eq!(resets_a.get(), 1);
        assert_eq!(resets_b.get(), 1);

        let _ = target.render(Size::new(200, 100)).unwrap();
        assert_eq!(resets_a.get(), 2);
        assert_eq!(resets_b.get(), 2);
    }

    #[test]
    fn release_error_during_reallocation_propagates() {
        let mut target = target();
        let _ = target.render(Size::new(10, 10)).unwrap();
        target.backend_mut_for_test().fail_release = true;
        let err = target.render(Size::new(20, 20)).unwrap_err();
        assert!(matches!(err, EmbedError::Render(_)));
        assert_eq!(target.texture_handle(), None);
    }

    #[test]
    fn release_error_on_drop_is_swallowed() {
        let mut target = target();
        let _ = target.render(Size::new(10, 10)).unwrap();
        target.backend_mut_for_test().fail_release = true;
        drop(target);
    }

    #[test]
    fn depth_before_first_render_reads_far() {
        let mut target = target();
        let rect = PixelRect::around(glam::IVec2::new(3, 3), 1);
        let window = target.read_depth(rect).unwrap();
        assert!(window.iter().all(|(_, d)| d == 1.0));
    }

    #[test]
    fn remove_scene_detaches() {
        let mut target = target();
        target.add_scene(Box::new(FakeScene::default()));
        assert!(target.remove_scene(1).is_none());
        assert!(target.remove_scene(0).is_some());
        assert!(target.scenes().is_empty());
    }

    impl<B: SurfaceBackend> TextureRenderTarget<B> {
        fn backend_mut_for_test(&mut self) -> &mut B {
            &mut self.backend
        }
    }
}
