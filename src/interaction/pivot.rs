use glam::{IVec2, Vec3};

use super::{
    pick, CameraStyle, EventContext, ManipulationState, Trackball,
};
use crate::camera::Camera;
use crate::error::EmbedError;
use crate::input::MouseButton;
use crate::options::{InteractionOptions, PivotOptions};
use crate::render::RenderWindow;
use crate::scene::PivotMarker;

/// Marker scale per unit of eye-to-pivot distance along the view direction.
const MARKER_SCALE_PER_DISTANCE: f32 = 0.02;

/// Wheel dolly step per unit of motion factor.
const WHEEL_DOLLY_STEP: f32 = 0.005;

/// Dolly gain applied to the eye-to-pivot vector.
const DOLLY_GAIN: f32 = -4.0;

/// Largest fraction of the eye-to-pivot distance one dolly step covers, so
/// the eye never reaches or passes the pivot.
const MAX_DOLLY_FRACTION: f32 = 0.9;

/// Smallest parallel zoom factor of one step; the scale stays positive.
const MIN_PARALLEL_ZOOM: f32 = 0.1;

/// Current pivot point and marker visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotState {
    /// World-space pivot.
    pub position: Vec3,
    /// Marker currently shown.
    pub visible: bool,
    /// Pick tolerance as a fraction of the window diagonal.
    pub tolerance: f32,
}

/// Camera style that rotates, pans and dollies about a point picked from
/// the depth buffer under the pointer.
///
/// Each left, right or middle press picks a new pivot (left and right only
/// when the other of the two is not already held, so a two-button gesture
/// keeps its pivot) and shows a marker sphere there. When nothing was drawn
/// under the pointer the previous pivot is kept.
///
/// | Button | Manipulation       |
/// |--------|--------------------|
/// | left   | rotate about pivot |
/// | right  | pan                |
/// | middle | dolly toward pivot |
/// | wheel  | dolly toward pivot |
///
/// Shift and ctrl on the left button select pan, spin and dolly as in
/// [`Trackball`]; everything not overridden here is delegated to it.
#[derive(Debug, Clone)]
pub struct PivotStyle {
    base: Trackball,
    pivot: PivotState,
    sphere_radius: f32,
    sphere_resolution: u32,
    translation_plane_normal: Option<Vec3>,
    marker_scene: Option<usize>,
    marker_stale: bool,
    /// Held buttons, indexed by [`MouseButton::index`].
    held: [bool; 3],
}

impl PivotStyle {
    /// Pivot style with the given speeds and marker parameters.
    #[must_use]
    pub fn new(interaction: &InteractionOptions, pivot: &PivotOptions) -> Self {
        Self {
            base: Trackball::new(interaction),
            pivot: PivotState {
                position: Vec3::ZERO,
                visible: false,
                tolerance: pivot.tolerance,
            },
            sphere_radius: pivot.sphere_radius,
            sphere_resolution: pivot.sphere_resolution,
            translation_plane_normal: pivot
                .translation_plane_normal
                .map(Vec3::from_array),
            marker_scene: None,
            marker_stale: false,
            held: [false; 3],
        }
    }

    /// Current pivot.
    #[must_use]
    pub fn pivot(&self) -> PivotState {
        self.pivot
    }

    /// The delegate trackball.
    #[must_use]
    pub fn base(&self) -> &Trackball {
        &self.base
    }

    /// Mutable access to the delegate trackball (motion factors).
    pub fn base_mut(&mut self) -> &mut Trackball {
        &mut self.base
    }

    /// Unscaled marker radius.
    #[must_use]
    pub fn sphere_radius(&self) -> f32 {
        self.sphere_radius
    }

    /// Change the marker radius. A visible marker is re-shown on the next
    /// refresh.
    ///
    /// # Errors
    ///
    /// [`EmbedError::InvalidConfiguration`] unless `radius` is positive and
    /// finite.
    pub fn set_sphere_radius(&mut self, radius: f32) -> Result<(), EmbedError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(EmbedError::InvalidConfiguration(format!(
                "pivot sphere radius must be positive, got {radius}"
            )));
        }
        self.sphere_radius = radius;
        self.marker_stale = self.pivot.visible;
        Ok(())
    }

    /// Marker tessellation.
    #[must_use]
    pub fn sphere_resolution(&self) -> u32 {
        self.sphere_resolution
    }

    /// Change the marker tessellation. A visible marker is re-shown on the
    /// next refresh.
    ///
    /// # Errors
    ///
    /// [`EmbedError::InvalidConfiguration`] for fewer than 3 segments.
    pub fn set_sphere_resolution(
        &mut self,
        resolution: u32,
    ) -> Result<(), EmbedError> {
        if resolution < 3 {
            return Err(EmbedError::InvalidConfiguration(format!(
                "pivot sphere resolution must be at least 3, got {resolution}"
            )));
        }
        self.sphere_resolution = resolution;
        self.marker_stale = self.pivot.visible;
        Ok(())
    }

    /// Pick tolerance as a fraction of the window diagonal.
    #[must_use]
    pub fn tolerance(&self) -> f32 {
        self.pivot.tolerance
    }

    /// Change the pick tolerance.
    ///
    /// # Errors
    ///
    /// [`EmbedError::InvalidConfiguration`] for negative or non-finite
    /// values.
    pub fn set_tolerance(&mut self, tolerance: f32) -> Result<(), EmbedError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(EmbedError::InvalidConfiguration(format!(
                "pivot tolerance must be finite and non-negative, got {tolerance}"
            )));
        }
        self.pivot.tolerance = tolerance;
        Ok(())
    }

    /// Plane normal constraining pans, `None` for the view plane.
    #[must_use]
    pub fn translation_plane_normal(&self) -> Option<Vec3> {
        self.translation_plane_normal
    }

    /// Constrain pans to the plane with the given normal, or release the
    /// constraint with `None`.
    ///
    /// # Errors
    ///
    /// [`EmbedError::InvalidConfiguration`] for a zero or non-finite normal.
    pub fn set_translation_plane_normal(
        &mut self,
        normal: Option<Vec3>,
    ) -> Result<(), EmbedError> {
        if let Some(n) = normal {
            if !n.is_finite() || n.length_squared() == 0.0 {
                return Err(EmbedError::InvalidConfiguration(format!(
                    "translation plane normal must be non-zero, got {n}"
                )));
            }
        }
        self.translation_plane_normal = normal.map(Vec3::normalize);
        Ok(())
    }

    /// Pick a new pivot under the event position. Returns whether one was
    /// found; otherwise the previous pivot is kept.
    pub fn set_pivot(&mut self, ctx: &mut EventContext<'_>) -> bool {
        let Some(scene) = self.base.find_poked_scene(ctx) else {
            return false;
        };
        match pick::acquire(
            &mut *ctx.window,
            scene,
            ctx.position,
            self.pivot.tolerance,
        ) {
            Ok(Some(position)) => {
                log::trace!("pivot acquired at {position}");
                self.pivot.position = position;
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("pivot pick failed: {e}");
                false
            }
        }
    }

    fn marker(&self, camera: &Camera) -> PivotMarker {
        let to_pivot = self.pivot.position - camera.position;
        PivotMarker {
            center: self.pivot.position,
            radius: self.sphere_radius,
            resolution: self.sphere_resolution,
            scale: MARKER_SCALE_PER_DISTANCE
                * camera.direction_of_projection().dot(to_pivot),
        }
    }

    fn show_marker(&mut self, window: &mut dyn RenderWindow) {
        let Some(index) = self.base.current_scene() else {
            return;
        };
        if self.marker_scene.is_some_and(|shown| shown != index) {
            self.hide_marker(window);
        }
        let Some(scene) = window.scenes_mut().get_mut(index) else {
            return;
        };
        let marker = self.marker(scene.camera());
        scene.set_pivot_marker(Some(&marker));
        self.marker_scene = Some(index);
        self.pivot.visible = true;
        self.marker_stale = false;
    }

    fn hide_marker(&mut self, window: &mut dyn RenderWindow) {
        if let Some(index) = self.marker_scene.take() {
            if let Some(scene) = window.scenes_mut().get_mut(index) {
                scene.set_pivot_marker(None);
            }
        }
        self.pivot.visible = false;
    }

    /// Keep the marker's on-screen size constant after camera motion.
    fn rescale_marker(&mut self, window: &mut dyn RenderWindow) {
        if !self.pivot.visible {
            return;
        }
        let Some(index) = self.marker_scene else {
            return;
        };
        if let Some(scene) = window.scenes_mut().get_mut(index) {
            let marker = self.marker(scene.camera());
            scene.set_pivot_marker(Some(&marker));
        }
        self.marker_stale = false;
    }

    fn is_held(&self, button: MouseButton) -> bool {
        self.held[button.index()]
    }

    /// Release buttons still recorded as held that the GUI reports up.
    fn release_stale_buttons(&mut self, ctx: &mut EventContext<'_>) {
        let Some(down) = ctx.buttons_down else {
            return;
        };
        for button in MouseButton::ALL {
            if self.is_held(button) && !down[button.index()] {
                log::trace!("{button:?} released without an event");
                self.on_button_release(ctx, button);
            }
        }
    }

    fn pick_and_show(&mut self, ctx: &mut EventContext<'_>) {
        let _ = self.set_pivot(ctx);
        self.show_marker(&mut *ctx.window);
    }

    /// Pointer position mapped to `[-1, 1]` over the window.
    fn normalized(ctx: &EventContext<'_>, p: IVec2) -> (f32, f32) {
        let size = ctx.window.size();
        (
            -1.0 + 2.0 * p.x as f32 / size.width as f32,
            -1.0 + 2.0 * p.y as f32 / size.height as f32,
        )
    }

    fn normalized_delta(ctx: &EventContext<'_>) -> Option<(f32, f32)> {
        if !ctx.window.size().is_positive() {
            return None;
        }
        let (x, y) = Self::normalized(ctx, ctx.position);
        let (lx, ly) = Self::normalized(ctx, ctx.last_position);
        Some((x - lx, y - ly))
    }

    /// Screen-right and screen-up vectors scaled to world units at the
    /// pivot's depth.
    fn pan_basis(&self, camera: &Camera, aspect: f32) -> (Vec3, Vec3) {
        let normal = self
            .translation_plane_normal
            .unwrap_or_else(|| camera.view_plane_normal())
            .normalize_or_zero();
        let distance = -(self.pivot.position - camera.position).dot(normal);
        let scale_y = distance * (camera.view_angle.to_radians() / 2.0).tan();
        let scale_x = aspect * scale_y;
        let right = camera.view_up.cross(normal).normalize_or_zero() * scale_x;
        let up = normal.cross(right).normalize_or_zero() * scale_y;
        (right, up)
    }

    fn rotate(&mut self, ctx: &mut EventContext<'_>, index: usize) {
        let (azimuth, elevation) = self.base.rotation_angles(ctx);
        let pivot = self.pivot.position;
        if let Some(scene) = ctx.scene_mut(index) {
            let camera = scene.camera_mut();
            camera.rotate_about(pivot, azimuth, elevation);
            camera.orthogonalize_view_up();
        }
        self.base.reset_clipping_range(ctx);
    }

    fn pan(&mut self, ctx: &mut EventContext<'_>, index: usize) {
        let Some((dx, dy)) = Self::normalized_delta(ctx) else {
            return;
        };
        let aspect = ctx.window.size().aspect();
        let Some(scene) = ctx.scene_mut(index) else {
            return;
        };
        let (right, up) = self.pan_basis(scene.camera(), aspect);
        scene.camera_mut().translate(-dx * right - dy * up);
        self.base.reset_clipping_range(ctx);
    }

    fn dolly(&mut self, ctx: &mut EventContext<'_>, index: usize) {
        let Some((_, dy)) = Self::normalized_delta(ctx) else {
            return;
        };
        self.dolly_toward_pivot(ctx, index, dy);
    }

    /// Move the camera along the eye-to-pivot line by `delta`; negative
    /// values move closer. Parallel projections zoom instead.
    fn dolly_toward_pivot(
        &mut self,
        ctx: &mut EventContext<'_>,
        index: usize,
        delta: f32,
    ) {
        let pivot = self.pivot.position;
        let Some(scene) = ctx.scene_mut(index) else {
            return;
        };
        let camera = scene.camera_mut();
        let fraction = (delta * DOLLY_GAIN).min(MAX_DOLLY_FRACTION);
        if camera.parallel_projection {
            camera.zoom_parallel((1.0 + fraction).max(MIN_PARALLEL_ZOOM));
        } else {
            camera.translate((pivot - camera.position) * fraction);
        }
        self.base.reset_clipping_range(ctx);
    }
}

impl CameraStyle for PivotStyle {
    fn state(&self) -> ManipulationState {
        self.base.state()
    }

    fn on_button_press(&mut self, ctx: &mut EventContext<'_>, button: MouseButton) {
        self.held[button.index()] = true;
        match button {
            MouseButton::Left => {
                if !self.is_held(MouseButton::Right) {
                    self.pick_and_show(ctx);
                }
                self.base.on_left_button_down(ctx);
            }
            MouseButton::Right => {
                if !self.is_held(MouseButton::Left) {
                    self.pick_and_show(ctx);
                }
                self.base.on_middle_button_down(ctx);
            }
            MouseButton::Middle => {
                self.pick_and_show(ctx);
                self.base.on_right_button_down(ctx);
            }
        }
    }

    fn on_button_release(
        &mut self,
        ctx: &mut EventContext<'_>,
        button: MouseButton,
    ) {
        self.held[button.index()] = false;
        match button {
            MouseButton::Left => self.base.on_left_button_up(),
            MouseButton::Right => self.base.on_middle_button_up(),
            MouseButton::Middle => self.base.on_right_button_up(),
        }
        if !self.held.contains(&true) {
            self.hide_marker(&mut *ctx.window);
        }
    }

    fn on_wheel(&mut self, ctx: &mut EventContext<'_>, forward: bool) {
        if !self.set_pivot(ctx) {
            return;
        }
        let Some(index) = self.base.current_scene() else {
            return;
        };
        let step = WHEEL_DOLLY_STEP
            * self.base.motion_factor()
            * self.base.mouse_wheel_motion_factor();
        let delta = if forward { -step } else { step };
        self.dolly_toward_pivot(ctx, index, delta);
    }

    fn on_mouse_move(&mut self, ctx: &mut EventContext<'_>) {
        self.release_stale_buttons(ctx);
        if let Some(index) = self.base.current_scene() {
            match self.base.state() {
                ManipulationState::Idle => {}
                ManipulationState::Rotating => self.rotate(ctx, index),
                ManipulationState::Panning => self.pan(ctx, index),
                ManipulationState::Dollying => self.dolly(ctx, index),
                ManipulationState::Spinning => self.base.spin(ctx),
            }
        }
        self.rescale_marker(&mut *ctx.window);
    }

    fn fly_to(&mut self, ctx: &mut EventContext<'_>) {
        self.pick_and_show(ctx);
        if let Some(index) = self.base.current_scene() {
            let pivot = self.pivot.position;
            if let Some(scene) = ctx.scene_mut(index) {
                let camera = scene.camera_mut();
                camera.translate(pivot - camera.focal_point);
            }
            self.base.reset_clipping_range(ctx);
        }
        self.hide_marker(&mut *ctx.window);
    }

    fn pick_tolerance(&self) -> f32 {
        self.pivot.tolerance
    }

    fn refresh(&mut self, window: &mut dyn RenderWindow) {
        if self.marker_stale {
            self.rescale_marker(window);
        }
    }

    fn as_pivot(&self) -> Option<&PivotStyle> {
        Some(self)
    }

    fn as_pivot_mut(&mut self) -> Option<&mut PivotStyle> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeScene, FakeWindow, MarkerSlot};

    const W: i32 = 200;
    const H: i32 = 100;

    fn style() -> PivotStyle {
        PivotStyle::new(&InteractionOptions::default(), &PivotOptions::default())
    }

    /// Window with one scene looking down -z from (0, 0, 10) and two
    /// drawn pixels.
    fn scene_window() -> (FakeWindow, MarkerSlot) {
        let (mut scene, slot) = FakeScene::with_marker_slot();
        scene.camera.position = Vec3::new(0.0, 0.0, 10.0);
        let mut window = FakeWindow::new(W, H).with_scene(scene);
        window.set_depth(50, 50, 0.98);
        window.set_depth(150, 50, 0.97);
        (window, slot)
    }

    fn ctx(window: &mut FakeWindow, x: i32, y: i32) -> EventContext<'_> {
        EventContext {
            window,
            position: IVec2::new(x, y),
            last_position: IVec2::new(x, y),
            ctrl: false,
            shift: false,
            buttons_down: None,
        }
    }

    fn drag<'w>(
        window: &'w mut FakeWindow,
        from: (i32, i32),
        to: (i32, i32),
    ) -> EventContext<'w> {
        EventContext {
            window,
            position: IVec2::new(to.0, to.1),
            last_position: IVec2::new(from.0, from.1),
            ctrl: false,
            shift: false,
            buttons_down: None,
        }
    }

    #[test]
    fn press_acquires_pivot_and_shows_marker() {
        let (mut window, slot) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        assert!(style.pivot().visible);
        assert!(style.pivot().position.x < 0.0);
        let marker = slot.get().unwrap();
        assert_eq!(marker.center, style.pivot().position);
        assert_eq!(style.state(), ManipulationState::Rotating);
    }

    #[test]
    fn pivot_is_retained_over_background() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        style.on_button_release(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        let before = style.pivot().position;
        let mut c = ctx(&mut window, 100, 90);
        assert!(!style.set_pivot(&mut c));
        style.on_button_press(&mut c, MouseButton::Left);
        assert_eq!(style.pivot().position, before);
    }

    #[test]
    fn second_button_does_not_move_pivot() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        let first = style.pivot().position;
        style.on_button_press(&mut ctx(&mut window, 150, 50), MouseButton::Right);
        assert_eq!(style.pivot().position, first);

        // Right alone does pick.
        style.on_button_release(&mut ctx(&mut window, 150, 50), MouseButton::Left);
        style.on_button_release(&mut ctx(&mut window, 150, 50), MouseButton::Right);
        style.on_button_press(&mut ctx(&mut window, 150, 50), MouseButton::Right);
        assert_ne!(style.pivot().position, first);
    }

    #[test]
    fn middle_press_always_acquires() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        let first = style.pivot().position;
        style.on_button_press(&mut ctx(&mut window, 150, 50), MouseButton::Middle);
        assert_ne!(style.pivot().position, first);
    }

    #[test]
    fn marker_hidden_only_when_all_buttons_are_up() {
        let (mut window, slot) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Right);
        style.on_button_release(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        assert!(style.pivot().visible);
        assert!(slot.get().is_some());
        style.on_button_release(&mut ctx(&mut window, 50, 50), MouseButton::Right);
        assert!(!style.pivot().visible);
        assert!(slot.get().is_none());
    }

    #[test]
    fn buttons_reported_up_are_released_on_move() {
        let (mut window, slot) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Right);
        // Only the left release is delivered; right went up the same frame.
        style.on_button_release(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        assert!(style.pivot().visible);

        let mut c = ctx(&mut window, 50, 50);
        c.buttons_down = Some([false; 3]);
        style.on_mouse_move(&mut c);
        assert!(!style.pivot().visible);
        assert!(slot.get().is_none());

        let first = style.pivot().position;
        style.on_button_press(&mut ctx(&mut window, 150, 50), MouseButton::Left);
        assert_ne!(style.pivot().position, first);
    }

    #[test]
    fn unreported_buttons_stay_held() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        let mut c = ctx(&mut window, 50, 50);
        style.on_mouse_move(&mut c);
        c.buttons_down = Some([true, false, false]);
        style.on_mouse_move(&mut c);
        assert!(style.pivot().visible);
        assert_eq!(style.state(), ManipulationState::Rotating);
    }

    #[test]
    fn right_button_pans_and_middle_dollies() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Right);
        assert_eq!(style.state(), ManipulationState::Panning);
        style.on_button_release(&mut ctx(&mut window, 50, 50), MouseButton::Right);
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Middle);
        assert_eq!(style.state(), ManipulationState::Dollying);
    }

    #[test]
    fn rotate_preserves_distance_to_pivot() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        let pivot = style.pivot().position;
        let before = window.scenes[0].camera().position.distance(pivot);
        style.on_mouse_move(&mut drag(&mut window, (50, 50), (80, 35)));
        let camera = window.scenes[0].camera();
        assert!((camera.position.distance(pivot) - before).abs() < 1e-3);
        assert!(camera.view_up.dot(camera.direction_of_projection()).abs() < 1e-4);
    }

    #[test]
    fn pan_translates_position_and_focal_point_equally() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Right);
        let offset_before = {
            let c = window.scenes[0].camera();
            c.position - c.focal_point
        };
        style.on_mouse_move(&mut drag(&mut window, (50, 50), (70, 50)));
        let c = window.scenes[0].camera();
        assert!((c.position - c.focal_point - offset_before).length() < 1e-4);
        assert!(c.position.x < 0.0);
    }

    #[test]
    fn wheel_forward_moves_toward_pivot() {
        let (mut window, _) = scene_window();
        let mut style = style();
        let mut c = ctx(&mut window, 50, 50);
        style.on_wheel(&mut c, true);
        let pivot = style.pivot().position;
        let after = window.scenes[0].camera().position.distance(pivot);
        let before = Vec3::new(0.0, 0.0, 10.0).distance(pivot);
        // delta = -0.05, offset = 0.2 of the eye-to-pivot vector.
        assert!((after - before * 0.8).abs() < 1e-3);

        let mut c = ctx(&mut window, 50, 50);
        style.on_wheel(&mut c, false);
        let back = window.scenes[0].camera().position.distance(pivot);
        assert!(back > after);
    }

    #[test]
    fn wheel_step_grows_with_motion_factor() {
        let moved = |motion_factor: f32| {
            let (mut window, _) = scene_window();
            let interaction = InteractionOptions {
                motion_factor,
                ..InteractionOptions::default()
            };
            let mut style = PivotStyle::new(&interaction, &PivotOptions::default());
            style.on_wheel(&mut ctx(&mut window, 50, 50), true);
            window.scenes[0].camera().position.distance(Vec3::new(0.0, 0.0, 10.0))
        };
        assert!(moved(5.0) < moved(10.0));
        assert!(moved(10.0) < moved(20.0));
    }

    #[test]
    fn fast_dolly_never_passes_the_pivot() {
        let (mut window, _) = scene_window();
        let interaction = InteractionOptions {
            motion_factor: 1000.0,
            ..InteractionOptions::default()
        };
        let mut style = PivotStyle::new(&interaction, &PivotOptions::default());
        style.on_wheel(&mut ctx(&mut window, 50, 50), true);
        let pivot = style.pivot().position;
        let start = Vec3::new(0.0, 0.0, 10.0);
        let camera = window.scenes[0].camera();
        let ahead = (pivot - camera.position).dot(pivot - start);
        assert!(ahead > 0.0, "eye passed the pivot: {:?}", camera.position);

        // Full-height drag while dollying.
        let (mut window, _) = scene_window();
        let mut style = self::style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Middle);
        let pivot = style.pivot().position;
        style.on_mouse_move(&mut drag(&mut window, (50, 99), (50, 0)));
        let camera = window.scenes[0].camera();
        assert!((pivot - camera.position).dot(pivot - start) > 0.0);
    }

    #[test]
    fn parallel_zoom_out_keeps_scale_positive() {
        let (mut window, _) = scene_window();
        window.scenes[0].camera_mut().parallel_projection = true;
        let interaction = InteractionOptions {
            motion_factor: 1000.0,
            ..InteractionOptions::default()
        };
        let mut style = PivotStyle::new(&interaction, &PivotOptions::default());
        style.on_wheel(&mut ctx(&mut window, 50, 50), false);
        let scale = window.scenes[0].camera().parallel_scale;
        assert!(scale.is_finite() && scale > 1.0, "{scale}");
    }

    #[test]
    fn wheel_over_background_does_nothing() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style.on_wheel(&mut ctx(&mut window, 100, 90), true);
        assert_eq!(
            window.scenes[0].camera().position,
            Vec3::new(0.0, 0.0, 10.0)
        );
    }

    #[test]
    fn parallel_wheel_zooms_scale() {
        let (mut window, _) = scene_window();
        window.scenes[0].camera_mut().parallel_projection = true;
        let mut style = style();
        style.on_wheel(&mut ctx(&mut window, 50, 50), true);
        let camera = window.scenes[0].camera();
        assert!(camera.parallel_scale < 1.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn marker_scale_tracks_view_distance() {
        let (mut window, slot) = scene_window();
        let mut style = style();
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Middle);
        let near = slot.get().unwrap().scale;
        // Pointer moving up dollies away from the pivot.
        style.on_mouse_move(&mut drag(&mut window, (50, 50), (50, 60)));
        let far = slot.get().unwrap().scale;
        assert!(far > near, "{near} -> {far}");
        let camera = window.scenes[0].camera();
        let expected = 0.02
            * camera
                .direction_of_projection()
                .dot(style.pivot().position - camera.position);
        assert!((far - expected).abs() < 1e-5);
    }

    #[test]
    fn fly_to_centers_focal_point_on_pivot() {
        let (mut window, slot) = scene_window();
        let mut style = style();
        let offset = Vec3::new(0.0, 0.0, 10.0);
        style.fly_to(&mut ctx(&mut window, 150, 50));
        let camera = window.scenes[0].camera();
        assert_eq!(camera.focal_point, style.pivot().position);
        assert!((camera.position - camera.focal_point - offset).length() < 1e-4);
        assert!(!style.pivot().visible);
        assert!(slot.get().is_none());
    }

    #[test]
    fn setters_validate_and_mark_visible_marker_stale() {
        let (mut window, slot) = scene_window();
        let mut style = style();
        assert!(style.set_sphere_radius(0.0).is_err());
        assert!(style.set_sphere_resolution(2).is_err());
        assert!(style.set_tolerance(-0.1).is_err());
        assert!(style.set_translation_plane_normal(Some(Vec3::ZERO)).is_err());
        assert!(style.set_translation_plane_normal(None).is_ok());

        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Left);
        style.set_sphere_radius(0.5).unwrap();
        style.set_sphere_resolution(8).unwrap();
        style.refresh(&mut window);
        let marker = slot.get().unwrap();
        assert_eq!(marker.radius, 0.5);
        assert_eq!(marker.resolution, 8);
    }

    #[test]
    fn plane_normal_constrains_pan() {
        let (mut window, _) = scene_window();
        let mut style = style();
        style
            .set_translation_plane_normal(Some(Vec3::new(0.0, 0.0, 2.0)))
            .unwrap();
        assert_eq!(style.translation_plane_normal(), Some(Vec3::Z));
        style.on_button_press(&mut ctx(&mut window, 50, 50), MouseButton::Right);
        style.on_mouse_move(&mut drag(&mut window, (50, 50), (50, 80)));
        let camera = window.scenes[0].camera();
        assert!((camera.position.z - 10.0).abs() < 1e-4);
        assert!(camera.position.y < 0.0);
    }
}
