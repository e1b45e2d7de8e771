use glam::{IVec2, Vec3};

use super::{
    find_poked_scene, pick, CameraStyle, EventContext, ManipulationState,
};
use crate::input::MouseButton;
use crate::options::InteractionOptions;

/// Degrees of rotation per window width (or height) of pointer travel,
/// before the motion factor.
pub(crate) const ROTATION_PER_WINDOW: f32 = 20.0;

/// Trackball camera style: every gesture acts about the camera focal point.
///
/// | Gesture            | Manipulation |
/// |--------------------|--------------|
/// | left drag          | rotate       |
/// | shift + left drag  | pan          |
/// | ctrl + left drag   | spin         |
/// | ctrl + shift + left| dolly        |
/// | middle drag        | pan          |
/// | right drag         | dolly        |
/// | wheel              | dolly        |
///
/// A gesture only starts from [`ManipulationState::Idle`]; pressing a second
/// button keeps the first gesture.
#[derive(Debug, Clone)]
pub struct Trackball {
    state: ManipulationState,
    current_scene: Option<usize>,
    motion_factor: f32,
    mouse_wheel_motion_factor: f32,
    auto_adjust_clipping_range: bool,
}

impl Trackball {
    /// Trackball with the speeds from `options`.
    #[must_use]
    pub fn new(options: &InteractionOptions) -> Self {
        Self {
            state: ManipulationState::Idle,
            current_scene: None,
            motion_factor: options.motion_factor,
            mouse_wheel_motion_factor: options.mouse_wheel_motion_factor,
            auto_adjust_clipping_range: options.auto_adjust_clipping_range,
        }
    }

    /// Sub-scene selected by the last press or wheel step.
    #[must_use]
    pub fn current_scene(&self) -> Option<usize> {
        self.current_scene
    }

    /// Scale of rotate, pan and dolly speeds.
    #[must_use]
    pub fn motion_factor(&self) -> f32 {
        self.motion_factor
    }

    /// Change the motion factor.
    pub fn set_motion_factor(&mut self, factor: f32) {
        self.motion_factor = factor;
    }

    /// Extra scale of wheel steps.
    #[must_use]
    pub fn mouse_wheel_motion_factor(&self) -> f32 {
        self.mouse_wheel_motion_factor
    }

    /// Change the wheel motion factor.
    pub fn set_mouse_wheel_motion_factor(&mut self, factor: f32) {
        self.mouse_wheel_motion_factor = factor;
    }

    /// Whether clipping planes are refit after camera motion.
    #[must_use]
    pub fn auto_adjust_clipping_range(&self) -> bool {
        self.auto_adjust_clipping_range
    }

    /// Select the interactive sub-scene under the event position.
    pub fn find_poked_scene(&mut self, ctx: &EventContext<'_>) -> Option<usize> {
        self.current_scene = find_poked_scene(&*ctx.window, ctx.position);
        self.current_scene
    }

    fn start_state(&mut self, state: ManipulationState) {
        if self.state == ManipulationState::Idle {
            log::trace!("start {state:?}");
            self.state = state;
        }
    }

    fn end_state(&mut self, state: ManipulationState) {
        if self.state == state {
            log::trace!("end {state:?}");
            self.state = ManipulationState::Idle;
        }
    }

    /// Left button down: rotate, or pan/spin/dolly with modifiers.
    pub fn on_left_button_down(&mut self, ctx: &EventContext<'_>) {
        if self.find_poked_scene(ctx).is_none() {
            return;
        }
        let state = match (ctx.shift, ctx.ctrl) {
            (true, true) => ManipulationState::Dollying,
            (true, false) => ManipulationState::Panning,
            (false, true) => ManipulationState::Spinning,
            (false, false) => ManipulationState::Rotating,
        };
        self.start_state(state);
    }

    /// Left button up ends whatever gesture is active.
    pub fn on_left_button_up(&mut self) {
        if self.state != ManipulationState::Idle {
            self.end_state(self.state);
        }
    }

    /// Middle button down starts panning.
    pub fn on_middle_button_down(&mut self, ctx: &EventContext<'_>) {
        if self.find_poked_scene(ctx).is_some() {
            self.start_state(ManipulationState::Panning);
        }
    }

    /// Middle button up ends panning.
    pub fn on_middle_button_up(&mut self) {
        self.end_state(ManipulationState::Panning);
    }

    /// Right button down starts dollying.
    pub fn on_right_button_down(&mut self, ctx: &EventContext<'_>) {
        if self.find_poked_scene(ctx).is_some() {
            self.start_state(ManipulationState::Dollying);
        }
    }

    /// Right button up ends dollying.
    pub fn on_right_button_up(&mut self) {
        self.end_state(ManipulationState::Dollying);
    }

    /// Refit the clipping planes of the current scene if enabled.
    pub fn reset_clipping_range(&self, ctx: &mut EventContext<'_>) {
        if !self.auto_adjust_clipping_range {
            return;
        }
        if let Some(scene) = self.current_scene.and_then(|i| ctx.scene_mut(i)) {
            scene.reset_camera_clipping_range();
        }
    }

    /// Azimuth and elevation in degrees for the pointer delta.
    #[must_use]
    pub fn rotation_angles(&self, ctx: &EventContext<'_>) -> (f32, f32) {
        let size = ctx.window.size();
        if !size.is_positive() {
            return (0.0, 0.0);
        }
        let delta = ctx.delta();
        let azimuth = delta.x as f32 * (-ROTATION_PER_WINDOW / size.width as f32)
            * self.motion_factor;
        let elevation = delta.y as f32
            * (-ROTATION_PER_WINDOW / size.height as f32)
            * self.motion_factor;
        (azimuth, elevation)
    }

    /// Orbit about the focal point.
    pub fn rotate(&mut self, ctx: &mut EventContext<'_>) {
        let (azimuth, elevation) = self.rotation_angles(ctx);
        let Some(scene) = self.current_scene.and_then(|i| ctx.scene_mut(i)) else {
            return;
        };
        let camera = scene.camera_mut();
        camera.azimuth(azimuth);
        camera.elevation(elevation);
        camera.orthogonalize_view_up();
        self.reset_clipping_range(ctx);
    }

    /// Translate so the point under the pointer at focal depth follows it.
    pub fn pan(&mut self, ctx: &mut EventContext<'_>) {
        let Some(index) = self.current_scene else {
            return;
        };
        let Some(viewport) = ctx.scene_rect(index) else {
            return;
        };
        let (position, last) = (ctx.position, ctx.last_position);
        let Some(scene) = ctx.scene_mut(index) else {
            return;
        };
        let camera = scene.camera_mut();
        let focal_depth = camera.world_to_display(camera.focal_point, &viewport).z;
        let now = camera.display_to_world(
            Vec3::new(position.x as f32, position.y as f32, focal_depth),
            &viewport,
        );
        let before = camera.display_to_world(
            Vec3::new(last.x as f32, last.y as f32, focal_depth),
            &viewport,
        );
        let motion = before - now;
        if motion.is_finite() {
            camera.translate(motion);
        }
        self.reset_clipping_range(ctx);
    }

    /// Dolly by the vertical pointer delta relative to the viewport center.
    pub fn dolly(&mut self, ctx: &mut EventContext<'_>) {
        let Some(viewport) = self.current_scene.and_then(|i| ctx.scene_rect(i)) else {
            return;
        };
        let (_, center_y) = viewport.center();
        if center_y <= 0.0 {
            return;
        }
        let dy = ctx.delta().y as f32;
        let factor = 1.1_f32.powf(self.motion_factor * dy / center_y);
        self.dolly_by(ctx, factor);
    }

    /// Dolly the current camera by `factor`; parallel projections zoom.
    pub fn dolly_by(&mut self, ctx: &mut EventContext<'_>, factor: f32) {
        let Some(scene) = self.current_scene.and_then(|i| ctx.scene_mut(i)) else {
            return;
        };
        let camera = scene.camera_mut();
        if camera.parallel_projection {
            camera.zoom_parallel(factor);
        } else {
            camera.dolly(factor);
        }
        self.reset_clipping_range(ctx);
    }

    /// Roll by the angle the pointer swept around the viewport center.
    pub fn spin(&mut self, ctx: &mut EventContext<'_>) {
        let Some(index) = self.current_scene else {
            return;
        };
        let Some(viewport) = ctx.scene_rect(index) else {
            return;
        };
        let (cx, cy) = viewport.center();
        let angle = |p: IVec2| {
            (p.y as f32 - cy).atan2(p.x as f32 - cx).to_degrees()
        };
        let sweep = angle(ctx.position) - angle(ctx.last_position);
        let Some(scene) = ctx.scene_mut(index) else {
            return;
        };
        let camera = scene.camera_mut();
        camera.roll(sweep);
        camera.orthogonalize_view_up();
    }

    /// Wheel dolly factor for one step.
    #[must_use]
    pub fn wheel_factor(&self, forward: bool) -> f32 {
        let exponent = self.motion_factor * 0.2 * self.mouse_wheel_motion_factor;
        1.1_f32.powf(if forward { exponent } else { -exponent })
    }
}

impl CameraStyle for Trackball {
    fn state(&self) -> ManipulationState {
        self.state
    }

    fn on_button_press(&mut self, ctx: &mut EventContext<'_>, button: MouseButton) {
        match button {
            MouseButton::Left => self.on_left_button_down(ctx),
            MouseButton::Middle => self.on_middle_button_down(ctx),
            MouseButton::Right => self.on_right_button_down(ctx),
        }
    }

    fn on_button_release(
        &mut self,
        _ctx: &mut EventContext<'_>,
        button: MouseButton,
    ) {
        match button {
            MouseButton::Left => self.on_left_button_up(),
            MouseButton::Middle => self.on_middle_button_up(),
            MouseButton::Right => self.on_right_button_up(),
        }
    }

    fn on_wheel(&mut self, ctx: &mut EventContext<'_>, forward: bool) {
        if self.find_poked_scene(ctx).is_none() {
            return;
        }
        let factor = self.wheel_factor(forward);
        self.dolly_by(ctx, factor);
    }

    fn on_mouse_move(&mut self, ctx: &mut EventContext<'_>) {
        if ctx.buttons_down == Some([false; 3])
            && self.state != ManipulationState::Idle
        {
            self.end_state(self.state);
        }
        match self.state {
            ManipulationState::Idle => {}
            ManipulationState::Rotating => self.rotate(ctx),
            ManipulationState::Panning => self.pan(ctx),
            ManipulationState::Dollying => self.dolly(ctx),
            ManipulationState::Spinning => self.spin(ctx),
        }
    }

    fn fly_to(&mut self, ctx: &mut EventContext<'_>) {
        let Some(index) = self.find_poked_scene(ctx) else {
            return;
        };
        let tolerance = self.pick_tolerance();
        let target = match pick::acquire(
            &mut *ctx.window,
            index,
            ctx.position,
            tolerance,
        ) {
            Ok(Some(point)) => point,
            Ok(None) => return,
            Err(e) => {
                log::warn!("fly-to pick failed: {e}");
                return;
            }
        };
        if let Some(scene) = ctx.scene_mut(index) {
            let camera = scene.camera_mut();
            camera.translate(target - camera.focal_point);
        }
        self.reset_clipping_range(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeScene, FakeWindow};

    fn window() -> FakeWindow {
        let mut scene = FakeScene::default();
        scene.camera.position = Vec3::new(0.0, 0.0, 10.0);
        FakeWindow::new(200, 100).with_scene(scene)
    }

    fn ctx(
        window: &mut FakeWindow,
        position: IVec2,
        last: IVec2,
    ) -> EventContext<'_> {
        EventContext {
            window,
            position,
            last_position: last,
            ctrl: false,
            shift: false,
            buttons_down: None,
        }
    }

    #[test]
    fn modifiers_select_left_gesture() {
        let mut window = window();
        let cases = [
            (false, false, ManipulationState::Rotating),
            (true, false, ManipulationState::Panning),
            (false, true, ManipulationState::Spinning),
            (true, true, ManipulationState::Dollying),
        ];
        for (shift, ctrl, expected) in cases {
            let mut style = Trackball::new(&InteractionOptions::default());
            let mut ctx = ctx(&mut window, IVec2::new(50, 50), IVec2::new(50, 50));
            ctx.shift = shift;
            ctx.ctrl = ctrl;
            style.on_button_press(&mut ctx, MouseButton::Left);
            assert_eq!(style.state(), expected);
            style.on_button_release(&mut ctx, MouseButton::Left);
            assert_eq!(style.state(), ManipulationState::Idle);
        }
    }

    #[test]
    fn second_button_keeps_first_gesture() {
        let mut window = window();
        let mut style = Trackball::new(&InteractionOptions::default());
        let mut ctx = ctx(&mut window, IVec2::new(50, 50), IVec2::new(50, 50));
        style.on_button_press(&mut ctx, MouseButton::Middle);
        style.on_button_press(&mut ctx, MouseButton::Right);
        assert_eq!(style.state(), ManipulationState::Panning);
        style.on_button_release(&mut ctx, MouseButton::Right);
        assert_eq!(style.state(), ManipulationState::Panning);
        style.on_button_release(&mut ctx, MouseButton::Middle);
        assert_eq!(style.state(), ManipulationState::Idle);
    }

    #[test]
    fn move_with_every_button_up_ends_gesture() {
        let mut window = window();
        let mut style = Trackball::new(&InteractionOptions::default());
        let mut press = ctx(&mut window, IVec2::new(50, 50), IVec2::new(50, 50));
        style.on_button_press(&mut press, MouseButton::Middle);

        let mut held = ctx(&mut window, IVec2::new(60, 50), IVec2::new(50, 50));
        held.buttons_down = Some([false, false, true]);
        style.on_mouse_move(&mut held);
        assert_eq!(style.state(), ManipulationState::Panning);

        let focal = window.scenes[0].camera().focal_point;
        let mut up = ctx(&mut window, IVec2::new(70, 50), IVec2::new(60, 50));
        up.buttons_down = Some([false; 3]);
        style.on_mouse_move(&mut up);
        assert_eq!(style.state(), ManipulationState::Idle);
        assert_eq!(window.scenes[0].camera().focal_point, focal);
    }

    #[test]
    fn wheel_forward_moves_closer() {
        let mut window = window();
        let mut style = Trackball::new(&InteractionOptions::default());
        let before = window.scenes[0].camera().distance();
        let mut ctx = ctx(&mut window, IVec2::new(50, 50), IVec2::new(50, 50));
        style.on_wheel(&mut ctx, true);
        let after = window.scenes[0].camera().distance();
        assert!(after < before);
        let expected = before / 1.1_f32.powf(2.0);
        assert!((after - expected).abs() < 1e-3);
    }

    #[test]
    fn rotate_keeps_focal_distance() {
        let mut window = window();
        let mut style = Trackball::new(&InteractionOptions::default());
        let mut press = ctx(&mut window, IVec2::new(50, 50), IVec2::new(50, 50));
        style.on_button_press(&mut press, MouseButton::Left);
        let mut drag = ctx(&mut window, IVec2::new(70, 40), IVec2::new(50, 50));
        style.on_mouse_move(&mut drag);
        let camera = window.scenes[0].camera();
        assert!((camera.distance() - 10.0).abs() < 1e-3);
        assert!(camera.position.x.abs() > 0.1);
        assert_eq!(camera.focal_point, Vec3::ZERO);
    }

    #[test]
    fn pan_moves_position_and_focal_together() {
        let mut window = window();
        let mut style = Trackball::new(&InteractionOptions::default());
        let mut press = ctx(&mut window, IVec2::new(50, 50), IVec2::new(50, 50));
        style.on_button_press(&mut press, MouseButton::Middle);
        let mut drag = ctx(&mut window, IVec2::new(60, 50), IVec2::new(50, 50));
        style.on_mouse_move(&mut drag);
        let camera = window.scenes[0].camera();
        assert!(camera.focal_point.x < 0.0);
        assert!((camera.position - camera.focal_point - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-3);
    }

    #[test]
    fn spin_rolls_view_up() {
        let mut window = window();
        let mut style = Trackball::new(&InteractionOptions::default());
        let mut press = ctx(&mut window, IVec2::new(150, 50), IVec2::new(150, 50));
        press.ctrl = true;
        style.on_button_press(&mut press, MouseButton::Left);
        // Quarter turn around the viewport center (100, 50).
        let mut drag = ctx(&mut window, IVec2::new(100, 100), IVec2::new(150, 50));
        style.on_mouse_move(&mut drag);
        let camera = window.scenes[0].camera();
        assert!(camera.view_up.y.abs() < 1e-3, "{:?}", camera.view_up);
        assert!((camera.distance() - 10.0).abs() < 1e-4);
    }
}
