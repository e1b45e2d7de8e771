//! Pointer-driven camera interaction.
//!
//! The [`Interactor`] receives canonical events through the
//! [`InteractionEngine`] trait, flips positions into display coordinates and
//! routes them to the [`InteractionController`]. The controller owns the key
//! table and one [`CameraStyle`] strategy: [`Trackball`] manipulates the
//! camera about its focal point, [`PivotStyle`] about a point picked from
//! the depth buffer under the pointer.

mod controller;
mod interactor;
pub mod pick;
mod pivot;
mod trackball;

pub use controller::{InteractionController, PickCallback};
pub use interactor::{BoundInteractor, Interactor};
pub use pivot::{PivotState, PivotStyle};
pub use trackball::Trackball;

use glam::IVec2;

use crate::camera::DisplayRect;
use crate::input::{CanonicalEvent, EventInformation, MouseButton};
use crate::render::{scene_rect, RenderWindow};
use crate::scene::Scene;

/// Event-injection entry points of an interaction engine.
///
/// The translator only ever calls these two methods; it never stores the
/// engine.
pub trait InteractionEngine {
    /// Set position and modifiers for the following events. `position` is in
    /// GUI coordinates (y down) and is flipped into display coordinates.
    fn set_event_information_flip_y(&mut self, info: EventInformation);

    /// Deliver one event.
    fn invoke(&mut self, event: CanonicalEvent);
}

/// Camera manipulation in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManipulationState {
    /// No button gesture active.
    #[default]
    Idle,
    /// Orbiting.
    Rotating,
    /// Translating in the view plane.
    Panning,
    /// Moving toward or away from the target.
    Dollying,
    /// Rolling about the view direction.
    Spinning,
}

/// Everything a style needs to handle one event.
pub struct EventContext<'w> {
    /// The window being manipulated.
    pub window: &'w mut dyn RenderWindow,
    /// Event position in display coordinates (origin bottom-left).
    pub position: IVec2,
    /// Position of the previous press or move.
    pub last_position: IVec2,
    /// Control held.
    pub ctrl: bool,
    /// Shift held.
    pub shift: bool,
    /// Buttons down at the end of the frame, when the GUI reports them.
    pub buttons_down: Option<[bool; 3]>,
}

impl EventContext<'_> {
    /// Mutable access to the sub-scene at `index`.
    pub fn scene_mut(&mut self, index: usize) -> Option<&mut Box<dyn Scene>> {
        self.window.scenes_mut().get_mut(index)
    }

    /// Display rectangle of the sub-scene at `index`.
    #[must_use]
    pub fn scene_rect(&self, index: usize) -> Option<DisplayRect> {
        let size = self.window.size();
        self.window
            .scenes()
            .get(index)
            .map(|scene| scene_rect(scene.as_ref(), size))
    }

    /// Pointer displacement since the last press or move.
    #[must_use]
    pub fn delta(&self) -> IVec2 {
        self.position - self.last_position
    }
}

/// Index of the interactive sub-scene under `position`.
///
/// Later scenes are drawn on top, so they win. When no interactive scene
/// contains the point the first interactive one is used.
#[must_use]
pub fn find_poked_scene(
    window: &dyn RenderWindow,
    position: IVec2,
) -> Option<usize> {
    let size = window.size();
    let scenes = window.scenes();
    let (x, y) = (position.x as f32, position.y as f32);
    scenes
        .iter()
        .enumerate()
        .rev()
        .find(|(_, scene)| {
            scene.is_interactive()
                && scene_rect(scene.as_ref(), size).contains(x, y)
        })
        .or_else(|| {
            scenes
                .iter()
                .enumerate()
                .find(|(_, scene)| scene.is_interactive())
        })
        .map(|(index, _)| index)
}

/// Camera manipulation strategy installed in an [`InteractionController`].
pub trait CameraStyle: Send {
    /// Current manipulation state.
    fn state(&self) -> ManipulationState;

    /// A mouse button went down.
    fn on_button_press(&mut self, ctx: &mut EventContext<'_>, button: MouseButton);

    /// A mouse button went up.
    fn on_button_release(
        &mut self,
        ctx: &mut EventContext<'_>,
        button: MouseButton,
    );

    /// One wheel step, `forward` away from the user.
    fn on_wheel(&mut self, ctx: &mut EventContext<'_>, forward: bool);

    /// The pointer moved (or a frame passed with the pointer over the image).
    fn on_mouse_move(&mut self, ctx: &mut EventContext<'_>);

    /// Move the focal point onto the geometry under the pointer.
    fn fly_to(&mut self, ctx: &mut EventContext<'_>);

    /// Depth pick tolerance as a fraction of the window diagonal.
    fn pick_tolerance(&self) -> f32 {
        pick::DEFAULT_TOLERANCE
    }

    /// Push pending display state (such as a reconfigured marker) to the
    /// scenes before the next render.
    fn refresh(&mut self, window: &mut dyn RenderWindow) {
        let _ = window;
    }

    /// This style as a [`PivotStyle`], if it is one.
    fn as_pivot(&self) -> Option<&PivotStyle> {
        None
    }

    /// Mutable access as a [`PivotStyle`], if it is one.
    fn as_pivot_mut(&mut self) -> Option<&mut PivotStyle> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeScene, FakeWindow};

    #[test]
    fn topmost_interactive_scene_wins() {
        let mut left = FakeScene::default();
        left.viewport = [0.0, 0.0, 0.5, 1.0];
        let mut inset = FakeScene::default();
        inset.viewport = [0.0, 0.0, 0.25, 0.25];
        let window = FakeWindow::new(100, 100)
            .with_scene(left)
            .with_scene(inset);
        assert_eq!(find_poked_scene(&window, IVec2::new(10, 10)), Some(1));
        assert_eq!(find_poked_scene(&window, IVec2::new(40, 60)), Some(0));
    }

    #[test]
    fn non_interactive_scenes_are_skipped() {
        let mut overlay = FakeScene::default();
        overlay.interactive = false;
        let window = FakeWindow::new(100, 100)
            .with_scene(FakeScene::default())
            .with_scene(overlay);
        assert_eq!(find_poked_scene(&window, IVec2::new(50, 50)), Some(0));
    }

    #[test]
    fn falls_back_to_first_interactive_scene() {
        let mut right = FakeScene::default();
        right.viewport = [0.5, 0.0, 1.0, 1.0];
        let window = FakeWindow::new(100, 100).with_scene(right);
        assert_eq!(find_poked_scene(&window, IVec2::new(10, 10)), Some(0));
        let empty = FakeWindow::new(100, 100);
        assert_eq!(find_poked_scene(&empty, IVec2::new(10, 10)), None);
    }
}
