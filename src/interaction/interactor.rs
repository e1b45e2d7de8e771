use glam::IVec2;

use super::{EventContext, InteractionController, InteractionEngine};
use crate::input::{CanonicalEvent, EventInformation};
use crate::render::RenderWindow;

/// Event receiver for one embedded window.
///
/// Holds the latest event information and the position of the previous
/// press or move; camera work is delegated to the
/// [`InteractionController`]. The window itself is only borrowed while
/// events are delivered, through [`bind`](Self::bind).
pub struct Interactor {
    controller: InteractionController,
    info: EventInformation,
    last_position: IVec2,
}

impl Interactor {
    /// Interactor driving `controller`.
    #[must_use]
    pub fn new(controller: InteractionController) -> Self {
        Self {
            controller,
            info: EventInformation::default(),
            last_position: IVec2::ZERO,
        }
    }

    /// The controller receiving events.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Mutable access to the controller.
    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    /// Latest event information, position in display coordinates.
    #[must_use]
    pub fn event_information(&self) -> EventInformation {
        self.info
    }

    /// Position of the previous press or move.
    #[must_use]
    pub fn last_position(&self) -> IVec2 {
        self.last_position
    }

    /// Borrow `window` for event delivery.
    pub fn bind<'a>(
        &'a mut self,
        window: &'a mut dyn RenderWindow,
    ) -> BoundInteractor<'a> {
        BoundInteractor {
            interactor: self,
            window,
        }
    }

    /// Let the style push pending display state before a render.
    pub fn refresh(&mut self, window: &mut dyn RenderWindow) {
        self.controller.style_mut().refresh(window);
    }
}

/// An [`Interactor`] bound to the window its events manipulate.
pub struct BoundInteractor<'a> {
    interactor: &'a mut Interactor,
    window: &'a mut dyn RenderWindow,
}

impl InteractionEngine for BoundInteractor<'_> {
    fn set_event_information_flip_y(&mut self, info: EventInformation) {
        let height = self.window.size().height;
        self.interactor.info = EventInformation {
            position: IVec2::new(info.position.x, height - info.position.y - 1),
            ..info
        };
    }

    fn invoke(&mut self, event: CanonicalEvent) {
        let info = self.interactor.info;
        let mut ctx = EventContext {
            window: &mut *self.window,
            position: info.position,
            last_position: self.interactor.last_position,
            ctrl: info.ctrl,
            shift: info.shift,
            buttons_down: info.buttons_down,
        };
        let style = self.interactor.controller.style_mut();
        match event {
            CanonicalEvent::ButtonPress(button) => {
                style.on_button_press(&mut ctx, button);
                self.interactor.last_position = info.position;
            }
            CanonicalEvent::ButtonRelease(button) => {
                style.on_button_release(&mut ctx, button);
            }
            CanonicalEvent::WheelForward => style.on_wheel(&mut ctx, true),
            CanonicalEvent::WheelBackward => style.on_wheel(&mut ctx, false),
            CanonicalEvent::MouseMove => {
                style.on_mouse_move(&mut ctx);
                self.interactor.last_position = info.position;
            }
            CanonicalEvent::KeyPress { ch, .. } => {
                if ch != '\0' {
                    self.interactor.controller.on_char(&mut ctx, ch);
                }
            }
            CanonicalEvent::KeyRelease { .. } => {}
        }
    }
}
