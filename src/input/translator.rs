//! Converts per-frame GUI input snapshots into canonical events.
//!
//! The translator owns no input state of its own: everything it needs
//! arrives in the [`InputSnapshot`] and everything it produces goes straight
//! to the [`InteractionEngine`] passed to [`EventTranslator::process`].

use glam::IVec2;

use super::event::{CanonicalEvent, EventInformation, MouseButton};
use super::keys::NamedKey;
use super::snapshot::InputSnapshot;
use crate::interaction::InteractionEngine;
use crate::options::PointerPolicy;

/// Turns an [`InputSnapshot`] into press/release/move/wheel/key events.
///
/// # Usage
///
/// ```ignore
/// // Once per drawn frame, after the image has been placed:
/// translator.process(&gui.input_snapshot(), &mut interactor.bind(&mut target));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EventTranslator {
    policy: PointerPolicy,
}

impl EventTranslator {
    /// Translator with the given out-of-image pointer policy.
    #[must_use]
    pub fn new(policy: PointerPolicy) -> Self {
        Self { policy }
    }

    /// Current out-of-image pointer policy.
    #[must_use]
    pub fn policy(&self) -> PointerPolicy {
        self.policy
    }

    /// Change the out-of-image pointer policy.
    pub fn set_policy(&mut self, policy: PointerPolicy) {
        self.policy = policy;
    }

    /// Dispatch one frame of input.
    ///
    /// Nothing is dispatched unless the image is hovered or focused. Per
    /// frame the engine receives: event information, at most one button
    /// press (or else one wheel step), at most one button release, exactly
    /// one `MouseMove`, then key events. Presses, wheel and keys require
    /// hover; releases and the move only require focus.
    pub fn process(
        &self,
        snapshot: &InputSnapshot,
        engine: &mut dyn InteractionEngine,
    ) {
        if !snapshot.hovered && !snapshot.focused {
            return;
        }

        let position = IVec2::new(
            snapshot.pointer.x.floor() as i32,
            snapshot.pointer.y.floor() as i32,
        );
        if (position.x < 0 || position.y < 0)
            && self.policy == PointerPolicy::Suppress
        {
            log::trace!("pointer {position} outside image, frame suppressed");
            return;
        }

        let info = EventInformation {
            position,
            ctrl: snapshot.modifiers.ctrl,
            shift: snapshot.modifiers.shift,
            key_char: '\0',
            repeat: u32::from(snapshot.any_double_click()),
            key_sym: None,
            buttons_down: snapshot.buttons_down,
        };
        engine.set_event_information_flip_y(info);

        Self::dispatch_buttons(snapshot, engine);
        engine.invoke(CanonicalEvent::MouseMove);

        if snapshot.hovered {
            Self::dispatch_keys(snapshot, info, engine);
        }
    }

    fn dispatch_buttons(
        snapshot: &InputSnapshot,
        engine: &mut dyn InteractionEngine,
    ) {
        let pressed = MouseButton::ALL
            .into_iter()
            .find(|b| snapshot.button(*b).pressed);
        let released = MouseButton::ALL
            .into_iter()
            .find(|b| snapshot.button(*b).released);

        if snapshot.hovered {
            if let Some(button) = pressed {
                log::trace!("dispatch press {button:?}");
                engine.invoke(CanonicalEvent::ButtonPress(button));
            }
        }
        if let Some(button) = released {
            log::trace!("dispatch release {button:?}");
            engine.invoke(CanonicalEvent::ButtonRelease(button));
        }
        if snapshot.hovered && pressed.is_none() {
            if snapshot.wheel > 0.0 {
                engine.invoke(CanonicalEvent::WheelForward);
            } else if snapshot.wheel < 0.0 {
                engine.invoke(CanonicalEvent::WheelBackward);
            }
        }
    }

    fn dispatch_keys(
        snapshot: &InputSnapshot,
        base: EventInformation,
        engine: &mut dyn InteractionEngine,
    ) {
        if snapshot.keys.is_empty() {
            return;
        }
        for key in NamedKey::ALL {
            if key.is_mouse() {
                continue;
            }
            let pressed = snapshot.keys.is_pressed(key);
            let released = snapshot.keys.is_released(key);
            if !pressed && !released {
                continue;
            }

            let (sym, ch) = key
                .keysym()
                .map_or((None, '\0'), |(sym, ch)| (Some(sym), ch));
            let info = EventInformation {
                key_char: ch,
                key_sym: sym,
                repeat: 0,
                ..base
            };
            log::trace!("dispatch key {key:?} ({sym:?})");

            // A tap inside one frame reports both; keep press/release
            // balanced for the receiver.
            if pressed {
                engine.set_event_information_flip_y(info);
                engine.invoke(CanonicalEvent::KeyPress { sym, ch });
            }
            if released {
                engine.set_event_information_flip_y(info);
                engine.invoke(CanonicalEvent::KeyRelease { sym, ch });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::testing::{Call, RecordingEngine};

    fn hovered_at(x: f32, y: f32) -> InputSnapshot {
        InputSnapshot {
            pointer: Vec2::new(x, y),
            hovered: true,
            ..InputSnapshot::default()
        }
    }

    fn run(snapshot: &InputSnapshot) -> Vec<Call> {
        let mut engine = RecordingEngine::default();
        EventTranslator::default().process(snapshot, &mut engine);
        engine.calls
    }

    fn events(calls: &[Call]) -> Vec<CanonicalEvent> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::Invoke(e) => Some(*e),
                Call::Info(_) => None,
            })
            .collect()
    }

    #[test]
    fn neither_hovered_nor_focused_dispatches_nothing() {
        let mut snapshot = hovered_at(10.0, 10.0);
        snapshot.hovered = false;
        snapshot.button_mut(MouseButton::Left).pressed = true;
        snapshot.wheel = 1.0;
        snapshot.keys.press(NamedKey::A);
        assert!(run(&snapshot).is_empty());
    }

    #[test]
    fn idle_hover_still_emits_info_and_move() {
        let calls = run(&hovered_at(12.7, 30.2));
        assert_eq!(calls.len(), 2);
        let Call::Info(info) = calls[0] else {
            panic!("expected event information first");
        };
        assert_eq!(info.position, IVec2::new(12, 30));
        assert_eq!(info.repeat, 0);
        assert_eq!(calls[1], Call::Invoke(CanonicalEvent::MouseMove));
    }

    #[test]
    fn negative_position_is_suppressed_by_default() {
        let mut snapshot = hovered_at(-0.5, 10.0);
        snapshot.button_mut(MouseButton::Left).pressed = true;
        assert!(run(&snapshot).is_empty());
    }

    #[test]
    fn forward_policy_dispatches_negative_positions() {
        let mut engine = RecordingEngine::default();
        let translator = EventTranslator::new(PointerPolicy::Forward);
        translator.process(&hovered_at(-3.0, 4.0), &mut engine);
        let Call::Info(info) = engine.calls[0] else {
            panic!("expected event information first");
        };
        assert_eq!(info.position, IVec2::new(-3, 4));
    }

    #[test]
    fn press_precedence_is_left_right_middle() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.button_mut(MouseButton::Right).pressed = true;
        snapshot.button_mut(MouseButton::Middle).pressed = true;
        assert_eq!(
            events(&run(&snapshot)),
            vec![
                CanonicalEvent::ButtonPress(MouseButton::Right),
                CanonicalEvent::MouseMove
            ]
        );
    }

    #[test]
    fn press_comes_before_release() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.button_mut(MouseButton::Left).pressed = true;
        snapshot.button_mut(MouseButton::Left).released = true;
        assert_eq!(
            events(&run(&snapshot)),
            vec![
                CanonicalEvent::ButtonPress(MouseButton::Left),
                CanonicalEvent::ButtonRelease(MouseButton::Left),
                CanonicalEvent::MouseMove
            ]
        );
    }

    #[test]
    fn focused_without_hover_only_releases() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.hovered = false;
        snapshot.focused = true;
        snapshot.button_mut(MouseButton::Left).pressed = true;
        snapshot.button_mut(MouseButton::Middle).released = true;
        snapshot.wheel = 2.0;
        snapshot.keys.press(NamedKey::R);
        assert_eq!(
            events(&run(&snapshot)),
            vec![
                CanonicalEvent::ButtonRelease(MouseButton::Middle),
                CanonicalEvent::MouseMove
            ]
        );
    }

    #[test]
    fn wheel_direction_follows_delta_sign() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.wheel = 0.5;
        assert_eq!(events(&run(&snapshot))[0], CanonicalEvent::WheelForward);
        snapshot.wheel = -0.5;
        assert_eq!(events(&run(&snapshot))[0], CanonicalEvent::WheelBackward);
    }

    #[test]
    fn wheel_is_skipped_when_a_button_was_pressed() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.wheel = 1.0;
        snapshot.button_mut(MouseButton::Left).pressed = true;
        let evs = events(&run(&snapshot));
        assert!(!evs.contains(&CanonicalEvent::WheelForward));
    }

    #[test]
    fn double_click_sets_repeat() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.button_mut(MouseButton::Middle).double_clicked = true;
        let Call::Info(info) = run(&snapshot)[0] else {
            panic!("expected event information first");
        };
        assert_eq!(info.repeat, 1);
    }

    #[test]
    fn keys_follow_the_move_with_their_own_information() {
        let mut snapshot = hovered_at(5.0, 6.0);
        snapshot.modifiers.shift = true;
        snapshot.keys.press(NamedKey::F);
        let calls = run(&snapshot);
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[1], Call::Invoke(CanonicalEvent::MouseMove));
        let Call::Info(info) = calls[2] else {
            panic!("expected key information");
        };
        assert_eq!(info.key_char, 'f');
        assert_eq!(info.key_sym, Some("f"));
        assert!(info.shift);
        assert_eq!(info.position, IVec2::new(5, 6));
        assert_eq!(
            calls[3],
            Call::Invoke(CanonicalEvent::KeyPress {
                sym: Some("f"),
                ch: 'f'
            })
        );
    }

    #[test]
    fn unmapped_keys_are_forwarded_without_symbol() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.keys.press(NamedKey::LeftSuper);
        snapshot.keys.release(NamedKey::LeftSuper);
        let evs = events(&run(&snapshot));
        assert_eq!(
            &evs[1..],
            &[
                CanonicalEvent::KeyPress { sym: None, ch: '\0' },
                CanonicalEvent::KeyRelease { sym: None, ch: '\0' }
            ]
        );
    }

    #[test]
    fn mouse_pseudo_keys_are_skipped() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.keys.press(NamedKey::MouseLeft);
        snapshot.keys.release(NamedKey::MouseWheelY);
        assert_eq!(events(&run(&snapshot)), vec![CanonicalEvent::MouseMove]);
    }

    #[test]
    fn keys_dispatch_in_named_order() {
        let mut snapshot = hovered_at(5.0, 5.0);
        snapshot.keys.release(NamedKey::Z);
        snapshot.keys.press(NamedKey::Tab);
        let evs = events(&run(&snapshot));
        assert_eq!(
            &evs[1..],
            &[
                CanonicalEvent::KeyPress {
                    sym: Some("Tab"),
                    ch: '\0'
                },
                CanonicalEvent::KeyRelease {
                    sym: Some("z"),
                    ch: 'z'
                }
            ]
        );
    }
}
