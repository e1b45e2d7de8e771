use glam::Vec2;

use super::event::MouseButton;
use super::keys::NamedKey;

/// Modifier keys held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Control (Command on macOS).
    pub ctrl: bool,
    /// Shift.
    pub shift: bool,
}

/// Transitions of one mouse button during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonTransitions {
    /// Went down this frame.
    pub pressed: bool,
    /// Went up this frame.
    pub released: bool,
    /// Second press of a double click this frame.
    pub double_clicked: bool,
}

/// Per-key pressed/released flags over [`NamedKey`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyTransitions {
    pressed: u128,
    released: u128,
}

impl KeyTransitions {
    /// Mark `key` as pressed (or auto-repeated) this frame.
    pub fn press(&mut self, key: NamedKey) {
        self.pressed |= 1_u128 << key.index();
    }

    /// Mark `key` as released this frame.
    pub fn release(&mut self, key: NamedKey) {
        self.released |= 1_u128 << key.index();
    }

    /// Went down this frame.
    #[must_use]
    pub fn is_pressed(&self, key: NamedKey) -> bool {
        self.pressed & (1_u128 << key.index()) != 0
    }

    /// Went up this frame.
    #[must_use]
    pub fn is_released(&self, key: NamedKey) -> bool {
        self.released & (1_u128 << key.index()) != 0
    }

    /// No key changed this frame.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pressed == 0 && self.released == 0
    }
}

/// One frame of GUI input as seen by the embedded image.
///
/// Built fresh by the GUI adapter each frame and consumed once by the
/// [`EventTranslator`](super::EventTranslator).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Pointer in physical pixels relative to the image's top-left corner.
    /// Negative when the pointer is left of or above the image.
    pub pointer: Vec2,
    /// Pointer is over the image.
    pub hovered: bool,
    /// The image region has keyboard focus.
    pub focused: bool,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Transitions indexed by [`MouseButton::index`].
    pub buttons: [ButtonTransitions; 3],
    /// Buttons down at the end of the frame, indexed like `buttons`, when
    /// the GUI reports them. Only the first release of a frame is
    /// dispatched; styles use this to drop buttons released alongside it.
    pub buttons_down: Option<[bool; 3]>,
    /// Wheel delta this frame; positive scrolls away from the user.
    pub wheel: f32,
    /// Key transitions this frame.
    pub keys: KeyTransitions,
}

impl InputSnapshot {
    /// Transitions of one button.
    #[must_use]
    pub fn button(&self, button: MouseButton) -> ButtonTransitions {
        self.buttons[button.index()]
    }

    /// Mutable transitions of one button.
    pub fn button_mut(&mut self, button: MouseButton) -> &mut ButtonTransitions {
        &mut self.buttons[button.index()]
    }

    /// Any button was double-clicked this frame.
    #[must_use]
    pub fn any_double_click(&self) -> bool {
        self.buttons.iter().any(|b| b.double_clicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bits_are_independent() {
        let mut keys = KeyTransitions::default();
        assert!(keys.is_empty());
        keys.press(NamedKey::MouseWheelY);
        keys.release(NamedKey::Tab);
        assert!(keys.is_pressed(NamedKey::MouseWheelY));
        assert!(!keys.is_released(NamedKey::MouseWheelY));
        assert!(keys.is_released(NamedKey::Tab));
        assert!(!keys.is_pressed(NamedKey::Tab));
    }
}
