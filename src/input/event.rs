use glam::IVec2;

/// Canonical pointer and keyboard events injected into an
/// [`InteractionEngine`](crate::interaction::InteractionEngine).
///
/// Position and modifier state travel separately in [`EventInformation`],
/// set before the events it qualifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalEvent {
    /// Pointer position update. Emitted once per processed frame.
    MouseMove,
    /// Button went down.
    ButtonPress(MouseButton),
    /// Button went up.
    ButtonRelease(MouseButton),
    /// Wheel scrolled away from the user.
    WheelForward,
    /// Wheel scrolled toward the user.
    WheelBackward,
    /// Key went down (or auto-repeated).
    KeyPress {
        /// X11-style key symbol, `None` for keys without one.
        sym: Option<&'static str>,
        /// Typed character, `'\0'` for none.
        ch: char,
    },
    /// Key went up.
    KeyRelease {
        /// X11-style key symbol, `None` for keys without one.
        sym: Option<&'static str>,
        /// Typed character, `'\0'` for none.
        ch: char,
    },
}

/// Pointer position and modifier state qualifying the next events.
///
/// `position` is in GUI coordinates: pixels from the image's top-left
/// corner, y growing downward. Engines flip it into display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventInformation {
    /// Pointer position relative to the image's top-left corner.
    pub position: IVec2,
    /// Control held.
    pub ctrl: bool,
    /// Shift held.
    pub shift: bool,
    /// Character of the key event, `'\0'` otherwise.
    pub key_char: char,
    /// `1` if any button was double-clicked this frame.
    pub repeat: u32,
    /// Key symbol of the key event.
    pub key_sym: Option<&'static str>,
    /// Buttons down at the end of the frame, when known.
    pub buttons_down: Option<[bool; 3]>,
}

impl Default for EventInformation {
    fn default() -> Self {
        Self {
            position: IVec2::ZERO,
            ctrl: false,
            shift: false,
            key_char: '\0',
            repeat: 0,
            key_sym: None,
            buttons_down: None,
        }
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

impl MouseButton {
    /// Buttons in dispatch precedence order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Middle];

    /// Index into per-button arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(feature = "egui")]
impl From<MouseButton> for egui::PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::Primary,
            MouseButton::Right => Self::Secondary,
            MouseButton::Middle => Self::Middle,
        }
    }
}
