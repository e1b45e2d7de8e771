//! Fixed named-key range polled by the event translator and its keysym
//! table.

/// Every key the translator polls each frame, in polling order.
///
/// The trailing mouse pseudo-keys exist so GUI adapters can report them, but
/// the translator never turns them into key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum NamedKey {
    Tab,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
    PageUp,
    PageDown,
    Home,
    End,
    Insert,
    Delete,
    Backspace,
    Space,
    Enter,
    Escape,
    LeftCtrl,
    LeftShift,
    LeftAlt,
    LeftSuper,
    RightCtrl,
    RightShift,
    RightAlt,
    RightSuper,
    Menu,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Semicolon,
    Equal,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,
    AppBack,
    AppForward,
    MouseLeft,
    MouseRight,
    MouseMiddle,
    MouseX1,
    MouseX2,
    MouseWheelX,
    MouseWheelY,
}

impl NamedKey {
    /// Number of named keys.
    pub const COUNT: usize = 126;

    /// All named keys in polling order.
    pub const ALL: [NamedKey; Self::COUNT] = [
        Self::Tab,
        Self::LeftArrow,
        Self::RightArrow,
        Self::UpArrow,
        Self::DownArrow,
        Self::PageUp,
        Self::PageDown,
        Self::Home,
        Self::End,
        Self::Insert,
        Self::Delete,
        Self::Backspace,
        Self::Space,
        Self::Enter,
        Self::Escape,
        Self::LeftCtrl,
        Self::LeftShift,
        Self::LeftAlt,
        Self::LeftSuper,
        Self::RightCtrl,
        Self::RightShift,
        Self::RightAlt,
        Self::RightSuper,
        Self::Menu,
        Self::Num0,
        Self::Num1,
        Self::Num2,
        Self::Num3,
        Self::Num4,
        Self::Num5,
        Self::Num6,
        Self::Num7,
        Self::Num8,
        Self::Num9,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
        Self::K,
        Self::L,
        Self::M,
        Self::N,
        Self::O,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::X,
        Self::Y,
        Self::Z,
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
        Self::F13,
        Self::F14,
        Self::F15,
        Self::F16,
        Self::F17,
        Self::F18,
        Self::F19,
        Self::F20,
        Self::F21,
        Self::F22,
        Self::F23,
        Self::F24,
        Self::Apostrophe,
        Self::Comma,
        Self::Minus,
        Self::Period,
        Self::Slash,
        Self::Semicolon,
        Self::Equal,
        Self::LeftBracket,
        Self::Backslash,
        Self::RightBracket,
        Self::GraveAccent,
        Self::CapsLock,
        Self::ScrollLock,
        Self::NumLock,
        Self::PrintScreen,
        Self::Pause,
        Self::Keypad0,
        Self::Keypad1,
        Self::Keypad2,
        Self::Keypad3,
        Self::Keypad4,
        Self::Keypad5,
        Self::Keypad6,
        Self::Keypad7,
        Self::Keypad8,
        Self::Keypad9,
        Self::KeypadDecimal,
        Self::KeypadDivide,
        Self::KeypadMultiply,
        Self::KeypadSubtract,
        Self::KeypadAdd,
        Self::KeypadEnter,
        Self::KeypadEqual,
        Self::AppBack,
        Self::AppForward,
        Self::MouseLeft,
        Self::MouseRight,
        Self::MouseMiddle,
        Self::MouseX1,
        Self::MouseX2,
        Self::MouseWheelX,
        Self::MouseWheelY,
    ];

    /// Position in [`ALL`](Self::ALL).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Mouse pseudo-keys are polled but never dispatched.
    #[must_use]
    pub const fn is_mouse(self) -> bool {
        matches!(
            self,
            Self::MouseLeft
                | Self::MouseRight
                | Self::MouseMiddle
                | Self::MouseX1
                | Self::MouseX2
                | Self::MouseWheelX
                | Self::MouseWheelY
        )
    }

    /// X11-style key symbol and the character it types, if any.
    ///
    /// Keys without an entry dispatch with no symbol and `'\0'`.
    #[must_use]
    pub fn keysym(self) -> Option<(&'static str, char)> {
        KEYSYMS
            .iter()
            .find(|(key, _, _)| *key == self)
            .map(|&(_, sym, ch)| (sym, ch))
    }
}

/// X11 key symbols and typed characters of the keys that have them.
const KEYSYMS: &[(NamedKey, &str, char)] = &[
    (NamedKey::Tab, "Tab", '\0'),
    (NamedKey::LeftArrow, "Left", '\0'),
    (NamedKey::RightArrow, "Right", '\0'),
    (NamedKey::UpArrow, "Up", '\0'),
    (NamedKey::DownArrow, "Down", '\0'),
    (NamedKey::PageUp, "Prior", '\0'),
    (NamedKey::PageDown, "Next", '\0'),
    (NamedKey::Home, "Home", '\0'),
    (NamedKey::End, "End", '\0'),
    (NamedKey::Insert, "Insert", '\0'),
    (NamedKey::Delete, "Delete", '\0'),
    (NamedKey::Backspace, "BackSpace", '\0'),
    (NamedKey::Space, "space", ' '),
    (NamedKey::Enter, "Return", '\0'),
    (NamedKey::Escape, "Escape", '\0'),
    (NamedKey::LeftCtrl, "Control_L", '\0'),
    (NamedKey::LeftShift, "Shift_L", '\0'),
    (NamedKey::LeftAlt, "Alt_L", '\0'),
    (NamedKey::RightCtrl, "Control_R", '\0'),
    (NamedKey::RightShift, "Shift_R", '\0'),
    (NamedKey::RightAlt, "Alt_R", '\0'),
    (NamedKey::Menu, "Menu", '\0'),
    (NamedKey::Num0, "0", '0'),
    (NamedKey::Num1, "1", '1'),
    (NamedKey::Num2, "2", '2'),
    (NamedKey::Num3, "3", '3'),
    (NamedKey::Num4, "4", '4'),
    (NamedKey::Num5, "5", '5'),
    (NamedKey::Num6, "6", '6'),
    (NamedKey::Num7, "7", '7'),
    (NamedKey::Num8, "8", '8'),
    (NamedKey::Num9, "9", '9'),
    (NamedKey::A, "a", 'a'),
    (NamedKey::B, "b", 'b'),
    (NamedKey::C, "c", 'c'),
    (NamedKey::D, "d", 'd'),
    (NamedKey::E, "e", 'e'),
    (NamedKey::F, "f", 'f'),
    (NamedKey::G, "g", 'g'),
    (NamedKey::H, "h", 'h'),
    (NamedKey::I, "i", 'i'),
    (NamedKey::J, "j", 'j'),
    (NamedKey::K, "k", 'k'),
    (NamedKey::L, "l", 'l'),
    (NamedKey::M, "m", 'm'),
    (NamedKey::N, "n", 'n'),
    (NamedKey::O, "o", 'o'),
    (NamedKey::P, "p", 'p'),
    (NamedKey::Q, "q", 'q'),
    (NamedKey::R, "r", 'r'),
    (NamedKey::S, "s", 's'),
    (NamedKey::T, "t", 't'),
    (NamedKey::U, "u", 'u'),
    (NamedKey::V, "v", 'v'),
    (NamedKey::W, "w", 'w'),
    (NamedKey::X, "x", 'x'),
    (NamedKey::Y, "y", 'y'),
    (NamedKey::Z, "z", 'z'),
    (NamedKey::F1, "F1", '\0'),
    (NamedKey::F2, "F2", '\0'),
    (NamedKey::F3, "F3", '\0'),
    (NamedKey::F4, "F4", '\0'),
    (NamedKey::F5, "F5", '\0'),
    (NamedKey::F6, "F6", '\0'),
    (NamedKey::F7, "F7", '\0'),
    (NamedKey::F8, "F8", '\0'),
    (NamedKey::F9, "F9", '\0'),
    (NamedKey::F10, "F10", '\0'),
    (NamedKey::F11, "F11", '\0'),
    (NamedKey::F12, "F12", '\0'),
    (NamedKey::Apostrophe, "apostrophe", '\''),
    (NamedKey::Comma, "comma", ','),
    (NamedKey::Minus, "minus", '-'),
    (NamedKey::Period, "period", '.'),
    (NamedKey::Slash, "slash", '/'),
    (NamedKey::Semicolon, "semicolon", ';'),
    (NamedKey::Equal, "equal", '='),
    (NamedKey::LeftBracket, "bracketleft", '['),
    (NamedKey::Backslash, "backslash", '\\'),
    (NamedKey::RightBracket, "bracketright", ']'),
    (NamedKey::GraveAccent, "grave", '`'),
    (NamedKey::CapsLock, "Caps_Lock", '\0'),
    (NamedKey::ScrollLock, "Scroll_Lock", '\0'),
    (NamedKey::NumLock, "Num_Lock", '\0'),
    (NamedKey::PrintScreen, "Print", '\0'),
    (NamedKey::Pause, "Pause", '\0'),
    (NamedKey::Keypad0, "KP_0", '0'),
    (NamedKey::Keypad1, "KP_1", '1'),
    (NamedKey::Keypad2, "KP_2", '2'),
    (NamedKey::Keypad3, "KP_3", '3'),
    (NamedKey::Keypad4, "KP_4", '4'),
    (NamedKey::Keypad5, "KP_5", '5'),
    (NamedKey::Keypad6, "KP_6", '6'),
    (NamedKey::Keypad7, "KP_7", '7'),
    (NamedKey::Keypad8, "KP_8", '8'),
    (NamedKey::Keypad9, "KP_9", '9'),
    (NamedKey::KeypadDecimal, "KP_Decimal", '.'),
    (NamedKey::KeypadDivide, "KP_Divide", '/'),
    (NamedKey::KeypadMultiply, "KP_Multiply", '*'),
    (NamedKey::KeypadSubtract, "KP_Subtract", '-'),
    (NamedKey::KeypadAdd, "KP_Add", '+'),
    (NamedKey::KeypadEnter, "KP_Enter", '\0'),
];
