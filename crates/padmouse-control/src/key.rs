use enigo::Key as EnigoKey;

/// A key that can be emulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Unicode(char),
    Control,
    Meta,
    Shift,
    Alt,
    Home,
    End,
    PageUp,
    PageDown,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
    Delete,
    Backspace,
    Escape,
    Tab,
    Space,
    Return,
    VolumeUp,
    VolumeDown,
    VolumeMute,
    MediaPlayPause,
    MediaNextTrack,
    MediaPrevTrack,
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
}

impl From<Key> for EnigoKey {
    fn from(key: Key) -> Self {
        key.to_enigo()
    }
}

impl From<&Key> for EnigoKey {
    fn from(key: &Key) -> Self {
        key.to_enigo()
    }
}

impl Key {
    pub fn to_enigo(&self) -> EnigoKey {
        match self {
            Key::Unicode(ch) => EnigoKey::Unicode(*ch),
            Key::Control => EnigoKey::Control,
            Key::Meta => EnigoKey::Meta,
            Key::Shift => EnigoKey::Shift,
            Key::Alt => EnigoKey::Alt,
            Key::Home => EnigoKey::Home,
            Key::End => EnigoKey::End,
            Key::PageUp => EnigoKey::PageUp,
            Key::PageDown => EnigoKey::PageDown,
            Key::UpArrow => EnigoKey::UpArrow,
            Key::DownArrow => EnigoKey::DownArrow,
            Key::LeftArrow => EnigoKey::LeftArrow,
            Key::RightArrow => EnigoKey::RightArrow,
            Key::Delete => EnigoKey::Delete,
            Key::Backspace => EnigoKey::Backspace,
            Key::Escape => EnigoKey::Escape,
            Key::Tab => EnigoKey::Tab,
            Key::Space => EnigoKey::Space,
            Key::Return => EnigoKey::Return,
            Key::VolumeUp => EnigoKey::VolumeUp,
            Key::VolumeDown => EnigoKey::VolumeDown,
            Key::VolumeMute => EnigoKey::VolumeMute,
            Key::MediaPlayPause => EnigoKey::MediaPlayPause,
            Key::MediaNextTrack => EnigoKey::MediaNextTrack,
            Key::MediaPrevTrack => EnigoKey::MediaPrevTrack,
            Key::F1 => EnigoKey::F1,
            Key::F2 => EnigoKey::F2,
            Key::F3 => EnigoKey::F3,
            Key::F4 => EnigoKey::F4,
            Key::F5 => EnigoKey::F5,
            Key::F6 => EnigoKey::F6,
            Key::F7 => EnigoKey::F7,
            Key::F8 => EnigoKey::F8,
            Key::F9 => EnigoKey::F9,
            Key::F10 => EnigoKey::F10,
            Key::F11 => EnigoKey::F11,
            Key::F12 => EnigoKey::F12,
            Key::F13 => EnigoKey::F13,
            Key::F14 => EnigoKey::F14,
            Key::F15 => EnigoKey::F15,
            Key::F16 => EnigoKey::F16,
            Key::F17 => EnigoKey::F17,
            Key::F18 => EnigoKey::F18,
            Key::F19 => EnigoKey::F19,
            Key::F20 => EnigoKey::F20,
        }
    }
}

/// Parse an X keysym-style key name.
///
/// Names are matched case-insensitively. Any other single character is
/// typed as itself, with ASCII letters folded to lowercase.
///
/// ```ignore
/// assert_eq!(parse_key("XF86AudioPlay"), Some(Key::MediaPlayPause));
/// assert_eq!(parse_key("q"), Some(Key::Unicode('q')));
/// ```
pub(crate) fn parse_key(input: &str) -> Option<Key> {
    let mut chars = input.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        return Some(Key::Unicode(ch.to_ascii_lowercase()));
    }

    let name = input.to_ascii_lowercase();
    let key = match name.as_str() {
        // Modifiers
        "control" | "ctrl" | "control_l" | "control_r" => Key::Control,
        "super" | "meta" | "cmd" | "super_l" | "super_r" => Key::Meta,
        "shift" | "shift_l" | "shift_r" => Key::Shift,
        "alt" | "alt_l" | "alt_r" => Key::Alt,

        // Navigation
        "home" => Key::Home,
        "end" => Key::End,
        "prior" | "page_up" => Key::PageUp,
        "next" | "page_down" => Key::PageDown,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,

        // Editing
        "delete" => Key::Delete,
        "backspace" => Key::Backspace,
        "escape" | "esc" => Key::Escape,
        "tab" => Key::Tab,
        "space" => Key::Space,
        "return" | "enter" => Key::Return,

        // Media
        "xf86audioraisevolume" => Key::VolumeUp,
        "xf86audiolowervolume" => Key::VolumeDown,
        "xf86audiomute" => Key::VolumeMute,
        "xf86audioplay" => Key::MediaPlayPause,
        "xf86audionext" => Key::MediaNextTrack,
        "xf86audioprev" => Key::MediaPrevTrack,

        // Punctuation names
        "plus" => Key::Unicode('+'),
        "minus" => Key::Unicode('-'),

        "f1" => Key::F1,
        "f2" => Key::F2,
        "f3" => Key::F3,
        "f4" => Key::F4,
        "f5" => Key::F5,
        "f6" => Key::F6,
        "f7" => Key::F7,
        "f8" => Key::F8,
        "f9" => Key::F9,
        "f10" => Key::F10,
        "f11" => Key::F11,
        "f12" => Key::F12,
        "f13" => Key::F13,
        "f14" => Key::F14,
        "f15" => Key::F15,
        "f16" => Key::F16,
        "f17" => Key::F17,
        "f18" => Key::F18,
        "f19" => Key::F19,
        "f20" => Key::F20,
        _ => return None,
    };
    Some(key)
}
