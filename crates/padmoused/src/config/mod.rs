mod parse;
mod raw;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ahash::AHashMap;
use thiserror::Error;

use padmouse_control::{Key, KeySequence, Modifier, MouseButton};
use padmouse_gamepad::LogicalButton;

pub use parse::{parse_button_name, parse_profile};

pub const DEFAULT_TICK: Duration = Duration::from_millis(5);
pub const DEFAULT_MOUSE_SPEED: f32 = 1.7;
pub const PRECISION_MOUSE_SPEED: f32 = 0.3;
pub const SCROLL_MIN_SPEED_MS: f32 = 500.0;
pub const SCROLL_MAX_SPEED_MS: f32 = 30.0;

const PROFILE_DIR: &str = "padmouse";
const PROFILE_FILE: &str = "profile.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("yaml deserialize error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("invalid button: {0}")]
    InvalidButton(String),
    #[error("invalid mouse button: {0}")]
    InvalidMouseButton(String),
    #[error("invalid action for {0}: expected exactly one of `mouse` or `keys`")]
    InvalidAction(String),
    #[error("invalid keys for {0}: {1}")]
    InvalidKeys(String, String),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),
}

/// What a controller button does while the controller is grabbed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Mouse(MouseButton),
    Keys(KeySequence),
}

/// Static daemon configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Control loop period.
    pub tick: Duration,
    /// Pointer speed multiplier, in pixels per millisecond at full tilt.
    pub default_speed: f32,
    /// Pointer speed multiplier while the speed modifier is held.
    pub precision_speed: f32,
    /// Extra scroll interval added as the stick approaches center.
    pub scroll_min_speed_ms: f32,
    /// Scroll interval at full tilt.
    pub scroll_max_speed_ms: f32,
    pub grab_toggle: LogicalButton,
    pub speed_modifier: LogicalButton,
    pub bindings: AHashMap<LogicalButton, Binding>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            default_speed: DEFAULT_MOUSE_SPEED,
            precision_speed: PRECISION_MOUSE_SPEED,
            scroll_min_speed_ms: SCROLL_MIN_SPEED_MS,
            scroll_max_speed_ms: SCROLL_MAX_SPEED_MS,
            grab_toggle: LogicalButton::Home,
            speed_modifier: LogicalButton::LeftShoulder,
            bindings: default_bindings(),
        }
    }
}

/// Button table used when the profile does not define one.
pub fn default_bindings() -> AHashMap<LogicalButton, Binding> {
    let mouse = [
        (LogicalButton::A, MouseButton::Left),
        (LogicalButton::RightStick, MouseButton::Middle),
        (LogicalButton::Y, MouseButton::Right),
    ];
    let keys = [
        (LogicalButton::B, KeySequence::from_key(Key::Escape)),
        (LogicalButton::X, KeySequence::from_key(Key::MediaPlayPause)),
        (
            LogicalButton::RightShoulder,
            KeySequence::new(&[Modifier::Super], &[Key::Unicode('q')]),
        ),
        (
            LogicalButton::DPadLeft,
            KeySequence::new(&[Modifier::Super, Modifier::Ctrl], &[Key::Unicode('h')]),
        ),
        (
            LogicalButton::DPadRight,
            KeySequence::new(&[Modifier::Super, Modifier::Ctrl], &[Key::Unicode('l')]),
        ),
        (
            LogicalButton::DPadUp,
            KeySequence::new(&[Modifier::Super], &[Key::Unicode('f')]),
        ),
        (LogicalButton::Start, KeySequence::from_key(Key::VolumeUp)),
        (LogicalButton::Select, KeySequence::from_key(Key::VolumeDown)),
        (LogicalButton::LeftTrigger, KeySequence::from_key(Key::Shift)),
        (LogicalButton::RightTrigger, KeySequence::from_key(Key::Control)),
        (
            LogicalButton::LeftStick,
            KeySequence::new(&[Modifier::Super], &[Key::Unicode('d')]),
        ),
    ];

    mouse
        .into_iter()
        .map(|(button, mouse_button)| (button, Binding::Mouse(mouse_button)))
        .chain(
            keys.into_iter()
                .map(|(button, sequence)| (button, Binding::Keys(sequence))),
        )
        .collect()
}

/// Load the profile at `path`, or the default profile when no path is given.
///
/// A missing default profile is not an error: the built-in configuration is
/// used instead.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_profile_path() {
            Some(path) if path.is_file() => path,
            _ => return Ok(Config::default()),
        },
    };
    let input = std::fs::read_to_string(&path)?;
    parse_profile(&input)
}

/// `$XDG_CONFIG_HOME/padmouse/profile.yaml`, falling back to `~/.config`.
pub fn default_profile_path() -> Option<PathBuf> {
    profile_path_from(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn profile_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    let config_dir = match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.filter(|dir| !dir.is_empty())?).join(".config"),
    };
    Some(config_dir.join(PROFILE_DIR).join(PROFILE_FILE))
}
