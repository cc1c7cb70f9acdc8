use std::time::Duration;

use ahash::AHashMap;
use padmouse_control::{KeySequence, MouseButton};
use padmouse_gamepad::LogicalButton;

use super::raw::{ProfileV1, ProfileV1ButtonRule, VersionedProfile};
use super::{Binding, Config, ConfigError};

/// Parse yaml profile.
pub fn parse_profile(input: &str) -> Result<Config, ConfigError> {
    let version = parse_version(input)?;
    match version {
        1 => {
            let profile: ProfileV1 = serde_yaml::from_str(input)?;
            profile.to_config()
        }
        _ => Err(ConfigError::UnsupportedVersion(version)),
    }
}

/// Parse the version of yaml profile.
fn parse_version(input: &str) -> Result<u8, ConfigError> {
    let raw: VersionedProfile = serde_yaml::from_str(input)?;
    Ok(raw.version)
}

impl ProfileV1 {
    fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::default();

        if let Some(tick_ms) = self.tick_ms {
            if tick_ms == 0 {
                return Err(ConfigError::InvalidValue("tick_ms must be positive".into()));
            }
            config.tick = Duration::from_millis(tick_ms);
        }

        if let Some(mouse) = &self.mouse {
            if let Some(speed) = mouse.default_speed {
                config.default_speed = parse_speed("mouse.default_speed", speed)?;
            }
            if let Some(speed) = mouse.precision_speed {
                config.precision_speed = parse_speed("mouse.precision_speed", speed)?;
            }
        }

        if let Some(scroll) = &self.scroll {
            if let Some(ms) = scroll.min_speed_ms {
                config.scroll_min_speed_ms = ms as f32;
            }
            if let Some(ms) = scroll.max_speed_ms {
                config.scroll_max_speed_ms = ms as f32;
            }
        }

        if let Some(name) = &self.grab_toggle {
            config.grab_toggle = parse_button_name(name)?;
        }
        if let Some(name) = &self.speed_modifier {
            config.speed_modifier = parse_button_name(name)?;
        }
        if config.grab_toggle == config.speed_modifier {
            return Err(ConfigError::InvalidValue(
                "grab_toggle and speed_modifier must be different buttons".into(),
            ));
        }

        if let Some(buttons) = &self.buttons {
            let mut bindings = AHashMap::with_capacity(buttons.len());
            for (name, rule) in buttons {
                let button = parse_button_name(name)?;
                if bindings.insert(button, parse_button_rule(name, rule)?).is_some() {
                    return Err(ConfigError::InvalidValue(format!("{name} is bound twice")));
                }
            }
            config.bindings = bindings;
        }

        Ok(config)
    }
}

fn parse_speed(field: &str, speed: f32) -> Result<f32, ConfigError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(ConfigError::InvalidValue(format!("{field} must be positive, got {speed}")))
    }
}

fn parse_button_rule(name: &str, rule: &ProfileV1ButtonRule) -> Result<Binding, ConfigError> {
    match (&rule.mouse, &rule.keys) {
        (Some(mouse), None) => mouse
            .parse::<MouseButton>()
            .map(Binding::Mouse)
            .map_err(|_| ConfigError::InvalidMouseButton(mouse.clone())),
        (None, Some(keys)) => keys
            .parse::<KeySequence>()
            .map(Binding::Keys)
            .map_err(|e| ConfigError::InvalidKeys(name.to_string(), e)),
        _ => Err(ConfigError::InvalidAction(name.to_string())),
    }
}

/// Parse a button name into a `LogicalButton`.
///
/// Both the Nintendo (`l`, `zl`, `plus`) and the Xbox (`lb`, `lt`, `start`)
/// spellings are accepted.
pub fn parse_button_name(name: &str) -> Result<LogicalButton, ConfigError> {
    Ok(match name.trim().to_ascii_lowercase().as_str() {
        "a" => LogicalButton::A,
        "b" => LogicalButton::B,
        "x" => LogicalButton::X,
        "y" => LogicalButton::Y,

        "minus" | "select" | "back" => LogicalButton::Select,
        "plus" | "start" => LogicalButton::Start,
        "home" | "guide" => LogicalButton::Home,

        "ls" | "left_stick" | "lpad" => LogicalButton::LeftStick,
        "rs" | "right_stick" | "rpad" => LogicalButton::RightStick,

        "l" | "lb" | "left_shoulder" | "l1" => LogicalButton::LeftShoulder,
        "r" | "rb" | "right_shoulder" | "r1" => LogicalButton::RightShoulder,
        "zl" | "lt" | "left_trigger" | "l2" => LogicalButton::LeftTrigger,
        "zr" | "rt" | "right_trigger" | "r2" => LogicalButton::RightTrigger,

        "dpad_up" => LogicalButton::DPadUp,
        "dpad_down" => LogicalButton::DPadDown,
        "dpad_left" => LogicalButton::DPadLeft,
        "dpad_right" => LogicalButton::DPadRight,

        _ => return Err(ConfigError::InvalidButton(name.to_string())),
    })
}
