use std::str::FromStr;

use enigo::{Axis, Button};
use serde::Deserialize;

/// Pointer button that can be emulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const fn to_enigo(self) -> Button {
        match self {
            MouseButton::Left => Button::Left,
            MouseButton::Middle => Button::Middle,
            MouseButton::Right => Button::Right,
        }
    }
}

impl FromStr for MouseButton {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "middle" => Ok(MouseButton::Middle),
            "right" => Ok(MouseButton::Right),
            _ => Err(format!("Invalid mouse button: {s}")),
        }
    }
}

/// Direction of a single scroll wheel click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Up,
    Down,
    Left,
    Right,
}

impl WheelDirection {
    pub const ALL: [WheelDirection; 4] = [
        WheelDirection::Up,
        WheelDirection::Down,
        WheelDirection::Left,
        WheelDirection::Right,
    ];

    /// Scroll axis and signed step for one click.
    pub const fn to_enigo(self) -> (Axis, i32) {
        match self {
            WheelDirection::Up => (Axis::Vertical, -1),
            WheelDirection::Down => (Axis::Vertical, 1),
            WheelDirection::Left => (Axis::Horizontal, -1),
            WheelDirection::Right => (Axis::Horizontal, 1),
        }
    }
}
