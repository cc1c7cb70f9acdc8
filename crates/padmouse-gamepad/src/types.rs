use evdev::AbsoluteAxisCode;

/// Logical controller buttons supported by this crate.
///
/// Triggers and the directional pad are not physical keys on the device:
/// triggers are binarized axes and the pad is a two-axis hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalButton {
    A,
    B,
    X,
    Y,
    LeftShoulder,
    RightShoulder,
    LeftTrigger,
    RightTrigger,
    LeftStick,
    RightStick,
    Start,
    Select,
    Home,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl LogicalButton {
    /// All logical buttons in declaration order.
    pub const ALL: [LogicalButton; 17] = [
        LogicalButton::A,
        LogicalButton::B,
        LogicalButton::X,
        LogicalButton::Y,
        LogicalButton::LeftShoulder,
        LogicalButton::RightShoulder,
        LogicalButton::LeftTrigger,
        LogicalButton::RightTrigger,
        LogicalButton::LeftStick,
        LogicalButton::RightStick,
        LogicalButton::Start,
        LogicalButton::Select,
        LogicalButton::Home,
        LogicalButton::DPadUp,
        LogicalButton::DPadDown,
        LogicalButton::DPadLeft,
        LogicalButton::DPadRight,
    ];
}

/// Analog stick selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickAxis {
    Left,
    Right,
}

impl StickAxis {
    /// Raw absolute channels backing this stick, as `(x, y)`.
    pub const fn channels(self) -> (AbsoluteAxisCode, AbsoluteAxisCode) {
        match self {
            StickAxis::Left => (AbsoluteAxisCode::ABS_X, AbsoluteAxisCode::ABS_Y),
            StickAxis::Right => (AbsoluteAxisCode::ABS_RX, AbsoluteAxisCode::ABS_RY),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonPhase {
    Pressed,
    Released,
}

/// A single edge of a logical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonTransition {
    pub button: LogicalButton,
    pub phase: ButtonPhase,
}

impl ButtonTransition {
    pub const fn pressed(button: LogicalButton) -> Self {
        Self {
            button,
            phase: ButtonPhase::Pressed,
        }
    }

    pub const fn released(button: LogicalButton) -> Self {
        Self {
            button,
            phase: ButtonPhase::Released,
        }
    }
}

/// Controller meta information reported by discovery.
#[derive(Debug, Clone)]
pub struct ControllerInfo {
    pub path: std::path::PathBuf,
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
}
