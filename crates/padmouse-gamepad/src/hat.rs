use crate::types::{ButtonTransition, LogicalButton};

/// One axis of the directional-pad hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatAxis {
    /// Left (-1) / right (+1).
    X,
    /// Up (-1) / down (+1).
    Y,
}

impl HatAxis {
    /// Logical buttons for the `(positive, negative)` ends of the axis.
    const fn buttons(self) -> (LogicalButton, LogicalButton) {
        match self {
            HatAxis::X => (LogicalButton::DPadRight, LogicalButton::DPadLeft),
            HatAxis::Y => (LogicalButton::DPadDown, LogicalButton::DPadUp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HatDirection {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl HatDirection {
    const fn of(button: LogicalButton) -> Option<Self> {
        match button {
            LogicalButton::DPadUp => Some(HatDirection::Up),
            LogicalButton::DPadDown => Some(HatDirection::Down),
            LogicalButton::DPadLeft => Some(HatDirection::Left),
            LogicalButton::DPadRight => Some(HatDirection::Right),
            _ => None,
        }
    }
}

/// Held state of the four pad directions.
///
/// Invariant: up/down and left/right are never held at the same time once an
/// update has been applied to their axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HatState {
    held: [bool; 4],
}

impl HatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given pad button is currently held.
    /// Always false for buttons that are not pad directions.
    pub fn is_held(&self, button: LogicalButton) -> bool {
        HatDirection::of(button).is_some_and(|d| self.held[d as usize])
    }

    /// Apply a tri-state hat sample and push the resulting edges.
    ///
    /// Samples other than -1, 0 and 1 are ignored.
    pub fn update(&mut self, axis: HatAxis, value: i32, out: &mut Vec<ButtonTransition>) {
        let (positive, negative) = axis.buttons();
        match value {
            1 => {
                self.release(negative, out);
                self.press(positive, out);
            }
            0 => {
                self.release(negative, out);
                self.release(positive, out);
            }
            -1 => {
                self.press(negative, out);
                self.release(positive, out);
            }
            _ => {}
        }
    }

    /// Release every held direction, pushing an up edge for each.
    pub fn clear(&mut self, out: &mut Vec<ButtonTransition>) {
        self.update(HatAxis::X, 0, out);
        self.update(HatAxis::Y, 0, out);
    }

    fn press(&mut self, button: LogicalButton, out: &mut Vec<ButtonTransition>) {
        let Some(slot) = self.slot(button) else {
            return;
        };
        if !*slot {
            *slot = true;
            out.push(ButtonTransition::pressed(button));
        }
    }

    fn release(&mut self, button: LogicalButton, out: &mut Vec<ButtonTransition>) {
        let Some(slot) = self.slot(button) else {
            return;
        };
        if *slot {
            *slot = false;
            out.push(ButtonTransition::released(button));
        }
    }

    fn slot(&mut self, button: LogicalButton) -> Option<&mut bool> {
        HatDirection::of(button).map(|d| &mut self.held[d as usize])
    }

    #[cfg(test)]
    fn force_held(&mut self, button: LogicalButton) {
        if let Some(slot) = self.slot(button) {
            *slot = true;
        }
    }
}
