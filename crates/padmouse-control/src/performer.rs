use enigo::{
    Coordinate,
    Direction::{Press, Release},
    Enigo, InputResult, Keyboard, Mouse, NewConError, Settings,
};

use crate::{KeySequence, MouseButton, WheelDirection};

/// Injects pointer and keyboard input into the desktop session.
pub struct Performer {
    enigo: Enigo,
}

impl Performer {
    /// Create a new performer.
    pub fn new() -> Result<Self, NewConError> {
        let settings = Settings::default();
        let enigo = Enigo::new(&settings)?;
        Ok(Self { enigo })
    }

    /// Hold a pointer button.
    pub fn pointer_down(&mut self, button: MouseButton) -> InputResult<()> {
        self.enigo.button(button.to_enigo(), Press)
    }

    /// Let go of a pointer button.
    pub fn pointer_up(&mut self, button: MouseButton) -> InputResult<()> {
        self.enigo.button(button.to_enigo(), Release)
    }

    /// Move the pointer relative to its current position.
    pub fn move_pointer(&mut self, dx: i32, dy: i32) -> InputResult<()> {
        self.enigo.move_mouse(dx, dy, Coordinate::Rel)
    }

    /// Scroll one wheel click.
    pub fn wheel(&mut self, direction: WheelDirection) -> InputResult<()> {
        let (axis, step) = direction.to_enigo();
        self.enigo.scroll(step, axis)
    }

    /// Hold the keys of a sequence.
    pub fn press(&mut self, sequence: &KeySequence) -> InputResult<()> {
        for key in sequence.press_order() {
            self.enigo.key(key.into(), Press)?;
        }
        Ok(())
    }

    /// Release the keys of a sequence.
    pub fn release(&mut self, sequence: &KeySequence) -> InputResult<()> {
        for key in sequence.release_order() {
            self.enigo.key(key.into(), Release)?;
        }
        Ok(())
    }
}
