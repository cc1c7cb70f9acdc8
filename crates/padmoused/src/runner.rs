use padmouse_control::Performer;

use crate::{app::Action, print_debug, Error};

/// Executes control loop actions against the desktop session.
pub struct ActionRunner<'a> {
    performer: &'a mut Performer,
}

impl<'a> ActionRunner<'a> {
    pub fn new(performer: &'a mut Performer) -> Self {
        Self { performer }
    }

    pub fn run(&mut self, action: Action) -> Result<(), Error> {
        match action {
            Action::PointerDown(button) => {
                self.performer.pointer_down(button)?;
                print_debug!("mouse button {button:?} down");
            }
            Action::PointerUp(button) => {
                self.performer.pointer_up(button)?;
                print_debug!("mouse button {button:?} up");
            }
            Action::MovePointer { dx, dy } => {
                self.performer.move_pointer(dx, dy)?;
                log::trace!("move pointer: dx={dx} dy={dy}");
            }
            Action::KeyDown(keys) => {
                self.performer.press(&keys)?;
                print_debug!("keys down: '{keys}'");
            }
            Action::KeyUp(keys) => {
                self.performer.release(&keys)?;
                print_debug!("keys up: '{keys}'");
            }
            Action::Wheel(direction) => {
                self.performer.wheel(direction)?;
                print_debug!("scroll {direction:?}");
            }
        }
        Ok(())
    }
}
