mod key;
mod key_sequence;
mod modifiers;
mod mouse;
mod performer;

pub use key::Key;
pub use key_sequence::KeySequence;
pub use modifiers::{Modifier, Modifiers};
pub use mouse::{MouseButton, WheelDirection};
pub use performer::Performer;
