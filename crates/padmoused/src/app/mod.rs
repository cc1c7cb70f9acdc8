mod padmouse;
mod scroll;

pub use padmouse::{Action, Padmouse};
pub use scroll::scroll_interval;
