use enigo::{InputError, NewConError};
use thiserror::Error;

use crate::config::ConfigError;

/// Fatal daemon errors. Any of these ends the control loop.
#[derive(Debug, Error)]
pub enum Error {
    #[error("controller error: {0}")]
    Device(#[from] padmouse_gamepad::Error),
    #[error("failed to simulate input: {0}")]
    Actuation(#[from] InputError),
    #[error("failed to start input performer: {0}")]
    Performer(#[from] NewConError),
    #[error("profile error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to set Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
