use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for controller session operations.
///
/// Every variant except [`Error::NoController`] and
/// [`Error::NotController`] wraps an I/O failure on the device node and is
/// unrecoverable for the session that produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// The device node could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    /// The device does not expose the axes, keys and rumble a controller needs.
    #[error("failed to connect to device {}: not a controller", .0.display())]
    NotController(PathBuf),
    /// Enumeration finished without finding a controller.
    #[error("no controller found")]
    NoController,
    /// Enumeration of input device nodes failed.
    #[error("failed to enumerate devices: {0}")]
    Enumerate(io::Error),
    /// Reading the next event failed for a reason other than "no data".
    #[error("failed to get next event: {0}")]
    Read(io::Error),
    /// Grabbing or releasing the device failed.
    #[error("failed to grab/ungrab controller: {0}")]
    Grab(io::Error),
    /// Uploading the rumble effect failed.
    #[error("failed to upload rumble effect: {0}")]
    EffectUpload(io::Error),
    /// Sending a rumble play or stop request failed.
    #[error("failed to send rumble event: {0}")]
    Rumble(io::Error),
}

/// Convenient result alias for controller operations.
pub type Result<T> = std::result::Result<T, Error>;
