//! Unified error type for the security core.
//!
//! Every fallible service operation funnels its port errors into [`Error`],
//! keeping the caller's handling uniform.  Invalid status values have no
//! variant here: the closed enums in [`crate::app::model`] make them
//! unrepresentable.

use core::fmt;

use crate::app::ports::{DetectorError, StorageError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Error {
    /// The repository could not persist a change.
    Storage(StorageError),
    /// The cat detector failed; the scan result is unknown.
    Detector(DetectorError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
    /// Another thread panicked while holding the shared service lock.
    LockPoisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Detector(e) => write!(f, "detector: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::LockPoisoned => write!(f, "security service lock poisoned"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            Self::Detector(e) => Some(e),
            Self::Config(_) | Self::LockPoisoned => None,
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<DetectorError> for Error {
    fn from(e: DetectorError) -> Self {
        Self::Detector(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
