//! Port traits: the hexagonal boundary between the alarm rules and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (storage, image classifier, listeners) implement these
//! traits.  The [`SecurityService`](super::service::SecurityService) takes
//! them by value through generics or boxed sinks, so the rules never touch
//! files, models or UI code directly.

use image::DynamicImage;

use super::events::SecurityEvent;
use super::model::{AlarmStatus, ArmingStatus, Sensor, SensorId};

// ───────────────────────────────────────────────────────────────
// Repository port (domain ↔ persistent state)
// ───────────────────────────────────────────────────────────────

/// Holds the canonical sensor set plus both status values.
///
/// Implementations must be read-your-writes: a getter called after a
/// successful setter returns the written value.  No thread-safety is
/// required; [`SharedSecurityService`](crate::shared::SharedSecurityService)
/// serialises access when it matters.
pub trait SecurityRepository {
    fn alarm_status(&self) -> AlarmStatus;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError>;

    fn arming_status(&self) -> ArmingStatus;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError>;

    /// Every known sensor.  Order is unspecified.
    fn sensors(&self) -> Vec<Sensor>;

    /// Look up a sensor by identity.
    fn sensor(&self, id: &SensorId) -> Option<Sensor>;

    /// Insert a sensor.  Returns `Ok(false)` without touching the stored
    /// copy if the identity is already present.
    fn add_sensor(&mut self, sensor: Sensor) -> Result<bool, StorageError>;

    /// Remove a sensor.  Returns `Ok(false)` if it was not present.
    fn remove_sensor(&mut self, id: &SensorId) -> Result<bool, StorageError>;

    /// Overwrite the stored copy of an existing sensor.
    /// Returns `Ok(false)` if the identity is unknown.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<bool, StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Cat detection port (domain → image classifier)
// ───────────────────────────────────────────────────────────────

/// External image classifier.
///
/// The service treats this as a blocking, possibly slow call and does no
/// retrying or caching of its own.  An outage must surface as an error:
/// reporting "no cat" instead would quietly clear alarms.
pub trait CatDetector {
    /// Whether `image` shows a cat with at least `confidence_threshold`
    /// percent confidence.
    fn contains_cat(
        &mut self,
        image: &DynamicImage,
        confidence_threshold: f32,
    ) -> Result<bool, DetectorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → UI / logging)
// ───────────────────────────────────────────────────────────────

/// Subscribers receive every [`SecurityEvent`] synchronously, inline with
/// the operation that caused it.
pub trait EventSink {
    fn emit(&mut self, event: &SecurityEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SecurityRepository`] writes.
#[derive(Debug)]
pub enum StorageError {
    /// Backing file could not be read or written.
    Io(std::io::Error),
    /// Stored snapshot failed to (de)serialise.
    Corrupted(String),
}

/// Errors from [`CatDetector`] calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    /// The classifier could not be reached.
    Unavailable(String),
    /// The classifier rejected the image.
    InvalidImage(String),
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Corrupted(msg) => write!(f, "corrupted snapshot: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Corrupted(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupted(e.to_string())
    }
}

impl core::fmt::Display for DetectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "detector unavailable: {}", msg),
            Self::InvalidImage(msg) => write!(f, "invalid image: {}", msg),
        }
    }
}

impl std::error::Error for DetectorError {}
