//! Outbound security events.
//!
//! The [`SecurityService`](super::service::SecurityService) emits these to
//! every subscribed [`EventSink`](super::ports::EventSink).  Sinks decide
//! what to do with them: refresh a panel, write a log line, raise a buzzer.

use super::model::{AlarmStatus, ArmingStatus, Sensor};

/// Structured events emitted by the security core.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityEvent {
    /// The alarm status moved between two different values.
    AlarmStatusChanged { from: AlarmStatus, to: AlarmStatus },

    /// The arming profile moved between two different values.
    ArmingStatusChanged { from: ArmingStatus, to: ArmingStatus },

    /// A sensor's active flag changed (carries the new state).
    SensorStatusChanged(Sensor),

    /// A sensor joined the registry.
    SensorAdded(Sensor),

    /// A sensor left the registry.
    SensorRemoved(Sensor),

    /// Result of the latest image analysis.
    CatDetected(bool),
}
