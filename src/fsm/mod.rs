//! Alarm-status transition table.
//!
//! The whole rulebook is one pure function, [`next_alarm_status`], that maps
//! `(current alarm, arming profile, event)` to the next alarm status:
//!
//! ```text
//! ┌──────────────┬───────────────────────────────────┬──────────────┐
//! │ Current      │ Event                             │ Next         │
//! ├──────────────┼───────────────────────────────────┼──────────────┤
//! │ NoAlarm      │ sensor activated (armed)          │ PendingAlarm │
//! │ PendingAlarm │ sensor activated (armed)          │ Alarm        │
//! │ Alarm        │ any sensor event                  │ Alarm        │
//! │ PendingAlarm │ last active sensor deactivated    │ NoAlarm      │
//! │ PendingAlarm │ deactivated, others still active  │ PendingAlarm │
//! │ any          │ arming → Disarmed                 │ NoAlarm      │
//! │ any          │ arming → ArmedHome, cat in view   │ Alarm        │
//! │ any          │ cat scanned while ArmedHome       │ Alarm        │
//! │ any          │ no cat scanned, no active sensor  │ NoAlarm      │
//! └──────────────┴───────────────────────────────────┴──────────────┘
//! ```
//!
//! Anything not listed keeps the current status.  The service gathers the
//! facts an event needs (is another sensor active? was a cat seen last?)
//! and persists whatever this function returns.

use crate::app::model::{AlarmStatus, ArmingStatus};

/// Something that may move the alarm status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmEvent {
    /// A sensor went inactive → active.
    SensorActivated,
    /// A sensor went active → inactive.
    SensorDeactivated {
        /// Whether any *other* sensor is still active.
        others_active: bool,
    },
    /// The arming profile was set.
    ArmingChanged {
        to: ArmingStatus,
        /// Result of the most recent image scan.
        cat_detected: bool,
    },
    /// An image scan finished.
    ImageScanned {
        cat: bool,
        any_sensor_active: bool,
    },
}

/// Compute the alarm status that follows `event`.
///
/// `arming` is the profile in force when the event is evaluated (for
/// [`AlarmEvent::ArmingChanged`] that is the *new* profile).
pub fn next_alarm_status(current: AlarmStatus, arming: ArmingStatus, event: AlarmEvent) -> AlarmStatus {
    use AlarmStatus::{Alarm, NoAlarm, PendingAlarm};

    match event {
        AlarmEvent::ArmingChanged {
            to: ArmingStatus::Disarmed,
            ..
        } => NoAlarm,
        AlarmEvent::ArmingChanged {
            to: ArmingStatus::ArmedHome,
            cat_detected: true,
        } => Alarm,
        AlarmEvent::ArmingChanged { .. } => current,

        // Sensors cannot trigger anything while disarmed.
        AlarmEvent::SensorActivated | AlarmEvent::SensorDeactivated { .. }
            if arming == ArmingStatus::Disarmed =>
        {
            current
        }

        AlarmEvent::SensorActivated => match current {
            NoAlarm => PendingAlarm,
            PendingAlarm | Alarm => Alarm,
        },
        AlarmEvent::SensorDeactivated { others_active } => match current {
            PendingAlarm if !others_active => NoAlarm,
            PendingAlarm => PendingAlarm,
            NoAlarm => NoAlarm,
            Alarm => Alarm,
        },

        AlarmEvent::ImageScanned { cat: true, .. } if arming == ArmingStatus::ArmedHome => Alarm,
        AlarmEvent::ImageScanned {
            cat: false,
            any_sensor_active: false,
        } => NoAlarm,
        AlarmEvent::ImageScanned { .. } => current,
    }
}
