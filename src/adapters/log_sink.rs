//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every security event through the
//! `log` facade.  A panel or buzzer adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::SecurityEvent;
use crate::app::model::AlarmStatus;
use crate::app::ports::EventSink;

/// Adapter that logs every [`SecurityEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &SecurityEvent) {
        match event {
            SecurityEvent::AlarmStatusChanged { from, to } => {
                if *to == AlarmStatus::Alarm {
                    warn!("ALARM | {} -> {} | {}", from, to, to.description());
                } else {
                    info!("ALARM | {} -> {} | {}", from, to, to.description());
                }
            }
            SecurityEvent::ArmingStatusChanged { from, to } => {
                info!("ARMING | {} -> {} | {}", from, to, to.description());
            }
            SecurityEvent::SensorStatusChanged(s) => {
                info!(
                    "SENSOR | {} {} is now {}",
                    s.sensor_type(),
                    s.name(),
                    if s.is_active() { "active" } else { "inactive" }
                );
            }
            SecurityEvent::SensorAdded(s) => {
                info!("SENSOR | added {} {}", s.sensor_type(), s.name());
            }
            SecurityEvent::SensorRemoved(s) => {
                info!("SENSOR | removed {} {}", s.sensor_type(), s.name());
            }
            SecurityEvent::CatDetected(cat) => {
                if *cat {
                    info!("CAMERA | DANGER - CAT DETECTED");
                } else {
                    info!("CAMERA | cats not detected");
                }
            }
        }
    }
}
