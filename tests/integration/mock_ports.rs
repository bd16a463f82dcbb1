//! Mock port adapters for integration tests.
//!
//! Records every event and detector call so tests can assert on the full
//! history without a real classifier or UI.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use catpoint::adapters::memory::InMemoryRepository;
use catpoint::app::events::SecurityEvent;
use catpoint::app::model::{AlarmStatus, ArmingStatus, Sensor, SensorId};
use catpoint::app::ports::{CatDetector, DetectorError, EventSink, SecurityRepository, StorageError};
use image::DynamicImage;

// ── Recording sink ────────────────────────────────────────────

/// Cloneable sink; every clone shares one event log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    pub events: Arc<Mutex<Vec<SecurityEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<SecurityEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    pub fn alarm_changes(&self) -> Vec<(AlarmStatus, AlarmStatus)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                SecurityEvent::AlarmStatusChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &SecurityEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Writes `(tag, event)` pairs into a log shared between several sinks.
pub struct TaggedSink {
    pub tag: &'static str,
    pub log: Arc<Mutex<Vec<(&'static str, SecurityEvent)>>>,
}

impl EventSink for TaggedSink {
    fn emit(&mut self, event: &SecurityEvent) {
        self.log.lock().unwrap().push((self.tag, event.clone()));
    }
}

// ── Scripted detector ─────────────────────────────────────────

/// Returns queued answers in order; falls back to `default` when empty.
/// Records the threshold of every call.
pub struct ScriptedDetector {
    pub answers: VecDeque<Result<bool, DetectorError>>,
    pub default: bool,
    pub thresholds: Arc<Mutex<Vec<f32>>>,
}

impl ScriptedDetector {
    pub fn new(default: bool) -> Self {
        Self {
            answers: VecDeque::new(),
            default,
            thresholds: Arc::default(),
        }
    }

    pub fn then(mut self, answer: Result<bool, DetectorError>) -> Self {
        self.answers.push_back(answer);
        self
    }
}

impl CatDetector for ScriptedDetector {
    fn contains_cat(&mut self, _image: &DynamicImage, confidence_threshold: f32) -> Result<bool, DetectorError> {
        self.thresholds.lock().unwrap().push(confidence_threshold);
        self.answers.pop_front().unwrap_or(Ok(self.default))
    }
}

// ── Failing repository ────────────────────────────────────────

/// In-memory repository whose alarm-status writes can be made to fail.
#[derive(Default)]
pub struct FlakyRepository {
    pub inner: InMemoryRepository,
    pub fail_alarm_writes: bool,
}

impl SecurityRepository for FlakyRepository {
    fn alarm_status(&self) -> AlarmStatus {
        self.inner.alarm_status()
    }
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError> {
        if self.fail_alarm_writes {
            return Err(StorageError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set_alarm_status(status)
    }
    fn arming_status(&self) -> ArmingStatus {
        self.inner.arming_status()
    }
    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError> {
        self.inner.set_arming_status(status)
    }
    fn sensors(&self) -> Vec<Sensor> {
        self.inner.sensors()
    }
    fn sensor(&self, id: &SensorId) -> Option<Sensor> {
        self.inner.sensor(id)
    }
    fn add_sensor(&mut self, sensor: Sensor) -> Result<bool, StorageError> {
        self.inner.add_sensor(sensor)
    }
    fn remove_sensor(&mut self, id: &SensorId) -> Result<bool, StorageError> {
        self.inner.remove_sensor(id)
    }
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<bool, StorageError> {
        self.inner.update_sensor(sensor)
    }
}

pub fn test_image() -> DynamicImage {
    DynamicImage::new_rgb8(5, 5)
}
