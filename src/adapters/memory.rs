//! In-memory repository adapter.
//!
//! Implements [`SecurityRepository`] over a `HashMap` keyed by sensor
//! identity.  Writes never fail.  Used by tests and by the console when no
//! state file is wanted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::app::model::{AlarmStatus, ArmingStatus, Sensor, SensorId};
use crate::app::ports::{SecurityRepository, StorageError};

/// Plain snapshot of everything a repository holds.  Also the on-disk
/// format of [`JsonFileRepository`](super::json_store::JsonFileRepository).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    #[serde(default)]
    pub alarm_status: AlarmStatus,
    #[serde(default)]
    pub arming_status: ArmingStatus,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: HashMap<SensorId, Sensor>,
}

impl InMemoryRepository {
    /// Empty repository in the initial state (no alarm, disarmed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a snapshot.  Later duplicates of an identity win.
    pub fn from_snapshot(snapshot: RepositorySnapshot) -> Self {
        Self {
            alarm_status: snapshot.alarm_status,
            arming_status: snapshot.arming_status,
            sensors: snapshot.sensors.into_iter().map(|s| (s.id(), s)).collect(),
        }
    }

    /// Copy the current state out, sensors sorted for stable output.
    pub fn snapshot(&self) -> RepositorySnapshot {
        let mut sensors: Vec<Sensor> = self.sensors.values().cloned().collect();
        sensors.sort();
        RepositorySnapshot {
            alarm_status: self.alarm_status,
            arming_status: self.arming_status,
            sensors,
        }
    }
}

impl SecurityRepository for InMemoryRepository {
    fn alarm_status(&self) -> AlarmStatus {
        self.alarm_status
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError> {
        self.alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> ArmingStatus {
        self.arming_status
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError> {
        self.arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> Vec<Sensor> {
        self.sensors.values().cloned().collect()
    }

    fn sensor(&self, id: &SensorId) -> Option<Sensor> {
        self.sensors.get(id).cloned()
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<bool, StorageError> {
        let id = sensor.id();
        if self.sensors.contains_key(&id) {
            return Ok(false);
        }
        self.sensors.insert(id, sensor);
        Ok(true)
    }

    fn remove_sensor(&mut self, id: &SensorId) -> Result<bool, StorageError> {
        Ok(self.sensors.remove(id).is_some())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<bool, StorageError> {
        match self.sensors.get_mut(&sensor.id()) {
            Some(stored) => {
                stored.set_active(sensor.is_active());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
