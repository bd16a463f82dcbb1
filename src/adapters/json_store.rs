//! JSON file repository adapter.
//!
//! Implements [`SecurityRepository`] by keeping an [`InMemoryRepository`]
//! as the working copy and rewriting a JSON snapshot after every mutation.
//!
//! - A missing file opens as the initial state (no alarm, disarmed, no
//!   sensors).  A file that fails to parse is an error, never silently
//!   replaced.
//! - Writes go to `<file>.tmp` first and are renamed into place, so a crash
//!   mid-write leaves the previous snapshot intact.
//! - A failed write leaves the working copy updated; the next successful
//!   write catches the file up.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::memory::{InMemoryRepository, RepositorySnapshot};
use crate::app::model::{AlarmStatus, ArmingStatus, Sensor, SensorId};
use crate::app::ports::{SecurityRepository, StorageError};

pub struct JsonFileRepository {
    path: PathBuf,
    inner: InMemoryRepository,
}

impl JsonFileRepository {
    /// Open (or lazily create) the snapshot at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let inner = match fs::read_to_string(&path) {
            Ok(text) => {
                let snapshot: RepositorySnapshot = serde_json::from_str(&text)?;
                info!(
                    "JsonFileRepository: loaded {} ({} sensors)",
                    path.display(),
                    snapshot.sensors.len()
                );
                InMemoryRepository::from_snapshot(snapshot)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("JsonFileRepository: {} not found, starting fresh", path.display());
                InMemoryRepository::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.inner.snapshot())?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!("JsonFileRepository: wrote {}", self.path.display());
        Ok(())
    }

    /// Apply a mutation to the working copy, then persist if it changed
    /// anything.
    fn write_through<T>(
        &mut self,
        f: impl FnOnce(&mut InMemoryRepository) -> Result<T, StorageError>,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T, StorageError> {
        let out = f(&mut self.inner)?;
        if changed(&out) {
            self.flush()?;
        }
        Ok(out)
    }
}

impl SecurityRepository for JsonFileRepository {
    fn alarm_status(&self) -> AlarmStatus {
        self.inner.alarm_status()
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), StorageError> {
        self.write_through(|r| r.set_alarm_status(status), |_| true)
    }

    fn arming_status(&self) -> ArmingStatus {
        self.inner.arming_status()
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), StorageError> {
        self.write_through(|r| r.set_arming_status(status), |_| true)
    }

    fn sensors(&self) -> Vec<Sensor> {
        self.inner.sensors()
    }

    fn sensor(&self, id: &SensorId) -> Option<Sensor> {
        self.inner.sensor(id)
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<bool, StorageError> {
        self.write_through(|r| r.add_sensor(sensor), |added| *added)
    }

    fn remove_sensor(&mut self, id: &SensorId) -> Result<bool, StorageError> {
        self.write_through(|r| r.remove_sensor(id), |removed| *removed)
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<bool, StorageError> {
        self.write_through(|r| r.update_sensor(sensor), |found| *found)
    }
}
