//! Thread-shared security service.
//!
//! A panel thread and a background camera thread may both drive the
//! service.  [`SharedSecurityService`] puts one mutex around it so every
//! operation's evaluate-and-persist sequence runs under a single lock:
//!
//! ```text
//!  Panel thread ──┐
//!                 ├──▶ Arc<Mutex<SecurityService>> ──▶ repository / sinks
//!  Camera thread ─┘
//! ```
//!
//! The cat-detector call in [`process_image`](SharedSecurityService::process_image)
//! blocks while holding the lock; other callers wait for it.

use std::sync::{Arc, Mutex, MutexGuard};

use image::DynamicImage;

use crate::app::commands::SecurityCommand;
use crate::app::model::{AlarmStatus, ArmingStatus, Sensor};
use crate::app::ports::{CatDetector, EventSink, SecurityRepository};
use crate::app::service::{ListenerId, SecurityService};
use crate::error::{Error, Result};

pub struct SharedSecurityService<R, D> {
    inner: Arc<Mutex<SecurityService<R, D>>>,
}

impl<R, D> Clone for SharedSecurityService<R, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: SecurityRepository, D: CatDetector> SharedSecurityService<R, D> {
    pub fn new(service: SecurityService<R, D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Run `f` with exclusive access to the service.
    pub fn with<T>(&self, f: impl FnOnce(&mut SecurityService<R, D>) -> T) -> Result<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    pub fn subscribe(&self, sink: impl EventSink + Send + 'static) -> Result<ListenerId> {
        self.with(|s| s.subscribe(sink))
    }

    pub fn unsubscribe(&self, id: ListenerId) -> Result<bool> {
        self.with(|s| s.unsubscribe(id))
    }

    pub fn set_arming_status(&self, status: ArmingStatus) -> Result<()> {
        self.lock()?.set_arming_status(status)
    }

    pub fn change_sensor_activation_status(&self, sensor: &Sensor, active: bool) -> Result<()> {
        self.lock()?.change_sensor_activation_status(sensor, active)
    }

    pub fn add_sensor(&self, sensor: Sensor) -> Result<bool> {
        self.lock()?.add_sensor(sensor)
    }

    pub fn remove_sensor(&self, sensor: &Sensor) -> Result<bool> {
        self.lock()?.remove_sensor(sensor)
    }

    pub fn process_image(&self, image: &DynamicImage) -> Result<bool> {
        self.lock()?.process_image(image)
    }

    pub fn set_alarm_status(&self, status: AlarmStatus) -> Result<()> {
        self.lock()?.set_alarm_status(status)
    }

    pub fn handle_command(&self, cmd: SecurityCommand) -> Result<()> {
        self.lock()?.handle_command(cmd)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.with(|s| s.alarm_status())
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.with(|s| s.arming_status())
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.with(|s| s.sensors())
    }

    fn lock(&self) -> Result<MutexGuard<'_, SecurityService<R, D>>> {
        self.inner.lock().map_err(|_| Error::LockPoisoned)
    }
}
