//! Security service: the hexagonal core.
//!
//! [`SecurityService`] owns the injected repository and cat detector, the
//! last scan result and the subscriber list.  It gathers the facts each
//! event needs, asks [`fsm::next_alarm_status`] what the alarm status
//! becomes, persists the answer and notifies subscribers.
//!
//! ```text
//!  SecurityRepository ◀──▶ ┌────────────────────────┐ ──▶ EventSink × N
//!                          │    SecurityService      │
//!         CatDetector ◀─── │  rules · persistence    │
//!                          └────────────────────────┘
//! ```
//!
//! Every method runs to completion before returning; nothing here is
//! thread-safe on its own.  Wrap the service in
//! [`SharedSecurityService`](crate::shared::SharedSecurityService) when more
//! than one thread drives it.

use image::DynamicImage;
use log::{debug, info, warn};

use crate::config::SecurityConfig;
use crate::error::Result;
use crate::fsm::{self, AlarmEvent};

use super::commands::SecurityCommand;
use super::events::SecurityEvent;
use super::model::{AlarmStatus, ArmingStatus, Sensor};
use super::ports::{CatDetector, DetectorError, EventSink, SecurityRepository};

/// Handle returned by [`SecurityService::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

pub struct SecurityService<R, D> {
    repo: R,
    detector: D,
    config: SecurityConfig,
    /// Result of the most recent successful image scan.
    cat_detected: bool,
    sinks: Vec<(ListenerId, Box<dyn EventSink + Send>)>,
    next_listener: u64,
}

impl<R: SecurityRepository, D: CatDetector> SecurityService<R, D> {
    pub fn new(repo: R, detector: D, config: SecurityConfig) -> Self {
        info!(
            "SecurityService ready: arming={} alarm={} sensors={}",
            repo.arming_status(),
            repo.alarm_status(),
            repo.sensors().len()
        );
        Self {
            repo,
            detector,
            config,
            cat_detected: false,
            sinks: Vec::new(),
            next_listener: 0,
        }
    }

    // ── Subscribers ───────────────────────────────────────────

    /// Register a sink.  Sinks are called in subscription order.
    pub fn subscribe(&mut self, sink: impl EventSink + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.sinks.push((id, Box::new(sink)));
        id
    }

    /// Drop a sink.  Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|(sid, _)| *sid != id);
        self.sinks.len() != before
    }

    // ── Arming ────────────────────────────────────────────────

    /// Change the arming profile.
    ///
    /// Disarming clears the alarm and deactivates every sensor.  Arming
    /// also resets sensors (unless configured otherwise); arming *home*
    /// while the last scan saw a cat raises the alarm immediately.
    pub fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        let prev = self.repo.arming_status();
        self.repo.set_arming_status(status)?;
        if prev != status {
            info!("Arming {} -> {}", prev, status);
            self.emit(&SecurityEvent::ArmingStatusChanged { from: prev, to: status });
        }

        if !status.is_armed() || self.config.reset_sensors_on_arm {
            let reset = self.deactivate_all_sensors()?;
            if reset > 0 {
                // Same rule as the last active sensor going quiet.
                self.evaluate(AlarmEvent::SensorDeactivated { others_active: false })?;
            }
        }

        let event = AlarmEvent::ArmingChanged {
            to: status,
            cat_detected: self.cat_detected,
        };
        self.evaluate(event)
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Record a sensor's new active flag and evaluate its alarm impact.
    ///
    /// `sensor` is matched by identity; its own `active` field is ignored.
    /// Unknown sensors are a caller bug and are dropped with a warning.
    pub fn change_sensor_activation_status(&mut self, sensor: &Sensor, active: bool) -> Result<()> {
        let id = sensor.id();
        let Some(mut stored) = self.repo.sensor(&id) else {
            warn!("Ignoring activation change for unknown sensor {}", id);
            return Ok(());
        };

        let was_active = stored.is_active();
        stored.set_active(active);
        self.repo.update_sensor(&stored)?;

        if was_active == active {
            debug!("Sensor {} already {}", id, if active { "active" } else { "inactive" });
            return Ok(());
        }
        self.emit(&SecurityEvent::SensorStatusChanged(stored));

        let event = if active {
            AlarmEvent::SensorActivated
        } else {
            // `stored` is already inactive in the repository, so any hit
            // here is some other sensor.
            AlarmEvent::SensorDeactivated {
                others_active: self.any_sensor_active(),
            }
        };
        self.evaluate(event)
    }

    /// Add a sensor.  Returns `false` (and changes nothing) if a sensor
    /// with the same name and type is already registered.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<bool> {
        let added = self.repo.add_sensor(sensor.clone())?;
        if added {
            info!("Sensor added: {}", sensor.id());
            self.emit(&SecurityEvent::SensorAdded(sensor));
        } else {
            debug!("Sensor {} already registered", sensor.id());
        }
        Ok(added)
    }

    /// Remove a sensor.  Returns `false` if it was not registered.
    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<bool> {
        let id = sensor.id();
        let Some(stored) = self.repo.sensor(&id) else {
            debug!("Sensor {} not registered, nothing to remove", id);
            return Ok(false);
        };
        let removed = self.repo.remove_sensor(&id)?;
        if removed {
            info!("Sensor removed: {}", id);
            self.emit(&SecurityEvent::SensorRemoved(stored));
        }
        Ok(removed)
    }

    // ── Images ────────────────────────────────────────────────

    /// Run the cat detector on `image` and apply the result.
    ///
    /// Returns whether a cat was seen.  A detector failure is returned as
    /// an error and leaves all state, including the remembered scan
    /// result, untouched.
    pub fn process_image(&mut self, image: &DynamicImage) -> Result<bool> {
        let cat = self
            .detector
            .contains_cat(image, self.config.cat_confidence_threshold)?;
        self.cat_detected = cat;
        info!("Image scan: cat={}", cat);
        self.emit(&SecurityEvent::CatDetected(cat));

        let event = AlarmEvent::ImageScanned {
            cat,
            any_sensor_active: self.any_sensor_active(),
        };
        self.evaluate(event)?;
        Ok(cat)
    }

    // ── Direct alarm override ─────────────────────────────────

    /// Force the alarm status, bypassing the rules.
    pub fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.apply_alarm_status(status)
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (console, UI, scripted driver).
    pub fn handle_command(&mut self, cmd: SecurityCommand) -> Result<()> {
        match cmd {
            SecurityCommand::Arm(status) => self.set_arming_status(status),
            SecurityCommand::SetAlarm(status) => self.set_alarm_status(status),
            SecurityCommand::AddSensor(sensor) => self.add_sensor(sensor).map(|_| ()),
            SecurityCommand::RemoveSensor(sensor) => self.remove_sensor(&sensor).map(|_| ()),
            SecurityCommand::Activate(sensor) => self.change_sensor_activation_status(&sensor, true),
            SecurityCommand::Deactivate(sensor) => self.change_sensor_activation_status(&sensor, false),
            SecurityCommand::Scan(path) => {
                let image = image::open(&path)
                    .map_err(|e| DetectorError::InvalidImage(format!("{}: {}", path.display(), e)))?;
                self.process_image(&image).map(|_| ())
            }
            SecurityCommand::Status | SecurityCommand::Quit => {
                // Handled by the console loop, not the service.
                Ok(())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_status(&self) -> AlarmStatus {
        self.repo.alarm_status()
    }

    pub fn arming_status(&self) -> ArmingStatus {
        self.repo.arming_status()
    }

    /// All registered sensors, sorted by name then type.
    pub fn sensors(&self) -> Vec<Sensor> {
        let mut sensors = self.repo.sensors();
        sensors.sort();
        sensors
    }

    /// Whether the most recent successful scan saw a cat.
    pub fn is_cat_detected(&self) -> bool {
        self.cat_detected
    }

    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    // ── Internal ──────────────────────────────────────────────

    fn any_sensor_active(&self) -> bool {
        self.repo.sensors().iter().any(Sensor::is_active)
    }

    fn evaluate(&mut self, event: AlarmEvent) -> Result<()> {
        let current = self.repo.alarm_status();
        let next = fsm::next_alarm_status(current, self.repo.arming_status(), event);
        debug!("Evaluate {:?}: {} -> {}", event, current, next);
        self.apply_alarm_status(next)
    }

    /// Persist and announce `status` if it differs from the stored value.
    fn apply_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        let prev = self.repo.alarm_status();
        if prev == status {
            return Ok(());
        }
        self.repo.set_alarm_status(status)?;
        match status {
            AlarmStatus::Alarm => warn!("ALARM | {} -> {}", prev, status),
            _ => info!("Alarm {} -> {}", prev, status),
        }
        self.emit(&SecurityEvent::AlarmStatusChanged { from: prev, to: status });
        Ok(())
    }

    /// Set every active sensor inactive.  Returns how many were reset; the
    /// caller runs the alarm rules.
    fn deactivate_all_sensors(&mut self) -> Result<usize> {
        let mut reset = 0;
        for mut sensor in self.repo.sensors().into_iter().filter(Sensor::is_active) {
            sensor.set_active(false);
            self.repo.update_sensor(&sensor)?;
            debug!("Sensor {} reset to inactive", sensor.id());
            self.emit(&SecurityEvent::SensorStatusChanged(sensor));
            reset += 1;
        }
        Ok(reset)
    }

    fn emit(&mut self, event: &SecurityEvent) {
        for (_, sink) in &mut self.sinks {
            sink.emit(event);
        }
    }
}
