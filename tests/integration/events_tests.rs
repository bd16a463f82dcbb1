//! Integration tests for the SecurityService → EventSink pipeline and for
//! how port failures surface.

use std::sync::{Arc, Mutex};

use catpoint::adapters::memory::InMemoryRepository;
use catpoint::app::events::SecurityEvent;
use catpoint::app::ports::DetectorError;
use catpoint::config::SecurityConfig;
use catpoint::{AlarmStatus, ArmingStatus, Error, SecurityService, Sensor, SensorType};

use crate::mock_ports::{FlakyRepository, RecordingSink, ScriptedDetector, TaggedSink, test_image};

fn make_service(detector: ScriptedDetector) -> (SecurityService<InMemoryRepository, ScriptedDetector>, RecordingSink) {
    let mut svc = SecurityService::new(InMemoryRepository::new(), detector, SecurityConfig::default());
    let sink = RecordingSink::new();
    svc.subscribe(sink.clone());
    (svc, sink)
}

// ── Delivery order ────────────────────────────────────────────

#[test]
fn sinks_are_called_in_subscription_order() {
    let mut svc = SecurityService::new(
        InMemoryRepository::new(),
        ScriptedDetector::new(false),
        SecurityConfig::default(),
    );
    let log = Arc::new(Mutex::new(Vec::new()));
    svc.subscribe(TaggedSink { tag: "panel", log: Arc::clone(&log) });
    svc.subscribe(TaggedSink { tag: "logger", log: Arc::clone(&log) });

    svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();

    let log = log.lock().unwrap();
    let tags: Vec<_> = log.iter().map(|(t, _)| *t).collect();
    assert_eq!(tags, vec!["panel", "logger"]);
    assert_eq!(
        log[0].1,
        SecurityEvent::ArmingStatusChanged {
            from: ArmingStatus::Disarmed,
            to: ArmingStatus::ArmedHome,
        }
    );
}

#[test]
fn sensor_lifecycle_events() {
    let (mut svc, sink) = make_service(ScriptedDetector::new(false));
    let door = Sensor::new("front", SensorType::Door);

    svc.add_sensor(door.clone()).unwrap();
    svc.add_sensor(door.clone()).unwrap();
    svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    svc.change_sensor_activation_status(&door, true).unwrap();
    svc.change_sensor_activation_status(&door, true).unwrap();
    svc.remove_sensor(&door).unwrap();
    svc.remove_sensor(&door).unwrap();

    let events = sink.take();
    assert_eq!(
        events,
        vec![
            SecurityEvent::SensorAdded(door.clone()),
            SecurityEvent::ArmingStatusChanged {
                from: ArmingStatus::Disarmed,
                to: ArmingStatus::ArmedAway,
            },
            SecurityEvent::SensorStatusChanged(door.clone().with_active(true)),
            SecurityEvent::AlarmStatusChanged {
                from: AlarmStatus::NoAlarm,
                to: AlarmStatus::PendingAlarm,
            },
            SecurityEvent::SensorRemoved(door),
        ]
    );
}

#[test]
fn disarm_announces_each_sensor_reset() {
    let (mut svc, sink) = make_service(ScriptedDetector::new(false));
    let a = Sensor::new("a", SensorType::Window);
    let b = Sensor::new("b", SensorType::Motion);
    svc.add_sensor(a.clone()).unwrap();
    svc.add_sensor(b.clone()).unwrap();
    svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    svc.change_sensor_activation_status(&a, true).unwrap();
    svc.change_sensor_activation_status(&b, true).unwrap();
    sink.take();

    svc.set_arming_status(ArmingStatus::Disarmed).unwrap();

    let events = sink.take();
    let resets = events
        .iter()
        .filter(|e| matches!(e, SecurityEvent::SensorStatusChanged(s) if !s.is_active()))
        .count();
    assert_eq!(resets, 2);
    assert!(events.contains(&SecurityEvent::AlarmStatusChanged {
        from: AlarmStatus::Alarm,
        to: AlarmStatus::NoAlarm,
    }));
}

#[test]
fn rearm_reset_announces_pending_cleared() {
    let (mut svc, sink) = make_service(ScriptedDetector::new(false));
    let door = Sensor::new("front", SensorType::Door);
    svc.add_sensor(door.clone()).unwrap();
    svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    svc.change_sensor_activation_status(&door, true).unwrap();

    svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();

    assert_eq!(
        sink.alarm_changes(),
        vec![
            (AlarmStatus::NoAlarm, AlarmStatus::PendingAlarm),
            (AlarmStatus::PendingAlarm, AlarmStatus::NoAlarm),
        ]
    );
}

#[test]
fn scan_emits_cat_detected() {
    let (mut svc, sink) = make_service(ScriptedDetector::new(false).then(Ok(true)));
    svc.process_image(&test_image()).unwrap();
    svc.process_image(&test_image()).unwrap();
    let events = sink.take();
    assert!(events.contains(&SecurityEvent::CatDetected(true)));
    assert!(events.contains(&SecurityEvent::CatDetected(false)));
}

// ── Detector and storage failures ─────────────────────────────

#[test]
fn detector_outage_is_not_treated_as_no_cat() {
    let detector = ScriptedDetector::new(false)
        .then(Ok(true))
        .then(Err(DetectorError::Unavailable("timeout".into())));
    let (mut svc, sink) = make_service(detector);
    svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    svc.process_image(&test_image()).unwrap();
    assert_eq!(svc.alarm_status(), AlarmStatus::Alarm);
    sink.take();

    let err = svc.process_image(&test_image()).unwrap_err();
    assert!(matches!(err, Error::Detector(DetectorError::Unavailable(_))));
    assert_eq!(svc.alarm_status(), AlarmStatus::Alarm, "outage must not clear the alarm");
    assert!(svc.is_cat_detected(), "outage must not overwrite the last scan result");
    assert!(sink.take().is_empty());
}

#[test]
fn configured_threshold_reaches_detector() {
    let detector = ScriptedDetector::new(false);
    let seen = Arc::clone(&detector.thresholds);
    let config = SecurityConfig {
        cat_confidence_threshold: 72.5,
        ..Default::default()
    };
    let mut svc = SecurityService::new(InMemoryRepository::new(), detector, config);
    svc.process_image(&test_image()).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![72.5]);
}

#[test]
fn storage_failure_propagates() {
    let repo = FlakyRepository {
        fail_alarm_writes: true,
        ..Default::default()
    };
    let mut svc = SecurityService::new(repo, ScriptedDetector::new(true), SecurityConfig::default());
    svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();

    let err = svc.process_image(&test_image()).unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
    assert_eq!(svc.alarm_status(), AlarmStatus::NoAlarm);
}
