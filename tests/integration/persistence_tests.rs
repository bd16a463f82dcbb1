//! Integration tests for the JSON repository and the text command path.
//!
//! Each test works in its own temp directory so they can run in parallel.

use std::fs;
use std::path::PathBuf;

use catpoint::adapters::cat_detector::FixedCatDetector;
use catpoint::adapters::json_store::JsonFileRepository;
use catpoint::app::commands::SecurityCommand;
use catpoint::config::SecurityConfig;
use catpoint::{AlarmStatus, ArmingStatus, SecurityService, Sensor, SensorType};

use crate::mock_ports::test_image;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("catpoint-it-{}-{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn run(svc: &mut SecurityService<JsonFileRepository, FixedCatDetector>, line: &str) {
    let cmd: SecurityCommand = line.parse().unwrap_or_else(|e| panic!("{line:?}: {e}"));
    svc.handle_command(cmd).unwrap();
}

#[test]
fn service_state_survives_restart() {
    let dir = temp_dir("restart");
    let state = dir.join("state.json");

    {
        let repo = JsonFileRepository::open(&state).unwrap();
        let mut svc = SecurityService::new(repo, FixedCatDetector::new(false), SecurityConfig::default());
        run(&mut svc, "add door front");
        run(&mut svc, "add window kitchen");
        run(&mut svc, "arm away");
        run(&mut svc, "activate door front");
        assert_eq!(svc.alarm_status(), AlarmStatus::PendingAlarm);
    }

    let repo = JsonFileRepository::open(&state).unwrap();
    let svc = SecurityService::new(repo, FixedCatDetector::new(false), SecurityConfig::default());
    assert_eq!(svc.arming_status(), ArmingStatus::ArmedAway);
    assert_eq!(svc.alarm_status(), AlarmStatus::PendingAlarm);

    let sensors = svc.sensors();
    assert_eq!(sensors.len(), 2);
    let front = sensors
        .iter()
        .find(|s| s.name() == "front")
        .expect("front door persisted");
    assert!(front.is_active());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn remove_and_disarm_are_persisted() {
    let dir = temp_dir("remove");
    let state = dir.join("state.json");

    {
        let repo = JsonFileRepository::open(&state).unwrap();
        let mut svc = SecurityService::new(repo, FixedCatDetector::new(false), SecurityConfig::default());
        run(&mut svc, "add motion hall");
        run(&mut svc, "add door back");
        run(&mut svc, "arm home");
        run(&mut svc, "activate motion hall");
        run(&mut svc, "activate door back");
        assert_eq!(svc.alarm_status(), AlarmStatus::Alarm);
        run(&mut svc, "remove door back");
        run(&mut svc, "arm disarmed");
    }

    let repo = JsonFileRepository::open(&state).unwrap();
    let svc = SecurityService::new(repo, FixedCatDetector::new(false), SecurityConfig::default());
    assert_eq!(svc.alarm_status(), AlarmStatus::NoAlarm);
    assert_eq!(svc.sensors(), vec![Sensor::new("hall", SensorType::Motion)]);
    assert!(svc.sensors().iter().all(|s| !s.is_active()));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn scan_command_loads_image_from_disk() {
    let dir = temp_dir("scan");
    let image_path = dir.join("frame.png");
    test_image().save(&image_path).unwrap();

    let repo = JsonFileRepository::open(dir.join("state.json")).unwrap();
    let mut svc = SecurityService::new(repo, FixedCatDetector::new(true), SecurityConfig::default());
    run(&mut svc, "arm home");
    run(&mut svc, &format!("scan {}", image_path.display()));

    assert!(svc.is_cat_detected());
    assert_eq!(svc.alarm_status(), AlarmStatus::Alarm);

    fs::remove_dir_all(&dir).unwrap();
}
