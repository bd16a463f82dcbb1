//! Fuzz target: `SecurityService` operation sequences
//!
//! Each input byte is decoded into one operation (arm, sensor change or
//! image scan) against an in-memory service with three sensors.
//!
//! Invariants checked:
//! - No panics under any sequence
//! - Disarmed always implies `NoAlarm` and no active sensor after a disarm
//!
//! cargo fuzz run fuzz_service_ops

#![no_main]

use catpoint::adapters::cat_detector::FixedCatDetector;
use catpoint::adapters::memory::InMemoryRepository;
use catpoint::config::SecurityConfig;
use catpoint::{AlarmStatus, ArmingStatus, SecurityService, Sensor, SensorType};
use image::DynamicImage;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let sensors = [
        Sensor::new("front", SensorType::Door),
        Sensor::new("kitchen", SensorType::Window),
        Sensor::new("hall", SensorType::Motion),
    ];
    let mut svc = SecurityService::new(
        InMemoryRepository::new(),
        FixedCatDetector::new(false),
        SecurityConfig::default(),
    );
    for s in &sensors {
        svc.add_sensor(s.clone()).unwrap();
    }
    let frame = DynamicImage::new_rgb8(2, 2);

    for byte in data {
        // Low two bits pick the operation, the rest its argument.
        let arg = byte >> 2;
        match byte & 0b11 {
            0 => {
                let status = match arg % 3 {
                    0 => ArmingStatus::Disarmed,
                    1 => ArmingStatus::ArmedHome,
                    _ => ArmingStatus::ArmedAway,
                };
                svc.set_arming_status(status).unwrap();
                if status == ArmingStatus::Disarmed {
                    assert!(svc.sensors().iter().all(|s| !s.is_active()));
                }
            }
            1 | 2 => {
                let sensor = &sensors[usize::from(arg) % sensors.len()];
                svc.change_sensor_activation_status(sensor, byte & 0b11 == 1).unwrap();
            }
            _ => {
                svc.detector_mut().set_answer(arg & 1 == 1);
                svc.process_image(&frame).unwrap();
            }
        }
        if svc.arming_status() == ArmingStatus::Disarmed {
            assert_eq!(svc.alarm_status(), AlarmStatus::NoAlarm);
        }
    }
});
