//! CatPoint security controller library.
//!
//! Exposes the alarm rules, their ports and the stock adapters for the
//! console binary and for integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod shared;

pub use app::model::{AlarmStatus, ArmingStatus, Sensor, SensorId, SensorType};
pub use app::service::SecurityService;
pub use error::{Error, Result};
