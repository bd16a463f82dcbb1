//! Inbound commands to the security service.
//!
//! These represent actions requested by the outside world (console, panel,
//! scripted driver) that the [`SecurityService`](super::service::SecurityService)
//! interprets and acts upon.  The text form is one command per line:
//!
//! ```text
//! arm <disarmed|home|away>        alarm <none|pending|alarm>
//! add <door|window|motion> <name> remove <type> <name>
//! activate <type> <name>          deactivate <type> <name>
//! scan <image-path>               status | quit
//! ```
//!
//! Sensor names may contain spaces; everything after the type is the name.

use core::fmt;
use core::str::FromStr;
use std::path::PathBuf;

use super::model::{AlarmStatus, ArmingStatus, Sensor, SensorType, UnknownVariant};

/// Commands that external adapters can send into the security core.
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityCommand {
    /// Change the arming profile.
    Arm(ArmingStatus),

    /// Override the alarm status (operator tooling).
    SetAlarm(AlarmStatus),

    /// Register a new sensor.
    AddSensor(Sensor),

    /// Unregister a sensor.
    RemoveSensor(Sensor),

    /// Mark a sensor active.
    Activate(Sensor),

    /// Mark a sensor inactive.
    Deactivate(Sensor),

    /// Load an image from disk and run it through the cat detector.
    Scan(PathBuf),

    /// Print the current state.
    Status,

    /// Leave the console.
    Quit,
}

/// Why a command line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    BadValue(UnknownVariant),
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand(c) => write!(f, "unknown command: {:?}", c),
            Self::MissingArgument(what) => write!(f, "missing argument: {}", what),
            Self::BadValue(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseCommandError {}

impl From<UnknownVariant> for ParseCommandError {
    fn from(e: UnknownVariant) -> Self {
        Self::BadValue(e)
    }
}

impl FromStr for SecurityCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        if verb.is_empty() {
            return Err(ParseCommandError::Empty);
        }

        match verb.to_ascii_lowercase().as_str() {
            "arm" => Ok(Self::Arm(required(rest, "arming status")?.parse()?)),
            "alarm" => Ok(Self::SetAlarm(required(rest, "alarm status")?.parse()?)),
            "add" => Ok(Self::AddSensor(parse_sensor(rest)?)),
            "remove" => Ok(Self::RemoveSensor(parse_sensor(rest)?)),
            "activate" => Ok(Self::Activate(parse_sensor(rest)?)),
            "deactivate" => Ok(Self::Deactivate(parse_sensor(rest)?)),
            "scan" => Ok(Self::Scan(PathBuf::from(required(rest, "image path")?))),
            "status" => Ok(Self::Status),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(ParseCommandError::UnknownCommand(verb.to_owned())),
        }
    }
}

fn required<'a>(s: &'a str, what: &'static str) -> Result<&'a str, ParseCommandError> {
    if s.is_empty() {
        Err(ParseCommandError::MissingArgument(what))
    } else {
        Ok(s)
    }
}

/// `<type> <name...>`
fn parse_sensor(rest: &str) -> Result<Sensor, ParseCommandError> {
    let (kind, name) = rest
        .split_once(char::is_whitespace)
        .ok_or(ParseCommandError::MissingArgument("sensor name"))?;
    let sensor_type: SensorType = kind.parse()?;
    let name = required(name.trim(), "sensor name")?;
    Ok(Sensor::new(name, sensor_type))
}
