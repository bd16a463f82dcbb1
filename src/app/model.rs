//! Domain data model: sensors and the two status enums.
//!
//! Every status is a closed enum, so an out-of-range arming or alarm value
//! cannot be constructed.  Text parsing (for the console) lives here too so
//! that adapters never invent their own spellings.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ───────────────────────────────────────────────────────────────
// Alarm status
// ───────────────────────────────────────────────────────────────

/// Current alert level of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

impl AlarmStatus {
    /// Text shown on the status panel.
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Arming status
// ───────────────────────────────────────────────────────────────

/// Arming profile selected by the occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub const fn description(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }

    /// True for both armed profiles.
    pub const fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }
}

// ───────────────────────────────────────────────────────────────
// Sensors
// ───────────────────────────────────────────────────────────────

/// Physical kind of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl SensorType {
    /// Text shown in the sensor list.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Door => "Door",
            Self::Window => "Window",
            Self::Motion => "Motion",
        }
    }
}

/// Identity of a sensor: name plus type.  Two sensors with the same id are
/// the same sensor no matter what their `active` flags say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SensorId {
    pub name: String,
    pub sensor_type: SensorType,
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.sensor_type)
    }
}

/// A binary detector.  Equality, hashing and ordering only look at the
/// identity (name + type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    name: String,
    sensor_type: SensorType,
    #[serde(default)]
    active: bool,
}

impl Sensor {
    /// Create an inactive sensor.
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Builder-style variant of [`set_active`](Self::set_active).
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn id(&self) -> SensorId {
        SensorId {
            name: self.name.clone(),
            sensor_type: self.sensor_type,
        }
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.sensor_type == other.sensor_type
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.sensor_type.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then(self.sensor_type.cmp(&other.sensor_type))
    }
}

// ───────────────────────────────────────────────────────────────
// Display / FromStr
// ───────────────────────────────────────────────────────────────

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoAlarm => "NO_ALARM",
            Self::PendingAlarm => "PENDING_ALARM",
            Self::Alarm => "ALARM",
        };
        f.pad(s)
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disarmed => "DISARMED",
            Self::ArmedHome => "ARMED_HOME",
            Self::ArmedAway => "ARMED_AWAY",
        };
        f.pad(s)
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Door => "DOOR",
            Self::Window => "WINDOW",
            Self::Motion => "MOTION",
        };
        f.pad(s)
    }
}

/// A word did not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub input: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.input)
    }
}

impl std::error::Error for UnknownVariant {}

/// Lower-case and strip `-`/`_` so `ARMED_HOME`, `armed-home` and
/// `armedhome` all compare equal.
fn normalise(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for AlarmStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "noalarm" | "none" => Ok(Self::NoAlarm),
            "pendingalarm" | "pending" => Ok(Self::PendingAlarm),
            "alarm" => Ok(Self::Alarm),
            _ => Err(UnknownVariant {
                kind: "alarm status",
                input: s.to_owned(),
            }),
        }
    }
}

impl FromStr for ArmingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "disarmed" | "disarm" | "off" => Ok(Self::Disarmed),
            "armedhome" | "home" => Ok(Self::ArmedHome),
            "armedaway" | "away" => Ok(Self::ArmedAway),
            _ => Err(UnknownVariant {
                kind: "arming status",
                input: s.to_owned(),
            }),
        }
    }
}

impl FromStr for SensorType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "door" => Ok(Self::Door),
            "window" => Ok(Self::Window),
            "motion" => Ok(Self::Motion),
            _ => Err(UnknownVariant {
                kind: "sensor type",
                input: s.to_owned(),
            }),
        }
    }
}
