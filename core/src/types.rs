//! Wire value types shared by the resource payloads.
//!
//! The API sends timestamps without an offset, durations either as
//! `HH:MM:SS` strings or as bare numbers in a unit fixed per field, and
//! some error fields as whatever JSON type the server feels like.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

const TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";
// Same layout; fractional seconds are optional.
const TIME_PARSE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Timestamp in `YYYY-MM-DDTHH:MM:SS`. `null` is the zero value.
///
/// Decoding also accepts a fractional part (`2019-08-23T19:00:13.47`).
/// Encoding always drops it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(Option<NaiveDateTime>);

impl Time {
    pub const fn new(at: NaiveDateTime) -> Self {
        Time(Some(at))
    }

    pub const fn zero() -> Self {
        Time(None)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }

    pub fn get(&self) -> Option<NaiveDateTime> {
        self.0
    }
}

impl From<NaiveDateTime> for Time {
    fn from(at: NaiveDateTime) -> Self {
        Time::new(at)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            None => serializer.serialize_none(),
            Some(at) => serializer.collect_str(&at.format(TIME_LAYOUT)),
        }
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Time::zero()),
            Some(raw) => NaiveDateTime::parse_from_str(&raw, TIME_PARSE_LAYOUT)
                .map(Time::new)
                .map_err(de::Error::custom),
        }
    }
}

/// Duration written as `"HH:MM:SS"`.
///
/// Strings with fewer than three parts, or parts that are not numbers,
/// decode to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HmsDuration(pub Duration);

impl HmsDuration {
    fn parse(raw: &str) -> Duration {
        let parts: Vec<&str> = raw.split(':').collect();
        if parts.len() < 3 {
            return Duration::ZERO;
        }
        let mut total = 0.0;
        for (part, scale) in parts.iter().zip([3600.0, 60.0, 1.0]) {
            match part.trim().parse::<f64>() {
                Ok(n) => total += n * scale,
                Err(_) => return Duration::ZERO,
            }
        }
        Duration::try_from_secs_f64(total).unwrap_or(Duration::ZERO)
    }
}

impl fmt::Display for HmsDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(f, "{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
    }
}

impl Serialize for HmsDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HmsDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(HmsDuration(raw.as_deref().map_or(Duration::ZERO, Self::parse)))
    }
}

/// Duration written as a bare number of `UNIT_SECS`-second units. The
/// fractional part is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scaled<const UNIT_SECS: u64>(pub Duration);

/// Number of seconds.
pub type DurationSec = Scaled<1>;

/// Number of minutes.
pub type DurationMin = Scaled<60>;

impl<const UNIT_SECS: u64> Scaled<UNIT_SECS> {
    pub fn from_units(units: u64) -> Self {
        Scaled(Duration::from_secs(units.saturating_mul(UNIT_SECS)))
    }

    pub fn units(&self) -> u64 {
        self.0.as_secs() / UNIT_SECS
    }
}

impl<const UNIT_SECS: u64> Serialize for Scaled<UNIT_SECS> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.units())
    }
}

impl<'de, const UNIT_SECS: u64> Deserialize<'de> for Scaled<UNIT_SECS> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let units = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
        if !units.is_finite() || units <= 0.0 {
            return Ok(Scaled(Duration::ZERO));
        }
        Ok(Self::from_units(units.trunc() as u64))
    }
}

/// Deserializes any JSON scalar into text. `null` becomes empty.
pub(crate) fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}
