use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{SlotError, SlotResult};

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time with minute precision, written `HH:MM` (24-hour).
///
/// Ordering follows minutes since midnight, so `09:05 < 10:00` holds
/// regardless of how the value was spelled on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    /// Creates a time from an hour (0-23) and minute (0-59).
    pub fn new(hour: u8, minute: u8) -> SlotResult<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(SlotError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    /// Creates a time from minutes since midnight, or `None` past 23:59.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self { minutes })
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            minutes: (time.hour() * 60 + time.minute()) as u16,
        }
    }

    pub fn minutes(&self) -> u16 {
        self.minutes
    }

    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Adds `minutes`, returning `None` when the result would cross midnight.
    pub fn checked_add_minutes(&self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.minutes).checked_add(minutes)?;
        u16::try_from(total).ok().and_then(Self::from_minutes)
    }

    pub fn to_naive_time(&self) -> NaiveTime {
        // minutes < 1440 always yields a valid time
        NaiveTime::from_hms_opt(u32::from(self.hour()), u32::from(self.minute()), 0)
            .unwrap_or_default()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotError::InvalidTime(s.to_string());

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        if !hour.bytes().chain(minute.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
