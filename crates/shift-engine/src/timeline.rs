//! Map wall-clock labels onto the operating-day timeline.
//!
//! The operating day runs from 18:00 to 06:00 the following morning. Minute 0
//! is 18:00, midnight is minute 360 and closing (06:00) is minute 720. Any
//! hour before 18 belongs to the *next* calendar day.
//!
//! The closing sentinel `"Chiusura"` ("until close") maps to the same value as
//! `"06:00"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};

/// Label used for "open until closing time".
pub const CHIUSURA: &str = "Chiusura";

/// Hour at which the operating day starts.
pub const OPENING_HOUR: u8 = 18;

/// Hour (next morning) at which the operating day ends.
pub const CLOSING_HOUR: u8 = 6;

const MINUTES_PER_DAY: i32 = 24 * 60;
const ANCHOR_MINUTES: i32 = OPENING_HOUR as i32 * 60;

/// Timeline position of closing time: `(6 + 24) * 60 - 18 * 60`.
pub const CLOSING_MINUTES: i32 = (CLOSING_HOUR as i32 + 24) * 60 - ANCHOR_MINUTES;

/// A single time label: a wall-clock time or the closing sentinel.
///
/// Serialized as the label itself (`"21:30"`, `"Chiusura"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotTime {
    Clock { hour: u8, minute: u8 },
    Closing,
}

impl SlotTime {
    pub const fn clock(hour: u8, minute: u8) -> Self {
        SlotTime::Clock { hour, minute }
    }

    /// Minutes since 18:00 on the operating-day timeline.
    ///
    /// Hours before 18 are pushed to the next calendar day before the anchor is
    /// subtracted. Labels outside the 18:00–06:00 window (e.g. `12:00`) are not
    /// rejected; they land at the position the same formula gives them.
    pub fn minutes(self) -> i32 {
        match self {
            SlotTime::Closing => CLOSING_MINUTES,
            SlotTime::Clock { hour, minute } => {
                let mut total = hour as i32 * 60 + minute as i32;
                if hour < OPENING_HOUR {
                    total += MINUTES_PER_DAY;
                }
                total - ANCHOR_MINUTES
            }
        }
    }

    /// Whether the label falls inside the 18:00 → 06:00 operating window.
    pub fn is_within_operating_day(self) -> bool {
        (0..=CLOSING_MINUTES).contains(&self.minutes())
    }
}

impl FromStr for SlotTime {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim();
        if label == CHIUSURA {
            return Ok(SlotTime::Closing);
        }

        let invalid = || ShiftError::InvalidTime(s.to_string());
        let (h, m) = label.split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok(SlotTime::Clock { hour, minute })
    }
}

impl TryFrom<String> for SlotTime {
    type Error = ShiftError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotTime::Closing => f.write_str(CHIUSURA),
            SlotTime::Clock { hour, minute } => write!(f, "{:02}:{:02}", hour, minute),
        }
    }
}

/// A start/end pair within one operating day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: SlotTime,
    pub end: SlotTime,
}

impl TimeSlot {
    pub const fn new(start: SlotTime, end: SlotTime) -> Self {
        Self { start, end }
    }

    /// Build a slot from two labels.
    ///
    /// # Errors
    /// Returns `ShiftError::InvalidTime` if either label is malformed.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// `(start, end)` in timeline minutes.
    pub fn bounds(&self) -> (i32, i32) {
        (self.start.minutes(), self.end.minutes())
    }

    pub fn duration_minutes(&self) -> i32 {
        let (start, end) = self.bounds();
        end - start
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        overlap(self, other)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Convert a label to minutes on the operating-day timeline.
///
/// `"18:00"` → 0, `"00:00"` → 360, `"06:00"` and `"Chiusura"` → 720.
///
/// # Errors
/// Returns `ShiftError::InvalidTime` if the label is neither `HH:MM` nor
/// `"Chiusura"`.
pub fn time_to_minutes(label: &str) -> Result<i32> {
    label.parse::<SlotTime>().map(SlotTime::minutes)
}

/// Half-open interval intersection on the normalized timeline.
///
/// Two slots overlap iff `a.start < b.end && b.start < a.end`. Slots that only
/// touch (one ends at 22:00, the other starts at 22:00) do not overlap.
pub fn overlap(a: &TimeSlot, b: &TimeSlot) -> bool {
    let (a_start, a_end) = a.bounds();
    let (b_start, b_end) = b.bounds();
    a_start < b_end && b_start < a_end
}
