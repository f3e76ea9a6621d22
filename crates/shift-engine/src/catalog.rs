//! Fixed venues, roles and selectable times.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShiftError};
use crate::timeline::{SlotTime, TimeSlot, CLOSING_HOUR, OPENING_HOUR};

/// A physical location with its own roster per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Venue {
    Studios,
    TooLate,
    LaCasaDeiGelsi,
    TenutaVillaPeggys,
    VillaPeggys,
}

impl Venue {
    /// Every venue, in display order.
    pub const ALL: [Venue; 5] = [
        Venue::Studios,
        Venue::TooLate,
        Venue::LaCasaDeiGelsi,
        Venue::TenutaVillaPeggys,
        Venue::VillaPeggys,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Venue::Studios => "studios",
            Venue::TooLate => "too-late",
            Venue::LaCasaDeiGelsi => "la-casa-dei-gelsi",
            Venue::TenutaVillaPeggys => "tenuta-villa-peggys",
            Venue::VillaPeggys => "villa-peggys",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Venue::Studios => "Studios",
            Venue::TooLate => "Too Late",
            Venue::LaCasaDeiGelsi => "La Casa dei Gelsi",
            Venue::TenutaVillaPeggys => "Tenuta Villa Peggy's",
            Venue::VillaPeggys => "Villa Peggy's",
        }
    }

    /// Hex color used to tell venues apart on screen.
    pub fn color(self) -> &'static str {
        match self {
            Venue::Studios => "#3B82F6",
            Venue::TooLate => "#EF4444",
            Venue::LaCasaDeiGelsi => "#10B981",
            Venue::TenutaVillaPeggys => "#F59E0B",
            Venue::VillaPeggys => "#8B5CF6",
        }
    }
}

impl FromStr for Venue {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self> {
        Venue::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| ShiftError::UnknownVenue(s.to_string()))
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A job function filled by zero or more employees per venue per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sala,
    Bar,
    Cassa,
    Pass,
    Guardaroba,
}

impl Role {
    pub const ALL: [Role; 5] = [Role::Sala, Role::Bar, Role::Cassa, Role::Pass, Role::Guardaroba];

    pub fn id(self) -> &'static str {
        match self {
            Role::Sala => "sala",
            Role::Bar => "bar",
            Role::Cassa => "cassa",
            Role::Pass => "pass",
            Role::Guardaroba => "guardaroba",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Sala => "Sala",
            Role::Bar => "Bar",
            Role::Cassa => "Cassa",
            Role::Pass => "Pass",
            Role::Guardaroba => "Guardaroba",
        }
    }
}

impl FromStr for Role {
    type Err = ShiftError;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|r| r.id() == s)
            .ok_or_else(|| ShiftError::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Slot given to a freshly added assignment: 21:00 → 03:00.
pub const DEFAULT_TIME_SLOT: TimeSlot = TimeSlot::new(SlotTime::clock(21, 0), SlotTime::clock(3, 0));

/// Step between selectable times.
pub const TIME_STEP_MINUTES: u8 = 15;

/// Selectable start times: 18:00, 18:15 … 23:45, 00:00 … 06:00, in timeline order.
pub fn time_options() -> Vec<SlotTime> {
    let evening = (OPENING_HOUR..=23).flat_map(quarter_hours);
    let night = (0..CLOSING_HOUR).flat_map(quarter_hours);
    evening
        .chain(night)
        .chain(std::iter::once(SlotTime::clock(CLOSING_HOUR, 0)))
        .collect()
}

/// Selectable end times: `Chiusura` first, then every start option.
pub fn end_time_options() -> Vec<SlotTime> {
    std::iter::once(SlotTime::Closing)
        .chain(time_options())
        .collect()
}

fn quarter_hours(hour: u8) -> impl Iterator<Item = SlotTime> {
    (0..60)
        .step_by(TIME_STEP_MINUTES as usize)
        .map(move |minute| SlotTime::clock(hour, minute))
}
