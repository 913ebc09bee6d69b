//! Periods, days, and slots.
//!
//! # Time Model
//! A school week is a set of active day indices (0 = Monday … 6 = Sunday)
//! crossed with an ordered list of periods. A period may be a break
//! (never scheduled) and may apply only to some days.
//!
//! A timestamp-free `(day, period)` pair is a [`Slot`], the atomic unit
//! of scheduling.

use serde::{Deserialize, Serialize};

/// Day index, 0 = Monday … 6 = Sunday.
pub type DayOfWeek = u8;

/// Highest valid day index (Sunday).
pub const MAX_DAY: DayOfWeek = 6;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// English name for a day index, or `"Day N"` when out of range.
pub fn day_name(day: DayOfWeek) -> String {
    DAY_NAMES
        .get(day as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Day {day}"))
}

/// Converts a 0 = Sunday day index to the 0 = Monday convention.
///
/// Returns `None` for indices above 6.
pub fn day_from_sunday_based(day: u8) -> Option<DayOfWeek> {
    (day <= MAX_DAY).then(|| (day + 6) % 7)
}

/// A teaching period within the school day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// Unique period identifier.
    pub id: String,
    /// Display name (e.g. "1st period").
    #[serde(default)]
    pub name: String,
    /// Position within the day. Lower = earlier.
    pub order: i32,
    /// Breaks are never scheduled.
    #[serde(default)]
    pub is_break: bool,
    /// Days this period exists on. Empty = every configured day.
    #[serde(default)]
    pub days: Vec<DayOfWeek>,
}

impl Period {
    /// Creates a teaching period that applies every day.
    pub fn new(id: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            order,
            is_break: false,
            days: Vec::new(),
        }
    }

    /// Creates a break period.
    pub fn break_period(id: impl Into<String>, order: i32) -> Self {
        Self {
            is_break: true,
            ..Self::new(id, order)
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restricts the period to the given days.
    pub fn on_days(mut self, days: &[DayOfWeek]) -> Self {
        self.days = days.to_vec();
        self
    }

    /// Whether the period exists on `day`.
    pub fn applies_on(&self, day: DayOfWeek) -> bool {
        self.days.is_empty() || self.days.contains(&day)
    }

    /// Whether lessons may be placed in this period on `day`.
    #[inline]
    pub fn is_schedulable_on(&self, day: DayOfWeek) -> bool {
        !self.is_break && self.applies_on(day)
    }
}

/// A (day, period) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub day_of_week: DayOfWeek,
    pub period_id: String,
}

impl Slot {
    pub fn new(day_of_week: DayOfWeek, period_id: impl Into<String>) -> Self {
        Self {
            day_of_week,
            period_id: period_id.into(),
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} period {}", day_name(self.day_of_week), self.period_id)
    }
}
