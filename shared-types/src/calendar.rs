use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Number of work shifts a laboratory day is split into
pub const SHIFT_COUNT: u8 = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A (year, month) pair that has already been validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthContext {
    pub year: i32,
    pub month: u32,
}

/// Activities of one day, bucketed by shift (1, 2, 3).
///
/// Every shift is always present, and labels keep the order in which the
/// rules appended them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShiftAssignment(BTreeMap<u8, Vec<String>>);

impl ShiftAssignment {
    pub fn new() -> Self {
        Self((1..=SHIFT_COUNT).map(|shift| (shift, Vec::new())).collect())
    }

    /// Append a label to a shift bucket. Shift numbers outside 1..=3 are ignored.
    pub fn push(&mut self, shift: u8, label: impl Into<String>) {
        if let Some(bucket) = self.0.get_mut(&shift) {
            bucket.push(label.into());
        }
    }

    pub fn activities(&self, shift: u8) -> &[String] {
        self.0.get(&shift).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Shifts whose bucket contains `label`, in shift order
    pub fn shifts_with(&self, label: &str) -> Vec<u8> {
        self.0
            .iter()
            .filter(|(_, labels)| labels.iter().any(|l| l == label))
            .map(|(shift, _)| *shift)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u8, &Vec<String>)> {
        self.0.iter()
    }
}

impl Default for ShiftAssignment {
    fn default() -> Self {
        Self::new()
    }
}

/// Day of month (1-based) to that day's shift assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DayActivities(BTreeMap<u32, ShiftAssignment>);

impl DayActivities {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, day: u32, assignment: ShiftAssignment) {
        self.0.insert(day, assignment);
    }

    pub fn day(&self, day: u32) -> Option<&ShiftAssignment> {
        self.0.get(&day)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = (&u32, &ShiftAssignment)> {
        self.0.iter()
    }
}

/// How the rotating "SHELF LIFE 10D" shift is seeded for a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", rename_all = "kebab-case")]
#[ts(export)]
pub enum RotationPolicy {
    /// Every month starts over at `initial_shift` on day 1
    MonthStart { initial_shift: u8 },
    /// The phase runs continuously from `date`, which is assigned `shift`
    Epoch { date: NaiveDate, shift: u8 },
}

impl Default for RotationPolicy {
    fn default() -> Self {
        RotationPolicy::MonthStart { initial_shift: 1 }
    }
}

/// Month view payload, shared by the screen and the print layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub days_in_month: u32,
    pub days_in_previous_month: u32,
    /// Weekday of day 1, 0 = Monday .. 6 = Sunday
    pub first_weekday: u32,
    pub activities: DayActivities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthSummary {
    pub month_name: String,
    pub days_in_month: u32,
    pub first_weekday: u32,
    pub activities: DayActivities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct YearCalendar {
    pub year: i32,
    pub months: BTreeMap<u32, MonthSummary>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}
