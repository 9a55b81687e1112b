//! Laboratory activity calendar.
//!
//! Each day of a month gets the fixed weekday activities from [`rules`] plus
//! the rotating "SHELF LIFE 10D" activity, whose shift advances by one every
//! day. The rotating shift is threaded through the days as a fold
//! accumulator, so days are always generated in calendar order.

mod rules;

pub use rules::{
    apply_weekday_rules, next_shift, Placement, WeekdayRule, ROTATING_ACTIVITY, WEEKDAY_RULES,
};

use chrono::{Datelike, NaiveDate};
use shared_types::{
    CalendarError, DayActivities, MonthCalendar, MonthContext, MonthSummary, RotationPolicy,
    ShiftAssignment, YearCalendar, SHIFT_COUNT,
};
use std::collections::BTreeMap;
use tracing::debug;

pub const MONTH_NAMES: [&str; 12] = [
    "JANEIRO",
    "FEVEREIRO",
    "MARÇO",
    "ABRIL",
    "MAIO",
    "JUNHO",
    "JULHO",
    "AGOSTO",
    "SETEMBRO",
    "OUTUBRO",
    "NOVEMBRO",
    "DEZEMBRO",
];

/// Validate a (year, month) pair
pub fn month_context(year: i32, month: u32) -> Result<MonthContext, CalendarError> {
    if year < 1 {
        return Err(CalendarError::InvalidArgument(format!(
            "year must be positive, got {}",
            year
        )));
    }
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidArgument(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    // Both ends of the month must be representable
    first_day(year, month)?;
    days_in_month(year, month)?;

    Ok(MonthContext { year, month })
}

pub fn month_name(month: u32) -> Result<&'static str, CalendarError> {
    MONTH_NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .ok_or_else(|| {
            CalendarError::InvalidArgument(format!("month must be between 1 and 12, got {}", month))
        })
}

fn first_day(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        CalendarError::InvalidArgument(format!("{}-{:02} is not a valid month", year, month))
    })
}

/// Gregorian day count of a month
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let (next_year, next_month) = if month == 12 {
        let next_year = year.checked_add(1).ok_or_else(|| {
            CalendarError::InvalidArgument(format!("year {} is out of range", year))
        })?;
        (next_year, 1)
    } else {
        (year, month + 1)
    };

    let last_day = first_day(next_year, next_month)?.pred_opt().ok_or_else(|| {
        CalendarError::InvalidArgument(format!("{}-{:02} is out of range", year, month))
    })?;

    Ok(last_day.day())
}

/// Weekday of day 1, 0 = Monday .. 6 = Sunday
pub fn first_weekday(year: i32, month: u32) -> Result<u32, CalendarError> {
    Ok(first_day(year, month)?.weekday().num_days_from_monday())
}

/// Generates the per-shift activities of a month
#[derive(Debug, Clone)]
pub struct ActivityGenerator {
    policy: RotationPolicy,
}

impl ActivityGenerator {
    /// Create a generator with a custom rotation policy
    pub fn new(policy: RotationPolicy) -> Result<Self, CalendarError> {
        let shift = match policy {
            RotationPolicy::MonthStart { initial_shift } => initial_shift,
            RotationPolicy::Epoch { shift, .. } => shift,
        };
        if !(1..=SHIFT_COUNT).contains(&shift) {
            return Err(CalendarError::InvalidArgument(format!(
                "rotation shift must be between 1 and {}, got {}",
                SHIFT_COUNT, shift
            )));
        }

        Ok(Self { policy })
    }

    /// Every month starts the rotation on shift 1
    pub fn with_defaults() -> Self {
        Self {
            policy: RotationPolicy::default(),
        }
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    /// Rotating shift assigned to `date`
    fn initial_shift(&self, date: NaiveDate) -> u8 {
        match self.policy {
            RotationPolicy::MonthStart { initial_shift } => initial_shift,
            RotationPolicy::Epoch { date: epoch, shift } => {
                let offset = (date - epoch).num_days();
                let phase = (i64::from(shift) - 1 + offset).rem_euclid(i64::from(SHIFT_COUNT));
                phase as u8 + 1
            }
        }
    }

    /// Activities for every day of `month`, keyed by day of month
    pub fn generate(&self, year: i32, month: u32) -> Result<DayActivities, CalendarError> {
        let context = month_context(year, month)?;
        let start = first_day(context.year, context.month)?;
        let first_weekday = start.weekday().num_days_from_monday();
        let days = days_in_month(context.year, context.month)?;

        let (activities, _) = (1..=days).fold(
            (DayActivities::new(), self.initial_shift(start)),
            |(mut activities, rotating_shift), day| {
                let weekday = (first_weekday + day - 1) % 7;

                let mut assignment = ShiftAssignment::new();
                apply_weekday_rules(&mut assignment, weekday);
                assignment.push(rotating_shift, ROTATING_ACTIVITY);
                activities.insert(day, assignment);

                (activities, next_shift(rotating_shift))
            },
        );

        debug!(
            year,
            month,
            days,
            first_weekday,
            "Generated laboratory activities"
        );

        Ok(activities)
    }

    /// Data for the month screen and its print layout
    pub fn month_calendar(&self, year: i32, month: u32) -> Result<MonthCalendar, CalendarError> {
        let activities = self.generate(year, month)?;

        let (previous_year, previous_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        // There is no month before January of year 1
        let days_in_previous_month = days_in_month(previous_year, previous_month).unwrap_or(31);

        Ok(MonthCalendar {
            year,
            month,
            month_name: month_name(month)?.to_string(),
            days_in_month: days_in_month(year, month)?,
            days_in_previous_month,
            first_weekday: first_weekday(year, month)?,
            activities,
        })
    }

    /// All twelve months of `year`, each generated independently
    pub fn year_calendar(&self, year: i32) -> Result<YearCalendar, CalendarError> {
        let mut months = BTreeMap::new();

        for month in 1..=12 {
            months.insert(
                month,
                MonthSummary {
                    month_name: month_name(month)?.to_string(),
                    days_in_month: days_in_month(year, month)?,
                    first_weekday: first_weekday(year, month)?,
                    activities: self.generate(year, month)?,
                },
            );
        }

        Ok(YearCalendar { year, months })
    }
}

impl Default for ActivityGenerator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Activities of one month with the default rotation policy
pub fn generate(year: i32, month: u32) -> Result<DayActivities, CalendarError> {
    ActivityGenerator::with_defaults().generate(year, month)
}
