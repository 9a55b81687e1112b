use shared_types::{ShiftAssignment, SHIFT_COUNT};

/// Activity that rotates through the shifts, one step per day
pub const ROTATING_ACTIVITY: &str = "SHELF LIFE 10D";

/// Suffix added to a label when every shift performs it on the same day
const ALL_SHIFTS_MARKER: &str = "*";

/// Where an activity lands on a given weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Skip,
    Shift(u8),
    AllShifts,
}

/// Fixed schedule of one activity, indexed by weekday (0 = Monday)
#[derive(Debug)]
pub struct WeekdayRule {
    pub activity: &'static str,
    pub placements: [Placement; 7],
}

use Placement::{AllShifts, Shift, Skip};

/// Rules are applied in this order, which is also the display order inside a
/// shift bucket.
pub const WEEKDAY_RULES: [WeekdayRule; 3] = [
    WeekdayRule {
        activity: "E.T.E",
        placements: [
            Shift(1),
            Shift(3),
            Shift(3),
            Shift(3),
            Shift(3),
            Shift(3),
            Shift(3),
        ],
    },
    WeekdayRule {
        activity: "ANÁLISE DE ÁGUA",
        placements: [
            Shift(1),
            Shift(2),
            Shift(3),
            Shift(1),
            Shift(2),
            Shift(3),
            AllShifts,
        ],
    },
    WeekdayRule {
        activity: "TURBIDEZ",
        placements: [Shift(3), Skip, Skip, Skip, Skip, Skip, Skip],
    },
];

/// Append the fixed weekday activities for `weekday` to `assignment`
pub fn apply_weekday_rules(assignment: &mut ShiftAssignment, weekday: u32) {
    let index = (weekday % 7) as usize;

    for rule in &WEEKDAY_RULES {
        match rule.placements[index] {
            Skip => {}
            Shift(shift) => assignment.push(shift, rule.activity),
            AllShifts => {
                for shift in 1..=SHIFT_COUNT {
                    assignment.push(shift, format!("{}{}", rule.activity, ALL_SHIFTS_MARKER));
                }
            }
        }
    }
}

/// Next value of the rotating shift: 1 -> 2 -> 3 -> 1
pub fn next_shift(shift: u8) -> u8 {
    shift % SHIFT_COUNT + 1
}
