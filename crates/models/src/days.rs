use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
    str::FromStr,
};

/// The days of the week a class is scheduled on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(transparent)]
pub struct DaySet(u8);

impl DaySet {
    // Constants for individual days
    pub const MONDAY: Self = DaySet(1 << 0);
    pub const TUESDAY: Self = DaySet(1 << 1);
    pub const WEDNESDAY: Self = DaySet(1 << 2);
    pub const THURSDAY: Self = DaySet(1 << 3);
    pub const FRIDAY: Self = DaySet(1 << 4);
    pub const SATURDAY: Self = DaySet(1 << 5);
    pub const SUNDAY: Self = DaySet(1 << 6);

    // Constants for common day combinations
    pub const WEEKDAYS: Self = DaySet(0b0011111);
    pub const WEEKEND: Self = DaySet(0b1100000);
    pub const ALL: Self = DaySet(0b1111111);
    pub const NONE: Self = DaySet(0);

    /// Day-to-code mapping for parsing and display, in weekday order
    const DAY_CODES: [(Self, &'static str); 7] = [
        (Self::MONDAY, "MON"),
        (Self::TUESDAY, "TUE"),
        (Self::WEDNESDAY, "WED"),
        (Self::THURSDAY, "THU"),
        (Self::FRIDAY, "FRI"),
        (Self::SATURDAY, "SAT"),
        (Self::SUNDAY, "SUN"),
    ];

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn contains(self, day: Self) -> bool {
        (self & day) == day
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn set(&mut self, day: Self, value: bool) {
        if value {
            *self |= day;
        } else {
            *self &= !day;
        }
    }

    pub fn add(&mut self, day: Self) {
        *self |= day;
    }

    pub fn remove(&mut self, day: Self) {
        *self &= !day;
    }

    /// The codes of the days in this set, Monday first
    pub fn codes(self) -> impl Iterator<Item = &'static str> {
        Self::DAY_CODES
            .into_iter()
            .filter(move |&(day, _)| self.contains(day))
            .map(|(_, code)| code)
    }
}

impl FromStr for DaySet {
    type Err = ValidationError;

    /// Parses a comma separated list of day codes, e.g. `MON,WED,FRI`
    fn from_str(days: &str) -> Result<Self, Self::Err> {
        let mut result = Self::NONE;

        for code in days.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let (day, _) = Self::DAY_CODES
                .iter()
                .find(|(_, day_code)| day_code.eq_ignore_ascii_case(code))
                .ok_or_else(|| ValidationError::InvalidChoice {
                    field: "day",
                    value: code.to_owned(),
                })?;
            result |= *day;
        }

        Ok(result)
    }
}

impl Display for DaySet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let codes: Vec<&str> = self.codes().collect();
        write!(f, "{}", codes.join(","))
    }
}

impl TryFrom<String> for DaySet {
    type Error = ValidationError;

    fn try_from(days: String) -> Result<Self, Self::Error> {
        days.parse()
    }
}

impl From<DaySet> for String {
    fn from(days: DaySet) -> Self {
        days.to_string()
    }
}

// Bitwise operators
impl BitOr for DaySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        DaySet(self.0 | rhs.0)
    }
}

impl BitAnd for DaySet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        DaySet(self.0 & rhs.0)
    }
}

impl Not for DaySet {
    type Output = Self;

    fn not(self) -> Self::Output {
        // Apply mask to keep only 7 bits
        DaySet((!self.0) & 0x7F)
    }
}

impl BitOrAssign for DaySet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAndAssign for DaySet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

#[cfg(feature = "database")]
crate::column::text_column!(DaySet);
