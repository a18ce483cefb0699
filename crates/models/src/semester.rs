use crate::error::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

lazy_static! {
    static ref SEMESTER: Regex = Regex::new(r"^(Winter|Fall|Spring|Summer)([0-9]{2})$").unwrap();
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, EnumString, EnumIter, AsRefStr,
)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn all() -> Vec<Season> {
        Season::iter().collect()
    }
}

/// An academic term such as `Fall23`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Semester {
    pub season: Season,
    /// Last two digits of the year
    pub year: u8,
}

impl Semester {
    pub fn new(season: Season, year: u8) -> Option<Self> {
        (year < 100).then_some(Self { season, year })
    }
}

impl FromStr for Semester {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::Semester { field: "semester" };

        let captures = SEMESTER.captures(s).ok_or_else(invalid)?;
        let season = Season::from_str(&captures[1]).map_err(|_| invalid())?;
        let year = captures[2].parse().map_err(|_| invalid())?;

        Ok(Self { season, year })
    }
}

impl Display for Semester {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{:02}", self.season.as_str(), self.year)
    }
}

impl PartialOrd for Semester {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Semester {
    // Chronological within a century: year first, then season
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.year, self.season).cmp(&(other.year, other.season))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_from_str() {
        let semester = Semester::from_str("Fall23").unwrap();
        assert_eq!(semester.season, Season::Fall);
        assert_eq!(semester.year, 23);

        let semester = Semester::from_str("Winter05").unwrap();
        assert_eq!(semester.season, Season::Winter);
        assert_eq!(semester.year, 5);
    }

    #[test]
    fn test_semester_rejects_malformed_input() {
        for input in ["Fall2023", "fall23", "Autumn23", "Fall 23", "Fall3", "", "Spring23x"] {
            assert_eq!(
                Semester::from_str(input),
                Err(ValidationError::Semester { field: "semester" }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_semester_display() {
        assert_eq!(Semester::new(Season::Spring, 7).unwrap().to_string(), "Spring07");
        assert!(Semester::new(Season::Spring, 107).is_none());
    }

    #[test]
    fn test_semester_ordering() {
        let spring = Semester::from_str("Spring24").unwrap();
        let fall = Semester::from_str("Fall23").unwrap();
        let summer = Semester::from_str("Summer24").unwrap();

        assert!(fall < spring);
        assert!(spring < summer);
    }

    #[test]
    fn test_season_all() {
        assert_eq!(Season::all().len(), 4);
    }
}
