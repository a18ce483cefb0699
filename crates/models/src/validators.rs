//! Field validators shared by the record types

use crate::{error::ValidationError, semester::Semester};
use chrono::NaiveTime;
use lazy_static::lazy_static;
use regex::Regex;

/// Upper bound on free text fields such as names and titles
pub const MAX_TEXT_LENGTH: usize = 50;

/// Inclusive bounds of a grade
pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 20.0;

lazy_static! {
    static ref EIGHT_DIGITS: Regex = Regex::new(r"^[0-9]{8}$").unwrap();
    static ref FIVE_DIGITS: Regex = Regex::new(r"^[0-9]{5}$").unwrap();
    static ref THREE_DIGITS: Regex = Regex::new(r"^[0-9]{3}$").unwrap();
}

fn digits(
    field: &'static str,
    value: &str,
    pattern: &Regex,
    count: usize,
) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::Digits {
            field,
            digits: count,
        })
    }
}

pub fn student_number(value: &str) -> Result<(), ValidationError> {
    digits("student_number", value, &EIGHT_DIGITS, 8)
}

pub fn staff_number(value: &str) -> Result<(), ValidationError> {
    digits("staff_number", value, &EIGHT_DIGITS, 8)
}

/// Course codes are integers whose decimal form has exactly five digits
pub fn course_code(value: i32) -> Result<(), ValidationError> {
    digits("course_code", &value.to_string(), &FIVE_DIGITS, 5)
}

pub fn class_number(value: &str) -> Result<(), ValidationError> {
    digits("class_number", value, &THREE_DIGITS, 3)
}

pub fn semester(value: &str) -> Result<(), ValidationError> {
    value.parse::<Semester>().map(|_| ())
}

/// Required text no longer than [`MAX_TEXT_LENGTH`] characters
pub fn text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Blank { field })
    } else if value.chars().count() > MAX_TEXT_LENGTH {
        Err(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
        })
    } else {
        Ok(())
    }
}

pub fn grade(value: f64) -> Result<(), ValidationError> {
    // NaN fails both comparisons
    if (MIN_GRADE..=MAX_GRADE).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: "grade",
            min: MIN_GRADE,
            max: MAX_GRADE,
        })
    }
}

pub fn capacity(value: i32) -> Result<(), ValidationError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(ValidationError::Negative { field: "capacity" })
    }
}

/// Both ends of a time window are optional, but when present the start comes first
pub fn time_range(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start >= end => Err(ValidationError::TimeRange),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_number() {
        assert!(student_number("12345678").is_ok());
        assert!(student_number("00000000").is_ok());

        for invalid in ["1234567", "123456789", "1234567a", " 12345678", ""] {
            assert_eq!(
                student_number(invalid),
                Err(ValidationError::Digits {
                    field: "student_number",
                    digits: 8
                }),
                "{invalid:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_staff_number_message() {
        let err = staff_number("12-45678").unwrap_err();
        assert_eq!(err.to_string(), "staff_number must have 8 digits");
    }

    #[test]
    fn test_course_code() {
        assert!(course_code(40123).is_ok());
        assert!(course_code(99999).is_ok());
        assert!(course_code(1234).is_err());
        assert!(course_code(123456).is_err());
        assert!(course_code(-1234).is_err());
    }

    #[test]
    fn test_class_number() {
        assert!(class_number("101").is_ok());
        assert!(class_number("007").is_ok());
        assert!(class_number("1010").is_err());
        assert!(class_number("1a1").is_err());
    }

    #[test]
    fn test_semester() {
        assert!(semester("Summer99").is_ok());
        assert!(semester("Summer").is_err());
    }

    #[test]
    fn test_text() {
        assert!(text("first_name", "Ada").is_ok());
        assert_eq!(
            text("first_name", "   "),
            Err(ValidationError::Blank {
                field: "first_name"
            })
        );
        assert_eq!(
            text("title", &"x".repeat(51)),
            Err(ValidationError::TooLong {
                field: "title",
                max: 50
            })
        );
        assert!(text("title", &"é".repeat(50)).is_ok());
    }

    #[test]
    fn test_grade_bounds() {
        assert!(grade(0.0).is_ok());
        assert!(grade(20.0).is_ok());
        assert!(grade(13.75).is_ok());

        for invalid in [-0.01, 20.01, 21.0, f64::NAN, f64::INFINITY] {
            assert!(grade(invalid).is_err(), "{invalid} should be rejected");
        }
        assert_eq!(
            grade(21.0).unwrap_err().to_string(),
            "grade must be between 0 and 20"
        );
    }

    #[test]
    fn test_capacity() {
        assert!(capacity(0).is_ok());
        assert!(capacity(250).is_ok());
        assert_eq!(
            capacity(-1),
            Err(ValidationError::Negative { field: "capacity" })
        );
    }

    #[test]
    fn test_time_range() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();

        assert!(time_range(Some(nine), Some(ten)).is_ok());
        assert!(time_range(None, Some(ten)).is_ok());
        assert!(time_range(Some(nine), None).is_ok());
        assert_eq!(time_range(Some(ten), Some(nine)), Err(ValidationError::TimeRange));
        assert_eq!(time_range(Some(ten), Some(ten)), Err(ValidationError::TimeRange));
    }
}
