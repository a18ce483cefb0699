use thiserror::Error;

/// A field value rejected before it reaches the database
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must have {digits} digits")]
    Digits { field: &'static str, digits: usize },

    #[error("{field} may not be blank")]
    Blank { field: &'static str },

    #[error("{field} may not be longer than {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} may not be negative")]
    Negative { field: &'static str },

    #[error("{value:?} is not a valid choice for {field}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("{field} must name a season and a two digit year, e.g. Fall23")]
    Semester { field: &'static str },

    #[error("{field} must contain at least one day")]
    NoDays { field: &'static str },

    #[error("start_time must be before end_time")]
    TimeRange,
}

impl ValidationError {
    /// The field the error was raised for, if it concerns a single field
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Digits { field, .. }
            | Self::Blank { field }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Negative { field }
            | Self::InvalidChoice { field, .. }
            | Self::Semester { field }
            | Self::NoDays { field } => Some(field),
            Self::TimeRange => None,
        }
    }
}
