use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumProperty, EnumString, IntoEnumIterator};

/// The majors a student can be enrolled in
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    EnumProperty,
)]
pub enum Major {
    #[strum(props(full = "Computer Engineering"))]
    CE,
    #[strum(props(full = "Computer Science"))]
    CS,
    #[strum(props(full = "Civil Engineering"))]
    CVE,
    #[strum(props(full = "Electrical Engineering"))]
    EE,
    #[strum(props(full = "Mechanical Engineering"))]
    ME,
    #[strum(props(full = "Chemical Engineering"))]
    CME,
    #[strum(props(full = "Aerospace Engineering"))]
    AE,
    #[strum(props(full = "Physics"))]
    PHY,
    #[strum(props(full = "Mathematics"))]
    MATH,
    #[strum(props(full = "Chemistry"))]
    CHEM,
}

impl Major {
    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn label(&self) -> &'static str {
        self.get_str("full").unwrap_or_default()
    }

    pub fn all() -> Vec<Major> {
        Major::iter().collect()
    }

    /// Parses a major code, reporting unknown codes as a validation error
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        code.parse().map_err(|_| ValidationError::InvalidChoice {
            field: "major",
            value: code.to_owned(),
        })
    }
}

#[cfg(feature = "database")]
crate::column::text_column!(Major);
