//! One module per table. Each entity is registered with the record
//! administration surface through [`crate::services::Record`].

use std::fmt::Display;

pub mod assignments;
pub mod classrooms;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod grade_reports;
pub mod professors;
pub mod schedules;
pub mod students;

/// Shown in place of a relation that is absent
pub const ABSENT: &str = "N/A";

/// Shown in place of a schedule time that hasn't been set
pub const TO_BE_ANNOUNCED: &str = "TBA";

pub(crate) fn or_absent<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_owned(), |value| value.to_string())
}
