//! Value types and field validators for the academic records schema

#[cfg(feature = "database")]
mod column;

pub mod days;
pub mod error;
pub mod major;
pub mod semester;
pub mod unit_count;
pub mod validators;

pub use error::ValidationError;
