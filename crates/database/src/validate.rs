use models::ValidationError;
use sea_orm::{ActiveValue, Value};

/// Field-level checks run before a record is written
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// The value a field will be written with, if it is part of the write at all
pub(crate) fn present<V: Into<Value>>(value: &ActiveValue<V>) -> Option<&V> {
    match value {
        ActiveValue::Set(value) | ActiveValue::Unchanged(value) => Some(value),
        ActiveValue::NotSet => None,
    }
}
