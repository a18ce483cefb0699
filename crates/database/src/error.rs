use models::ValidationError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Why a record operation was refused
#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} {key} does not exist")]
    NotFound { entity: &'static str, key: String },

    #[error("referenced {entity} {key} does not exist")]
    MissingReference { entity: &'static str, key: String },

    #[error("a record with the same unique value already exists: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for RecordError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::Duplicate(detail),
            _ => Self::Database(err),
        }
    }
}
