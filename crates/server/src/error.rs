use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::RecordError;
use log::error;
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Errors returned by the record administration routes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::Record(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Record(RecordError::Validation(_) | RecordError::MissingReference { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Record(RecordError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Record(RecordError::Duplicate(_)) => StatusCode::CONFLICT,
            Self::Record(RecordError::Database(_)) | Self::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details stay in the log
        let message = if status.is_server_error() {
            error!("{self}");
            "internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ValidationError;

    #[test]
    fn test_status() {
        let cases = [
            (
                ApiError::from(RecordError::Validation(ValidationError::TimeRange)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(RecordError::MissingReference {
                    entity: "Student",
                    key: "12345678".to_owned(),
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(RecordError::NotFound {
                    entity: "Course",
                    key: "40123".to_owned(),
                }),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(RecordError::Duplicate("departments.name".to_owned())),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(DbErr::Custom("boom".to_owned())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error}");
        }
    }
}
