//! Event domain error types

use axum_helpers::AppError;
use thiserror::Error;

/// Result type for event operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Event domain errors
#[derive(Debug, Error)]
pub enum EventError {
    /// No event matched a well-formed identifier
    #[error("Event not found.")]
    NotFound,

    /// Identifier is not a valid ObjectId
    #[error("Invalid event ID format.")]
    InvalidId,

    /// Missing or ill-formed required input
    #[error("{message}")]
    Validation { message: String },

    /// MongoDB error
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<mongodb::error::Error>,
    },
}

impl EventError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create error for absent/empty required create fields.
    pub fn missing_fields() -> Self {
        Self::validation("Missing required fields.")
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<bson::oid::Error> for EventError {
    fn from(_: bson::oid::Error) -> Self {
        Self::InvalidId
    }
}

impl From<bson::ser::Error> for EventError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Database {
            message: format!("BSON serialization error: {}", err),
            source: None,
        }
    }
}

impl From<bson::de::Error> for EventError {
    fn from(err: bson::de::Error) -> Self {
        Self::Database {
            message: format!("BSON deserialization error: {}", err),
            source: None,
        }
    }
}

// Convert to axum_helpers::AppError for HTTP responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        let message = err.to_string();
        match err {
            EventError::NotFound => AppError::NotFound(message),
            EventError::InvalidId | EventError::Validation { .. } => AppError::BadRequest(message),
            EventError::Database { .. } => AppError::InternalServerError(message),
        }
    }
}

impl axum::response::IntoResponse for EventError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            EventError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EventError::InvalidId.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EventError::missing_fields().into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EventError::Database {
                message: "boom".into(),
                source: None
            }
            .into_response()
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_match_wire_contract() {
        assert_eq!(EventError::NotFound.to_string(), "Event not found.");
        assert_eq!(EventError::InvalidId.to_string(), "Invalid event ID format.");
        assert_eq!(
            EventError::missing_fields().to_string(),
            "Missing required fields."
        );
    }
}
