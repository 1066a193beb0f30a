//! Service error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Everything a request handler can fail with. Every variant renders as
/// `{"error": <message>}` with the status below; a store error never
/// reaches the transport layer unconverted.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store was unreachable; no SQL was attempted.
    #[error("Database connection failed")]
    Connection(#[source] sqlx::Error),

    /// Required input was missing from the request.
    #[error("{0}")]
    Validation(&'static str),

    /// No row matched the requested id or filter.
    #[error("{0}")]
    NotFound(&'static str),

    /// A statement failed mid-operation; the driver message is surfaced
    /// verbatim.
    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Connection(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Connection(source) => {
                tracing::error!(error = %source, "database connection failed");
            }
            ApiError::Database(source) => {
                tracing::error!(error = %source, "statement failed");
            }
            _ => {}
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("Missing required fields (name, email)").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Contact not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_surface_the_driver_message() {
        let err = ApiError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), sqlx::Error::RowNotFound.to_string());
    }
}
