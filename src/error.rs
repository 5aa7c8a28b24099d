use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Error taxonomy for the HTTP surface. Every store or hashing failure becomes
/// `Internal` at the handler boundary; the cause is logged and never sent to the
/// client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Access denied: {0}")]
    Auth(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(&'static str),

    #[error("Server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            // Duplicates surface as 400 on the wire, matching the observed
            // behavior of the reference service.
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(ref cause) = self {
            error!(error = ?cause, "request failed");
        }
        let message = self.to_string();
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(err.into())
    }
}

/// True when the error is a violation of a database UNIQUE constraint, e.g. a
/// concurrent registration that lost the race on the users email index.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map_or(false, |db| db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let err = ApiError::Validation("Email and password are required".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::Auth("No token provided");
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let err = ApiError::NotFound("User not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::Conflict("Email already exists");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::Internal(anyhow::anyhow!("pool exhausted"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let err = ApiError::Internal(anyhow::anyhow!("SELECT blew up: connection reset"));
        assert_eq!(err.to_string(), "Server error");
    }

    #[test]
    fn auth_errors_carry_the_access_denied_prefix() {
        let err = ApiError::Auth("Invalid token");
        assert_eq!(err.to_string(), "Access denied: Invalid token");
    }
}
