use crate::entities::InvitationStatus;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Machine-readable error codes. Clients branch on these, never on `error` text.
pub mod codes {
    pub const INVITATION_EXISTS: &str = "INVITATION_EXISTS";
    pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION: &str = "VALIDATION";
}

/// JSON body of every error response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    code: Option<&'static str>,
    details: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            code: None,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> Option<&'static str> {
        self.code
    }

    // Common error constructors
    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message).with_code(codes::NOT_FOUND)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal_server_error(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn service_unavailable(message: &'static str) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// Duplicate active invitation for the same campaign and school
    pub fn invitation_exists(current: InvitationStatus) -> Self {
        Self::conflict("An active invitation already exists for this project and school")
            .with_code(codes::INVITATION_EXISTS)
            .with_details(format!("Existing invitation is {current}"))
    }

    /// Response attempted on an invitation that is no longer pending
    pub fn invalid_transition(current: InvitationStatus) -> Self {
        Self::conflict("Invitation is already processed")
            .with_code(codes::INVALID_TRANSITION)
            .with_details(format!("Invitation is already {current}"))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::not_found("Resource not found"),

            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                Self::not_found("Referenced resource not found")
            }

            sqlx::Error::Database(ref db) if db.is_check_violation() => {
                Self::bad_request("Database constraint violated").with_code(codes::VALIDATION)
            }

            sqlx::Error::Database(_) => Self::bad_request("Database error"),

            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::service_unavailable("Database unavailable")
            }

            other => {
                error!("Unexpected database error: {:?}", other);
                Self::internal_server_error("Internal server error")
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::bad_request("Validation error")
            .with_code(codes::VALIDATION)
            .with_details(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message.to_string(),
            code: self.code.map(str::to_string),
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn lifecycle_conflicts_share_status_but_not_code() {
        let exists = AppError::invitation_exists(InvitationStatus::Pending);
        let stale = AppError::invalid_transition(InvitationStatus::Approved);

        assert_eq!(exists.status(), StatusCode::CONFLICT);
        assert_eq!(stale.status(), StatusCode::CONFLICT);
        assert_eq!(exists.code(), Some(codes::INVITATION_EXISTS));
        assert_eq!(stale.code(), Some(codes::INVALID_TRANSITION));
    }

    #[test]
    fn conversions_pick_status_and_code() {
        let missing = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.code(), Some(codes::NOT_FOUND));

        let closed = AppError::from(sqlx::Error::PoolClosed);
        assert_eq!(closed.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(closed.code(), None);

        let invalid = crate::dtos::RespondInvitationDTO {
            response_message: Some("x".repeat(301)),
            responded_by_user_id: 1,
        }
        .validate()
        .unwrap_err();
        let invalid = AppError::from(invalid);
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.code(), Some(codes::VALIDATION));
    }
}
