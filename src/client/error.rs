//! Classification of gateway failures as seen by a screen

use crate::core::error::{ErrorResponse, codes};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// A pending or approved invitation already exists for the campaign and school.
    #[error("active invitation already exists: {message}")]
    Conflict { message: String },

    /// The invitation was answered by someone else; local state is stale.
    #[error("invalid transition: {message}")]
    InvalidTransition { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// Any other non-success answer (validation, server error, ...)
    #[error("gateway rejected the request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// Network failure, timeout or unreachable gateway
    #[error("gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(String),

    /// A submission for the same form is still in flight.
    #[error("request already in progress")]
    Busy,
}

impl GatewayError {
    /// Builds the error for a non-success response from its status and body.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorResponse>(body).ok();
        let message = parsed
            .as_ref()
            .map(|r| match &r.details {
                Some(details) => format!("{} ({})", r.error, details),
                None => r.error.clone(),
            })
            .unwrap_or_else(|| body.trim().to_string());
        let code = parsed.as_ref().and_then(|r| r.code.as_deref());

        match (status, code) {
            (StatusCode::CONFLICT, Some(codes::INVITATION_EXISTS)) => Self::Conflict { message },
            (StatusCode::CONFLICT, Some(codes::INVALID_TRANSITION)) => {
                Self::InvalidTransition { message }
            }
            (StatusCode::NOT_FOUND, _) => Self::NotFound { message },
            _ => Self::Rejected { status, message },
        }
    }

    /// Only a stale-state error asks the user to reload; nothing is retried.
    pub fn needs_refresh(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }

    /// Text shown to the operator
    pub fn user_message(&self) -> String {
        match self {
            Self::Conflict { .. } => {
                "This school already has an active invitation for this campaign.".to_string()
            }
            Self::InvalidTransition { .. } => {
                "The invitation state has changed, please refresh.".to_string()
            }
            Self::NotFound { .. } => "The requested item no longer exists.".to_string(),
            Self::Rejected { message, .. } => format!("The request was rejected: {message}"),
            Self::Transport(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            Self::Decode(_) => "The server sent an unexpected response.".to_string(),
            Self::Busy => "Please wait for the current request to finish.".to_string(),
        }
    }
}

impl GatewayError {
    /// True for failures that happened before any answer arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Conflict { .. } | GatewayError::InvalidTransition { .. } => {
                Some(StatusCode::CONFLICT)
            }
            GatewayError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            GatewayError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
