//! Error taxonomy for the dashboard client.

use reqwest::StatusCode;
use shared::error::ErrorBody;
use thiserror::Error;

use crate::form::ValidationErrors;

/// Failure of a single call through the HTTP gateway.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Non-2xx response. `message` is the service `detail` when one could be
    /// parsed, otherwise `HTTP Error: <status>`.
    #[error("{message}")]
    Status {
        status: u16,
        detail: Option<String>,
        message: String,
    },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl RequestError {
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.detail_message());
        let message = detail
            .clone()
            .unwrap_or_else(|| format!("HTTP Error: {}", status.as_u16()));
        Self::Status {
            status: status.as_u16(),
            detail,
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Json(_) => None,
        }
    }

    /// Message shown inline by the view.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Reasons a feedback submission is refused before any request is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackGateError {
    #[error("no prediction to give feedback on")]
    NoPrediction,
    #[error("choose whether the recommendation was helpful")]
    MissingAcceptance,
    #[error("final score must be greater than 0 (got {0})")]
    NonPositiveFinalScore(f64),
    #[error("final score must be at most 100 (got {0})")]
    FinalScoreOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Gate(#[from] FeedbackGateError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("input metrics failed validation ({} field(s))", .0.len())]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Request(#[from] RequestError),
}
