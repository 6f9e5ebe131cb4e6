//! Feedback submission against a prediction, followed by a stats refresh.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::protocol::{Acceptance, FeedbackAck, FeedbackRecord, FeedbackStats, PredictionResult};
use tracing::info;

use crate::{
    api::DashboardApi,
    error::{FeedbackGateError, RequestError},
};

pub const FEEDBACK_SUBMITTED: &str = "Feedback submitted successfully!";
const MAX_FINAL_SCORE: f64 = 100.0;

/// User input on the feedback tab before it becomes a [`FeedbackRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub accepted: Option<Acceptance>,
    pub user_feedback: String,
    pub final_score: f64,
}

impl FeedbackDraft {
    /// Builds the record to submit, or the reason submission is not allowed.
    pub fn to_record(
        &self,
        prediction: Option<&PredictionResult>,
    ) -> Result<FeedbackRecord, FeedbackGateError> {
        let prediction = prediction.ok_or(FeedbackGateError::NoPrediction)?;
        let accepted = self.accepted.ok_or(FeedbackGateError::MissingAcceptance)?;
        if self.final_score.is_nan() || self.final_score <= 0.0 {
            return Err(FeedbackGateError::NonPositiveFinalScore(self.final_score));
        }
        if self.final_score > MAX_FINAL_SCORE {
            return Err(FeedbackGateError::FinalScoreOutOfRange(self.final_score));
        }

        Ok(FeedbackRecord {
            user_id: prediction.user_id.clone(),
            predicted_productivity_score: prediction.predicted_productivity_score,
            accepted,
            user_feedback: self.user_feedback.clone(),
            final_score: self.final_score,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub ack: FeedbackAck,
    pub stats: FeedbackStats,
}

pub struct FeedbackOrchestrator {
    api: Arc<dyn DashboardApi>,
}

impl FeedbackOrchestrator {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }

    /// Posts the record and resolves only after the aggregate stats have
    /// been refetched. A failed post skips the refresh.
    pub async fn submit(&self, record: &FeedbackRecord) -> Result<SubmitOutcome, RequestError> {
        let ack = self.api.submit_feedback(record).await?;
        info!(
            user_id = %record.user_id,
            accepted = %record.accepted,
            final_score = record.final_score,
            "feedback submitted"
        );
        let stats = self.refresh_stats().await?;
        Ok(SubmitOutcome { ack, stats })
    }

    pub async fn refresh_stats(&self) -> Result<FeedbackStats, RequestError> {
        self.api.feedback_stats().await
    }
}

/// Feedback tab state: the draft plus the outcome of the last submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPanel {
    pub draft: FeedbackDraft,
    pub submitting: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl FeedbackPanel {
    pub fn begin(&mut self) {
        self.submitting = true;
        self.error = None;
        self.notice = None;
    }

    /// The submitted draft is discarded.
    pub fn submitted(&mut self) {
        self.draft = FeedbackDraft::default();
        self.submitting = false;
        self.notice = Some(FEEDBACK_SUBMITTED.to_string());
    }

    /// The draft is kept so the user can retry.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
#[path = "tests/feedback_tests.rs"]
mod tests;
