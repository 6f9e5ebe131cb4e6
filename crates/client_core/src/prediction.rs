//! Prediction with explanation, degrading to prediction only.

use std::sync::Arc;

use futures::future::join;
use serde::{Deserialize, Serialize};
use shared::{
    domain::InputMetrics,
    protocol::{ExplanationResult, PredictionResult},
};
use tracing::{info, warn};

use crate::{api::DashboardApi, error::RequestError};

pub const EXPLANATION_FAILED: &str = "Explanation failed to load";
const PREDICTION_FAILED: &str = "Prediction failed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub prediction: PredictionResult,
    pub explanation: Option<ExplanationResult>,
    /// Advisory message for a degraded success; `None` when both calls succeeded.
    pub error: Option<String>,
}

impl PredictionOutcome {
    pub fn is_partial(&self) -> bool {
        self.explanation.is_none()
    }
}

pub struct PredictionOrchestrator {
    api: Arc<dyn DashboardApi>,
}

impl PredictionOrchestrator {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }

    /// Runs prediction and explanation concurrently. If either fails, the
    /// prediction is requested again on its own; only that second failure
    /// is propagated.
    pub async fn predict(&self, input: &InputMetrics) -> Result<PredictionOutcome, RequestError> {
        let (prediction, explanation) =
            join(self.api.predict(input), self.api.explain(input)).await;

        match (prediction, explanation) {
            (Ok(prediction), Ok(explanation)) => {
                info!(
                    user_id = %prediction.user_id,
                    score = prediction.predicted_productivity_score,
                    "prediction with explanation loaded"
                );
                return Ok(PredictionOutcome {
                    prediction,
                    explanation: Some(explanation),
                    error: None,
                });
            }
            (prediction, explanation) => warn!(
                prediction_error = ?prediction.err().map(|err| err.message()),
                explanation_error = ?explanation.err().map(|err| err.message()),
                "prediction fan-out failed; retrying prediction alone"
            ),
        }

        let prediction = self.api.predict(input).await?;
        Ok(PredictionOutcome {
            prediction,
            explanation: None,
            error: Some(EXPLANATION_FAILED.to_string()),
        })
    }
}

/// What the view renders for the prediction panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionView {
    pub loading: bool,
    pub error: Option<String>,
    pub prediction: Option<PredictionResult>,
    pub explanation: Option<ExplanationResult>,
}

impl PredictionView {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn resolve(&mut self, outcome: PredictionOutcome) {
        self.prediction = Some(outcome.prediction);
        self.explanation = outcome.explanation;
        self.error = outcome.error;
        self.loading = false;
    }

    /// Leaves the previous prediction and explanation untouched.
    pub fn fail(&mut self, message: &str) {
        self.error = Some(if message.is_empty() {
            PREDICTION_FAILED.to_string()
        } else {
            message.to_string()
        });
        self.loading = false;
    }

    pub fn clear(&mut self) {
        self.prediction = None;
        self.explanation = None;
        self.error = None;
    }
}

#[cfg(test)]
#[path = "tests/prediction_tests.rs"]
mod tests;
