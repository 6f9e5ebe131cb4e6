use std::sync::Arc;

use futures::future::join;
use serde_json::Value;
use shared::{
    domain::MetricField,
    protocol::{Acceptance, FeedbackAck, FeedbackStats, ModelStatus},
};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    api::DashboardApi,
    controller::reducer::{reduce, Action, DashboardState, Tab},
    error::{PredictError, RequestError, SubmitError},
    feedback::FeedbackOrchestrator,
    prediction::{PredictionOrchestrator, PredictionOutcome},
};

/// Owns the dashboard state and drives the remote calls behind it.
///
/// Every transition publishes a complete new snapshot; subscribers never see
/// a partially applied update.
pub struct Dashboard {
    api: Arc<dyn DashboardApi>,
    prediction: PredictionOrchestrator,
    feedback: FeedbackOrchestrator,
    state: watch::Sender<DashboardState>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self::with_state(api, DashboardState::default())
    }

    pub fn with_state(api: Arc<dyn DashboardApi>, initial: DashboardState) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            prediction: PredictionOrchestrator::new(Arc::clone(&api)),
            feedback: FeedbackOrchestrator::new(Arc::clone(&api)),
            api,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Applies `action` under the channel's write lock, so concurrent
    /// dispatches never overwrite each other's transitions.
    pub fn dispatch(&self, action: Action) {
        self.state.send_modify(|state| *state = reduce(state, action));
    }

    pub fn select_tab(&self, tab: Tab) {
        self.dispatch(Action::SelectTab(tab));
    }

    pub fn update_field(&self, field: MetricField, value: f64) {
        self.dispatch(Action::UpdateField(field, value));
    }

    pub fn reset_form(&self) {
        self.dispatch(Action::ResetForm);
    }

    pub fn set_acceptance(&self, accepted: Option<Acceptance>) {
        self.dispatch(Action::SetAcceptance(accepted));
    }

    pub fn set_user_feedback(&self, text: impl Into<String>) {
        self.dispatch(Action::SetUserFeedback(text.into()));
    }

    pub fn set_final_score(&self, score: f64) {
        self.dispatch(Action::SetFinalScore(score));
    }

    pub fn clear_prediction(&self) {
        self.dispatch(Action::ClearPrediction);
    }

    /// Initial load: feedback stats and model status, once each. Failures
    /// land in the state rather than being returned.
    pub async fn activate(&self) {
        let (stats, status) = join(self.refresh_stats(), self.check_model_status()).await;
        if let Err(err) = stats {
            warn!(error = %err, "initial feedback stats load failed");
        }
        if let Err(err) = status {
            warn!(error = %err, "initial model status check failed");
        }
    }

    pub async fn refresh_stats(&self) -> Result<FeedbackStats, RequestError> {
        self.dispatch(Action::StatsStarted);
        match self.feedback.refresh_stats().await {
            Ok(stats) => {
                self.dispatch(Action::StatsLoaded(stats.clone()));
                Ok(stats)
            }
            Err(err) => {
                self.dispatch(Action::StatsFailed(err.message()));
                Err(err)
            }
        }
    }

    pub async fn check_model_status(&self) -> Result<ModelStatus, RequestError> {
        self.dispatch(Action::ModelStatusStarted);
        match self.api.model_status().await {
            Ok(status) => {
                self.dispatch(Action::ModelStatusLoaded(status));
                Ok(status)
            }
            Err(err) => {
                self.dispatch(Action::ModelStatusFailed(err.message()));
                Err(err)
            }
        }
    }

    pub async fn health(&self) -> Result<Value, RequestError> {
        self.api.health().await
    }

    /// Validates the form and, if it passes, requests a prediction for the
    /// current values. An invalid form dispatches nothing.
    pub async fn predict(&self) -> Result<PredictionOutcome, PredictError> {
        self.dispatch(Action::ValidateForm);
        let input = {
            let state = self.state.borrow();
            if !state.form.is_valid() {
                debug!(fields = state.form.errors().len(), "prediction blocked by validation");
                return Err(PredictError::Invalid(state.form.errors().clone()));
            }
            state.form.values().clone()
        };

        self.dispatch(Action::PredictionStarted);
        match self.prediction.predict(&input).await {
            Ok(outcome) => {
                self.dispatch(Action::PredictionResolved(outcome.clone()));
                Ok(outcome)
            }
            Err(err) => {
                self.dispatch(Action::PredictionFailed(err.message()));
                Err(err.into())
            }
        }
    }

    /// Submits the current feedback draft against the current prediction.
    pub async fn submit_feedback(&self) -> Result<FeedbackAck, SubmitError> {
        let (draft, prediction) = {
            let state = self.state.borrow();
            (
                state.feedback.draft.clone(),
                state.prediction.prediction.clone(),
            )
        };
        let record = draft.to_record(prediction.as_ref())?;

        self.dispatch(Action::FeedbackStarted);
        match self.feedback.submit(&record).await {
            Ok(outcome) => {
                self.dispatch(Action::FeedbackSubmitted(outcome.stats));
                Ok(outcome.ack)
            }
            Err(err) => {
                self.dispatch(Action::FeedbackFailed(err.message()));
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/dashboard_tests.rs"]
mod tests;
