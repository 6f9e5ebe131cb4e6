//! Dashboard application state and its pure transition function.

use serde::{Deserialize, Serialize};
use shared::{
    domain::MetricField,
    protocol::{Acceptance, FeedbackStats, ModelStatus},
};

use crate::{
    call_state::CallState, feedback::FeedbackPanel, form::FormState,
    prediction::{PredictionOutcome, PredictionView},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Predict,
    Results,
    Feedback,
    Overview,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Predict, Tab::Results, Tab::Feedback, Tab::Overview];

    pub fn requires_prediction(self) -> bool {
        matches!(self, Tab::Results | Tab::Feedback)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub form: FormState,
    pub prediction: PredictionView,
    pub feedback: FeedbackPanel,
    pub stats: CallState<FeedbackStats>,
    pub model_status: CallState<ModelStatus>,
}

impl DashboardState {
    pub fn has_prediction(&self) -> bool {
        self.prediction.prediction.is_some()
    }

    pub fn tab_enabled(&self, tab: Tab) -> bool {
        !tab.requires_prediction() || self.has_prediction()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectTab(Tab),
    UpdateField(MetricField, f64),
    ValidateForm,
    ResetForm,
    PredictionStarted,
    PredictionResolved(PredictionOutcome),
    PredictionFailed(String),
    ClearPrediction,
    SetAcceptance(Option<Acceptance>),
    SetUserFeedback(String),
    SetFinalScore(f64),
    FeedbackStarted,
    FeedbackSubmitted(FeedbackStats),
    FeedbackFailed(String),
    StatsStarted,
    StatsLoaded(FeedbackStats),
    StatsFailed(String),
    ModelStatusStarted,
    ModelStatusLoaded(ModelStatus),
    ModelStatusFailed(String),
}

pub fn reduce(state: &DashboardState, action: Action) -> DashboardState {
    let mut next = state.clone();
    match action {
        Action::SelectTab(tab) => {
            if next.tab_enabled(tab) {
                next.active_tab = tab;
            }
        }
        Action::UpdateField(field, value) => next.form.update(field, value),
        Action::ValidateForm => {
            next.form.validate();
        }
        Action::ResetForm => next.form.reset(),
        Action::PredictionStarted => next.prediction.begin(),
        Action::PredictionResolved(outcome) => next.prediction.resolve(outcome),
        Action::PredictionFailed(message) => next.prediction.fail(&message),
        Action::ClearPrediction => {
            next.prediction.clear();
            if next.active_tab.requires_prediction() {
                next.active_tab = Tab::Predict;
            }
        }
        Action::SetAcceptance(accepted) => next.feedback.draft.accepted = accepted,
        Action::SetUserFeedback(text) => next.feedback.draft.user_feedback = text,
        Action::SetFinalScore(score) => next.feedback.draft.final_score = score,
        Action::FeedbackStarted => next.feedback.begin(),
        Action::FeedbackSubmitted(stats) => {
            next.feedback.submitted();
            next.stats.succeed(stats);
        }
        Action::FeedbackFailed(message) => next.feedback.fail(message),
        Action::StatsStarted => next.stats.begin(),
        Action::StatsLoaded(stats) => next.stats.succeed(stats),
        Action::StatsFailed(message) => next.stats.fail(message),
        Action::ModelStatusStarted => next.model_status.begin(),
        Action::ModelStatusLoaded(status) => next.model_status.succeed(status),
        Action::ModelStatusFailed(message) => next.model_status.fail(message),
    }
    next
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
