use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::{
    domain::InputMetrics,
    protocol::{
        ExplanationResult, FeatureImpact, FeedbackAck, FeedbackRecord, FeedbackStats,
        ModelStatus, PredictionResult, RoutineStep,
    },
};
use tokio::sync::{Barrier, Mutex};

use crate::{api::DashboardApi, error::RequestError};

pub(crate) const BASE_FEEDBACK_TOTAL: u64 = 5;

pub(crate) fn http_error(status: u16, message: &str) -> RequestError {
    RequestError::Status {
        status,
        detail: Some(message.to_string()),
        message: message.to_string(),
    }
}

pub(crate) fn sample_prediction() -> PredictionResult {
    PredictionResult {
        user_id: "user-42".into(),
        predicted_productivity_score: 73.5,
        personalized_recommendation: vec![
            RoutineStep {
                time: "07:00".into(),
                task: "Morning walk".into(),
            },
            RoutineStep {
                time: "09:00".into(),
                task: "Deep work block".into(),
            },
        ],
    }
}

pub(crate) fn sample_explanation() -> ExplanationResult {
    ExplanationResult(vec![
        FeatureImpact {
            feature: "Sleep_Hours".into(),
            impact: 3.2,
        },
        FeatureImpact {
            feature: "Stress_Level".into(),
            impact: -2.1,
        },
    ])
}

#[derive(Default)]
pub(crate) struct CallCounts {
    pub predict: AtomicUsize,
    pub predict_completed: AtomicUsize,
    pub explain: AtomicUsize,
    pub model_status: AtomicUsize,
    pub submit: AtomicUsize,
    pub stats: AtomicUsize,
    pub health: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// In-memory service with scripted outcomes and call counters.
pub(crate) struct ScriptedApi {
    /// Outcome of successive predict calls; empty means succeed.
    predict_plan: Mutex<VecDeque<bool>>,
    explain_ok: bool,
    submit_ok: bool,
    stats_ok: bool,
    model_loaded: bool,
    predict_delay: Option<Duration>,
    rendezvous: Option<Arc<Barrier>>,
    submitted: Mutex<Vec<FeedbackRecord>>,
    pub calls: CallCounts,
}

impl ScriptedApi {
    pub fn healthy() -> Self {
        Self {
            predict_plan: Mutex::new(VecDeque::new()),
            explain_ok: true,
            submit_ok: true,
            stats_ok: true,
            model_loaded: true,
            predict_delay: None,
            rendezvous: None,
            submitted: Mutex::new(Vec::new()),
            calls: CallCounts::default(),
        }
    }

    pub fn failing_explain(mut self) -> Self {
        self.explain_ok = false;
        self
    }

    pub fn predict_plan(self, plan: impl IntoIterator<Item = bool>) -> Self {
        Self {
            predict_plan: Mutex::new(plan.into_iter().collect()),
            ..self
        }
    }

    pub fn failing_submit(mut self) -> Self {
        self.submit_ok = false;
        self
    }

    pub fn failing_stats(mut self) -> Self {
        self.stats_ok = false;
        self
    }

    pub fn model_unloaded(mut self) -> Self {
        self.model_loaded = false;
        self
    }

    pub fn with_predict_delay(mut self, delay: Duration) -> Self {
        self.predict_delay = Some(delay);
        self
    }

    /// First predict and first explain call each wait until the other has started.
    pub fn with_rendezvous(mut self) -> Self {
        self.rendezvous = Some(Arc::new(Barrier::new(2)));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn submitted(&self) -> Vec<FeedbackRecord> {
        self.submitted.lock().await.clone()
    }

    async fn meet_if_first(&self, call_number: usize) {
        if call_number == 1 {
            if let Some(barrier) = &self.rendezvous {
                barrier.wait().await;
            }
        }
    }
}

#[async_trait]
impl DashboardApi for ScriptedApi {
    async fn predict(&self, _input: &InputMetrics) -> Result<PredictionResult, RequestError> {
        let call_number = self.calls.predict.fetch_add(1, Ordering::SeqCst) + 1;
        self.meet_if_first(call_number).await;
        if let Some(delay) = self.predict_delay {
            tokio::time::sleep(delay).await;
        }
        let ok = self.predict_plan.lock().await.pop_front().unwrap_or(true);
        self.calls.predict_completed.fetch_add(1, Ordering::SeqCst);
        if ok {
            Ok(sample_prediction())
        } else {
            Err(http_error(503, "model unavailable"))
        }
    }

    async fn explain(&self, _input: &InputMetrics) -> Result<ExplanationResult, RequestError> {
        let call_number = self.calls.explain.fetch_add(1, Ordering::SeqCst) + 1;
        self.meet_if_first(call_number).await;
        if self.explain_ok {
            Ok(sample_explanation())
        } else {
            Err(http_error(500, "explainer crashed"))
        }
    }

    async fn model_status(&self) -> Result<ModelStatus, RequestError> {
        self.calls.model_status.fetch_add(1, Ordering::SeqCst);
        Ok(ModelStatus {
            model_loaded: self.model_loaded,
        })
    }

    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<FeedbackAck, RequestError> {
        self.calls.submit.fetch_add(1, Ordering::SeqCst);
        if !self.submit_ok {
            return Err(http_error(422, "final_score out of range"));
        }
        self.submitted.lock().await.push(record.clone());
        Ok(FeedbackAck(json!({"status": "ok"})))
    }

    async fn feedback_stats(&self) -> Result<FeedbackStats, RequestError> {
        self.calls.stats.fetch_add(1, Ordering::SeqCst);
        if !self.stats_ok {
            return Err(http_error(500, "stats unavailable"));
        }
        let submitted = self.submitted.lock().await;
        let count = submitted.len() as u64;
        let accepted = submitted
            .iter()
            .filter(|record| record.accepted == shared::protocol::Acceptance::Yes)
            .count() as u64;
        Ok(FeedbackStats {
            total_feedback: BASE_FEEDBACK_TOTAL + count,
            accepted_count: accepted,
            neutral_count: 0,
            rejected_count: 0,
            avg_predicted_score: 70.0,
            avg_final_score: 68.0,
        })
    }

    async fn health(&self) -> Result<Value, RequestError> {
        self.calls.health.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"status": "healthy"}))
    }
}
