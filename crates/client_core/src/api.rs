//! Contract consumed from the remote prediction and feedback service.

use async_trait::async_trait;
use serde_json::Value;
use shared::{
    domain::InputMetrics,
    protocol::{
        ExplanationResult, FeedbackAck, FeedbackRecord, FeedbackStats, ModelStatus,
        PredictionResult,
    },
};

use crate::error::RequestError;

pub const PREDICT_PATH: &str = "/predict";
pub const EXPLAIN_PATH: &str = "/explain";
pub const MODEL_STATUS_PATH: &str = "/model-status";
pub const FEEDBACK_PATH: &str = "/feedback";
pub const FEEDBACK_STATS_PATH: &str = "/feedback-stats";
pub const HEALTH_PATH: &str = "/health";

#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn predict(&self, input: &InputMetrics) -> Result<PredictionResult, RequestError>;
    async fn explain(&self, input: &InputMetrics) -> Result<ExplanationResult, RequestError>;
    async fn model_status(&self) -> Result<ModelStatus, RequestError>;
    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<FeedbackAck, RequestError>;
    async fn feedback_stats(&self) -> Result<FeedbackStats, RequestError>;
    async fn health(&self) -> Result<Value, RequestError>;
}
