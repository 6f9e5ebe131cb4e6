use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::UnknownAcceptanceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineStep {
    pub time: String,
    pub task: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub user_id: String,
    pub predicted_productivity_score: f64,
    #[serde(default)]
    pub personalized_recommendation: Vec<RoutineStep>,
}

/// Signed contribution of one input feature to a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImpact {
    pub feature: String,
    pub impact: f64,
}

/// Per-feature impacts. Decodes either a bare `[{feature, impact}, ..]`
/// array or the service's `{"explanation": {"all_factors": [..]}}` envelope;
/// always encodes as the bare array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExplanationResult(pub Vec<FeatureImpact>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ExplanationBody {
    Factors(Vec<FeatureImpact>),
    Envelope { explanation: FactorList },
}

#[derive(Deserialize)]
struct FactorList {
    all_factors: Vec<FeatureImpact>,
}

impl<'de> Deserialize<'de> for ExplanationResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let factors = match ExplanationBody::deserialize(deserializer)? {
            ExplanationBody::Factors(factors) => factors,
            ExplanationBody::Envelope { explanation } => explanation.all_factors,
        };
        Ok(Self(factors))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub feature: String,
    pub impact: f64,
    pub positive: bool,
}

impl ExplanationResult {
    pub fn impacts(&self) -> &[FeatureImpact] {
        &self.0
    }

    /// Rows for the feature-importance bar chart: magnitude plus sign flag,
    /// with the first underscore of the feature name shown as a space.
    pub fn chart_rows(&self) -> Vec<ChartRow> {
        self.0
            .iter()
            .map(|item| ChartRow {
                feature: item.feature.replacen('_', " ", 1),
                impact: item.impact.abs(),
                positive: item.impact > 0.0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    Yes,
    Neutral,
    No,
}

impl Acceptance {
    pub fn as_str(self) -> &'static str {
        match self {
            Acceptance::Yes => "yes",
            Acceptance::Neutral => "neutral",
            Acceptance::No => "no",
        }
    }
}

impl fmt::Display for Acceptance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Acceptance {
    type Err = UnknownAcceptanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Acceptance::Yes),
            "neutral" => Ok(Acceptance::Neutral),
            "no" => Ok(Acceptance::No),
            other => Err(UnknownAcceptanceError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub user_id: String,
    pub predicted_productivity_score: f64,
    pub accepted: Acceptance,
    #[serde(default)]
    pub user_feedback: String,
    pub final_score: f64,
}

/// Acknowledgement body of a feedback post; its shape is service-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackAck(pub Value);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackStats {
    pub total_feedback: u64,
    pub accepted_count: u64,
    pub neutral_count: u64,
    pub rejected_count: u64,
    pub avg_predicted_score: f64,
    pub avg_final_score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelStatus {
    #[serde(default)]
    pub model_loaded: bool,
}
