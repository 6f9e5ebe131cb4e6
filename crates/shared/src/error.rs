use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error body returned by the prediction service on non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Human-readable detail, if the body carried a usable one.
    ///
    /// String details are returned as-is; structured details (lists of
    /// validation problems, objects) are rendered as compact JSON.
    pub fn detail_message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(text) if text.is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric field `{0}`")]
pub struct UnknownFieldError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown acceptance `{0}`; expected yes, neutral or no")]
pub struct UnknownAcceptanceError(pub String);
