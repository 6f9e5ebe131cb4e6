//! Outbound HTTP calls to the prediction service.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use shared::{
    domain::InputMetrics,
    protocol::{
        ExplanationResult, FeedbackAck, FeedbackRecord, FeedbackStats, ModelStatus,
        PredictionResult,
    },
};
use tracing::{debug, error};

use crate::{
    api::{
        DashboardApi, EXPLAIN_PATH, FEEDBACK_PATH, FEEDBACK_STATS_PATH, HEALTH_PATH,
        MODEL_STATUS_PATH, PREDICT_PATH,
    },
    error::RequestError,
};

pub const API_PREFIX: &str = "/api/v1";

/// Single-attempt JSON gateway rooted at a fixed base URL (origin + `/api/v1`).
///
/// No retries and no timeout: every call is exactly one network attempt.
#[derive(Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL without the API prefix; the health endpoint lives here.
    pub fn origin(&self) -> &str {
        self.base_url
            .strip_suffix(API_PREFIX)
            .unwrap_or(&self.base_url)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Issues one request and returns the JSON body verbatim.
    ///
    /// `Content-Type: application/json` is always attached; `headers` are
    /// merged on top and win on conflict.
    pub async fn call(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
    ) -> Result<Value, RequestError> {
        self.call_as(method, url, body, headers).await
    }

    /// Like [`HttpGateway::call`], decoding the body into `T`. Transport,
    /// status and decode failures are all logged here as `API Error`.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
    ) -> Result<T, RequestError> {
        let result = match self.send(method.clone(), url, body, headers).await {
            Ok(value) => serde_json::from_value(value).map_err(RequestError::from),
            Err(err) => Err(err),
        };
        match &result {
            Ok(_) => debug!(%method, url, "api call succeeded"),
            Err(err) => error!(%method, url, status = ?err.status(), error = %err, "API Error"),
        }
        result
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
    ) -> Result<Value, RequestError> {
        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in headers {
            merged.insert(name.clone(), value.clone());
        }

        let mut request = self.http.request(method, url).headers(merged);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(RequestError::from_status(status, &body));
        }

        Ok(response.json::<Value>().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RequestError> {
        self.call_as(Method::GET, url, None, &HeaderMap::new()).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, RequestError> {
        let body = serde_json::to_value(body).map_err(|err| {
            error!(method = %Method::POST, url, error = %err, "API Error");
            RequestError::from(err)
        })?;
        self.call_as(Method::POST, url, Some(&body), &HeaderMap::new())
            .await
    }
}

#[async_trait]
impl DashboardApi for HttpGateway {
    async fn predict(&self, input: &InputMetrics) -> Result<PredictionResult, RequestError> {
        self.post_json(&self.endpoint(PREDICT_PATH), input).await
    }

    async fn explain(&self, input: &InputMetrics) -> Result<ExplanationResult, RequestError> {
        self.post_json(&self.endpoint(EXPLAIN_PATH), input).await
    }

    async fn model_status(&self) -> Result<ModelStatus, RequestError> {
        self.get_json(&self.endpoint(MODEL_STATUS_PATH)).await
    }

    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<FeedbackAck, RequestError> {
        self.post_json(&self.endpoint(FEEDBACK_PATH), record).await
    }

    async fn feedback_stats(&self) -> Result<FeedbackStats, RequestError> {
        self.get_json(&self.endpoint(FEEDBACK_STATS_PATH)).await
    }

    async fn health(&self) -> Result<Value, RequestError> {
        self.get_json(&format!("{}{HEALTH_PATH}", self.origin()))
            .await
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
