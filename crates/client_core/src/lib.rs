pub mod api;
pub mod call_state;
pub mod config;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod form;
pub mod gateway;
pub mod prediction;
pub mod status;

pub use api::DashboardApi;
pub use controller::{Action, Dashboard, DashboardState, Tab};
pub use error::{FeedbackGateError, PredictError, RequestError, SubmitError};
pub use gateway::HttpGateway;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
