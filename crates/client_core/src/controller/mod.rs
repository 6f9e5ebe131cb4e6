//! Controller layer: dashboard state, reducer-like transitions, and call orchestration.

pub mod dashboard;
pub mod reducer;

pub use dashboard::Dashboard;
pub use reducer::{reduce, Action, DashboardState, Tab};
