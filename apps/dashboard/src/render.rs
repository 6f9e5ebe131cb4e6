//! Plain-text rendering of dashboard state.

use std::fmt::Write as _;

use anyhow::{anyhow, Context, Result};
use client_core::{status::status_label, DashboardState};
use shared::domain::MetricField;

/// Parses `FIELD=VALUE` as given to `--set`.
pub fn parse_assignment(raw: &str) -> Result<(MetricField, f64)> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{raw}'"))?;
    let field: MetricField = field.parse()?;
    let value: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid number for {field}: '{value}'"))?;
    Ok((field, value))
}

pub fn header(state: &DashboardState) -> String {
    format!(
        "Behavioral Routine Optimizer  [{}]",
        status_label(state.model_status.data.as_ref())
    )
}

pub fn validation_errors(state: &DashboardState) -> String {
    let mut out = String::new();
    for (field, message) in state.form.errors() {
        let _ = writeln!(out, "  {} ({}): {message}", field.label(), field.wire_name());
    }
    out
}

pub fn results(state: &DashboardState) -> String {
    let mut out = String::new();
    let Some(prediction) = &state.prediction.prediction else {
        return "No prediction yet.\n".to_string();
    };

    let _ = writeln!(
        out,
        "Predicted productivity score: {:.1}%  (user {})",
        prediction.predicted_productivity_score, prediction.user_id
    );
    if let Some(error) = &state.prediction.error {
        let _ = writeln!(out, "Note: {error}");
    }

    if !prediction.personalized_recommendation.is_empty() {
        let _ = writeln!(out, "\nRecommended routine:");
        for step in &prediction.personalized_recommendation {
            let _ = writeln!(out, "  {:>8}  {}", step.time, step.task);
        }
    }

    if let Some(explanation) = &state.prediction.explanation {
        let _ = writeln!(out, "\nFeature impact:");
        for row in explanation.chart_rows() {
            let sign = if row.positive { '+' } else { '-' };
            let _ = writeln!(out, "  {sign}{:<7.3} {}", row.impact, row.feature);
        }
    }
    out
}

pub fn stats(state: &DashboardState) -> String {
    if let Some(error) = &state.stats.error {
        return format!("Feedback stats unavailable: {error}\n");
    }
    let stats = state.stats.data.clone().unwrap_or_default();
    let mut out = String::new();
    let _ = writeln!(out, "Total feedback:      {}", stats.total_feedback);
    let _ = writeln!(out, "Positive feedback:   {}", stats.accepted_count);
    let _ = writeln!(out, "Neutral feedback:    {}", stats.neutral_count);
    let _ = writeln!(out, "Not helpful:         {}", stats.rejected_count);
    let _ = writeln!(out, "Avg predicted score: {}%", stats.avg_predicted_score);
    let _ = writeln!(out, "Avg final score:     {}%", stats.avg_final_score);
    out
}
