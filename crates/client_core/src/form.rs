//! Form state: the editable input metrics plus per-field validation errors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::domain::{InputMetrics, MetricField};

pub type ValidationErrors = BTreeMap<MetricField, String>;

/// Fields whose range is enforced before a prediction is requested. Every
/// other field is accepted as entered.
pub const VALIDATED_FIELDS: &[(MetricField, &str)] = &[
    (MetricField::Age, "Age must be between 18 and 80"),
    (MetricField::SleepHours, "Sleep hours must be between 4 and 12"),
    (MetricField::WorkHours, "Work hours must be between 0 and 16"),
];

pub fn validate_metrics(metrics: &InputMetrics) -> ValidationErrors {
    VALIDATED_FIELDS
        .iter()
        .filter(|(field, _)| !field.range().contains(metrics.get(*field)))
        .map(|(field, message)| (*field, (*message).to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    defaults: InputMetrics,
    values: InputMetrics,
    errors: ValidationErrors,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(InputMetrics::default())
    }
}

impl FormState {
    pub fn new(defaults: InputMetrics) -> Self {
        Self {
            values: defaults.clone(),
            defaults,
            errors: ValidationErrors::new(),
        }
    }

    pub fn values(&self) -> &InputMetrics {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Replaces one field and drops that field's error without re-checking the rest.
    pub fn update(&mut self, field: MetricField, value: f64) {
        self.values = self.values.with(field, value);
        self.errors.remove(&field);
    }

    pub fn validate(&mut self) -> bool {
        self.errors = validate_metrics(&self.values);
        self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.defaults.clone());
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
