//! Required-field checking shared by the creation requests.

use serde_json::{Map, Value};

use crate::errors::AppError;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Collects a per-field "missing" map while pulling values out of a request.
#[derive(Debug, Default)]
pub struct RequiredFields {
    fields: Map<String, Value>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// A text field counts as present unless absent, null, or blank.
    pub fn text(&mut self, name: &'static str, value: &Option<String>) -> Option<String> {
        let present = value
            .as_ref()
            .filter(|v| !v.trim().is_empty())
            .cloned();
        self.mark(name, present.is_none());
        present
    }

    /// Numeric field. Zero counts as missing unless `allow_zero` is set.
    pub fn amount(
        &mut self,
        name: &'static str,
        value: Option<f64>,
        allow_zero: bool,
    ) -> Option<f64> {
        let present = value.filter(|v| allow_zero || *v != 0.0);
        self.mark(name, present.is_none());
        present
    }

    #[cfg(test)]
    pub fn is_missing(&self, name: &str) -> bool {
        self.fields.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// The validation error describing every field checked so far.
    pub fn into_error(self) -> AppError {
        AppError::Validation {
            message: ALL_FIELDS_REQUIRED.to_string(),
            missing_fields: Some(self.fields),
        }
    }

    fn mark(&mut self, name: &'static str, missing: bool) {
        self.fields.insert(name.to_string(), Value::Bool(missing));
    }
}
