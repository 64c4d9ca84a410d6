//! Field-level validation accumulator shared by form-backed inputs.
//!
//! Constructors collect every failing field instead of stopping at the first
//! so a re-rendered form can show all messages at once.

use std::collections::BTreeMap;

use serde_json::{Value, json};

use super::Error;

/// Message used for required fields left blank.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Per-field validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Record a required-field failure when `value` is blank; returns the
    /// trimmed value otherwise.
    pub fn require<'a>(&mut self, field: &'static str, value: &'a str) -> Option<&'a str> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, REQUIRED_MESSAGE);
            None
        } else {
            Some(trimmed)
        }
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Convert into the form re-render error.
    ///
    /// `values` echoes the submitted fields (never passwords) so the client
    /// can redisplay what the user typed.
    #[must_use]
    pub fn into_error(self, form: &'static str, values: Value) -> Error {
        Error::invalid_request("form validation failed").with_details(json!({
            "form": form,
            "values": values,
            "errors": self.0,
        }))
    }
}
