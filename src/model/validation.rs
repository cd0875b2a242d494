//! Request validation

use thiserror::Error;

use super::values::Key;

/// A request failed its shape contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field was present but unusable
    #[error("{0}")]
    Invalid(String),
}

/// Every request contract checks itself before any SQL runs
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Collects the names of absent required fields
#[derive(Debug, Default)]
pub(crate) struct Required {
    missing: Vec<&'static str>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text must be present and non-blank
    pub fn text(mut self, name: &'static str, value: &Option<String>) -> Self {
        if super::values::non_blank(value).is_none() {
            self.missing.push(name);
        }
        self
    }

    /// Identifier must be present and non-blank
    pub fn key(mut self, name: &'static str, value: &Option<Key>) -> Self {
        if value.as_ref().map_or(true, Key::is_blank) {
            self.missing.push(name);
        }
        self
    }

    /// Value must be present; any value counts, zero included
    pub fn present<T>(mut self, name: &'static str, value: &Option<T>) -> Self {
        if value.is_none() {
            self.missing.push(name);
        }
        self
    }

    /// Number must be present and non-zero
    pub fn nonzero(mut self, name: &'static str, value: &Option<f64>) -> Self {
        if !matches!(value, Some(n) if *n != 0.0) {
            self.missing.push(name);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(self.missing))
        }
    }
}
