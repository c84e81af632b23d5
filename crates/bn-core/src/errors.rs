//! Structured error types shared across the inference crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`BnError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (variable names, table indices, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the inference engine.
///
/// None of the families are recoverable inside the engine: every variant
/// signals a caller or model configuration problem and is returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum BnError {
    /// Malformed query descriptors (overlapping or unknown observations).
    #[error("query error: {0}")]
    Query(ErrorInfo),
    /// Incomplete or invalid conditional probability tables.
    #[error("model error: {0}")]
    Model(ErrorInfo),
    /// Evidence with zero probability under the model.
    #[error("evidence error: {0}")]
    Evidence(ErrorInfo),
    /// Sampling runs that produced no usable estimate.
    #[error("estimation error: {0}")]
    Estimation(ErrorInfo),
    /// Network construction errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Serialization, schema and IO errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl BnError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            BnError::Query(info)
            | BnError::Model(info)
            | BnError::Evidence(info)
            | BnError::Estimation(info)
            | BnError::Graph(info)
            | BnError::Serde(info) => info,
        }
    }

    /// Returns the stable code of the payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload, keeping the family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            BnError::Query(info) => BnError::Query(info.with_context(key, value)),
            BnError::Model(info) => BnError::Model(info.with_context(key, value)),
            BnError::Evidence(info) => BnError::Evidence(info.with_context(key, value)),
            BnError::Estimation(info) => BnError::Estimation(info.with_context(key, value)),
            BnError::Graph(info) => BnError::Graph(info.with_context(key, value)),
            BnError::Serde(info) => BnError::Serde(info.with_context(key, value)),
        }
    }

    /// Sets the remediation hint of the payload, keeping the family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            BnError::Query(info) => BnError::Query(info.with_hint(hint)),
            BnError::Model(info) => BnError::Model(info.with_hint(hint)),
            BnError::Evidence(info) => BnError::Evidence(info.with_hint(hint)),
            BnError::Estimation(info) => BnError::Estimation(info.with_hint(hint)),
            BnError::Graph(info) => BnError::Graph(info.with_hint(hint)),
            BnError::Serde(info) => BnError::Serde(info.with_hint(hint)),
        }
    }

    /// Shorthand for a [`BnError::Query`] error.
    pub fn query(code: impl Into<String>, message: impl Into<String>) -> Self {
        BnError::Query(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`BnError::Model`] error.
    pub fn model(code: impl Into<String>, message: impl Into<String>) -> Self {
        BnError::Model(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`BnError::Evidence`] error.
    pub fn evidence(code: impl Into<String>, message: impl Into<String>) -> Self {
        BnError::Evidence(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`BnError::Estimation`] error.
    pub fn estimation(code: impl Into<String>, message: impl Into<String>) -> Self {
        BnError::Estimation(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`BnError::Graph`] error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        BnError::Graph(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`BnError::Serde`] error.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        BnError::Serde(ErrorInfo::new(code, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_keeps_family_and_context() {
        let err = BnError::estimation("no-compatible-samples", "no sample kept")
            .with_context("iterations", 10)
            .with_hint("increase the iteration count");
        assert!(matches!(err, BnError::Estimation(_)));
        assert_eq!(err.code(), "no-compatible-samples");
        assert_eq!(err.info().hint.as_deref(), Some("increase the iteration count"));
        assert_eq!(err.info().context.get("iterations").map(String::as_str), Some("10"));
        assert!(err.to_string().ends_with("| hint: increase the iteration count"));
    }
}
