use crate::metrics::MetricRequest;
use core::fmt::{Display, Formatter};
use thiserror::Error;

/// Failures detected while turning a request into command text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("unknown metric key")]
    UnknownKey,

    #[error("missing required parameter '{name}'")]
    MissingParameter { name: &'static str },

    #[error("parameter '{name}' may only contain ASCII letters, digits, '.', ':', '-' and '_', got {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("unexpected parameter {value:?} at position {position}")]
    UnexpectedParameter { position: usize, value: String },
}

/// Failures detected while interpreting the raw output of a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("command produced no output")]
    EmptyResult,

    #[error("output {text:?} is not a base-10 integer")]
    MalformedScalar { text: String },

    #[error("output {text:?} is not a JSON array of strings: {reason}")]
    MalformedList { text: String, reason: String },

    #[error("output is not a valid JSON document: {reason}")]
    MalformedDocument { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("execution failed: {reason} (output: {output:?})")]
    ExecutionFailed { reason: String, output: String },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// A failed export, tagged with the metric key and, when known, the scope it was about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportError {
    pub key: String,
    pub scope_id: Option<String>,
    pub kind: ErrorKind,
}

impl ExportError {
    pub(crate) fn new(request: &MetricRequest, scope_id: Option<String>, kind: impl Into<ErrorKind>) -> Self {
        Self {
            key: request.key().to_string(),
            scope_id,
            kind: kind.into(),
        }
    }
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.scope_id {
            Some(scope_id) => write!(f, "metric '{}' for scope '{scope_id}': {}", self.key, self.kind),
            None => write!(f, "metric '{}': {}", self.key, self.kind),
        }
    }
}

impl core::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}
