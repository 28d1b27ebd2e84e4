//! Structured error types shared across PAME crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`StoreError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (step labels, attribute paths, etc.).
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
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Looks up a context entry, e.g. the `step` a failure occurred on.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the simulation result store crates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum StoreError {
    /// Caller supplied an argument of the wrong kind or value.
    #[error("invalid argument: {0}")]
    InvalidArgument(ErrorInfo),
    /// A dotted attribute path could not be resolved in the results tree.
    #[error("missing attribute: {0}")]
    MissingAttribute(ErrorInfo),
    /// Per-step primary data could not be coerced into a uniform table.
    #[error("table construction failure: {0}")]
    TableConstruction(ErrorInfo),
    /// A saved payload is corrupt or was written by an incompatible schema.
    #[error("deserialization error: {0}")]
    Deserialization(ErrorInfo),
    /// A JSON document lacks a required field or has the wrong shape.
    #[error("format error: {0}")]
    Format(ErrorInfo),
    /// Filesystem or stream failures.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    /// Renders `[code] message (key=value, ...); hint: ...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        let mut entries = self.context.iter();
        if let Some((key, value)) = entries.next() {
            write!(f, " ({key}={value}")?;
            for (key, value) in entries {
                write!(f, ", {key}={value}")?;
            }
            f.write_str(")")?;
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl StoreError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            StoreError::InvalidArgument(info)
            | StoreError::MissingAttribute(info)
            | StoreError::TableConstruction(info)
            | StoreError::Deserialization(info)
            | StoreError::Format(info)
            | StoreError::Io(info) => info,
        }
    }

    /// Wraps an I/O failure, recording the path it occurred on.
    pub fn io(code: &str, path: impl Display, err: std::io::Error) -> Self {
        StoreError::Io(
            ErrorInfo::new(code, err.to_string()).with_context("path", path.to_string()),
        )
    }
}
