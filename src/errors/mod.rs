// src/errors/mod.rs
use thiserror::Error;

use crate::http::Cardinality;

/// Main error type for harness operations
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid header name: {0}")]
    HeaderName(#[from] reqwest::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    HeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Malformed JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unexpected body shape: expected {expected}, found {found}")]
    Shape {
        expected: Cardinality,
        found: &'static str,
    },

    #[error("Scenario panicked: {0}")]
    Panicked(String),

    #[error("Assertion failed: {message} (status {status})")]
    Assertion {
        message: String,
        status: u16,
        body: String,
    },
}

/// Coarse classification used by the scenario report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// DNS, connect, timeout or body-read failures raised by the transport.
    Infrastructure,
    /// The body was expected to be JSON and was not.
    Parse,
    /// The response was well-formed but did not match expectations.
    Assertion,
    /// The scenario task panicked. Retried like any other failure.
    Panic,
    Config,
}

impl HarnessError {
    pub fn kind(&self) -> FailureKind {
        match self {
            HarnessError::Transport(_) | HarnessError::Reqwest(_) => FailureKind::Infrastructure,
            HarnessError::MalformedBody(_) => FailureKind::Parse,
            HarnessError::Shape { .. } | HarnessError::Assertion { .. } => FailureKind::Assertion,
            HarnessError::Panicked(_) => FailureKind::Panic,
            HarnessError::Io(_)
            | HarnessError::HeaderName(_)
            | HarnessError::HeaderValue(_)
            | HarnessError::SerdeYaml(_)
            | HarnessError::UrlParseError(_)
            | HarnessError::ConfigError(_) => FailureKind::Config,
        }
    }

    /// Raw response body attached to the failure, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            HarnessError::Assertion { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailureKind::Infrastructure => "infrastructure",
            FailureKind::Parse => "parse",
            FailureKind::Assertion => "assertion",
            FailureKind::Panic => "panic",
            FailureKind::Config => "config",
        };
        f.write_str(s)
    }
}

/// Convenience Result type that uses HarnessError
pub type Result<T> = std::result::Result<T, HarnessError>;
