// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Each error variant tells the story of what went wrong and where,
//! so the load orchestrator can classify a failed stage without
//! matching on message strings.

use crate::types::FeedResource;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Feed service returned HTTP {status} for the {resource} at {url}: {preview}")]
    FeedService {
        resource: FeedResource,
        status: reqwest::StatusCode,
        url: String,
        preview: String,
    },

    #[error("Could not read the {resource} from {path}: {source}")]
    ResourceRead {
        resource: FeedResource,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {resource} payload from {url}: {source}")]
    Decode {
        resource: FeedResource,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Browsing history unavailable: {0}")]
    HistoryUnavailable(String),

    #[error("Template file not found at {path}: {source}")]
    TemplateNotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("A load is already in progress for this feed")]
    LoadInFlight,

    #[error("The load was cancelled before it completed")]
    LoadCancelled,

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

// Allow converting from anyhow::Error, preserving error chain
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: format!("{:#}", err),
            source: None,
        }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::InternalError {
            message: "Formatting error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Why a single catalog record was dropped during decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("record {index} does not match the item schema: {reason}")]
    Schema { index: usize, reason: String },

    #[error("record {index} has an invalid {field}: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

/// Domain vocabulary for why a load stage failed.
///
/// This is not an error type; it classifies the failure reason
/// carried in the load report, so callers can tell a dead network from a
/// broken payload without holding on to the underlying error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadFailure {
    /// The fetch did not return data.
    Transport { cause: String },
    /// The service answered with a non-success status.
    ServiceStatus { status: u16 },
    /// The payload as a whole did not match the expected schema.
    Decode { reason: String },
    /// Some other failure occurred.
    Other { cause: String },
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { cause } => write!(f, "transport failure: {}", cause),
            Self::ServiceStatus { status } => write!(f, "service returned HTTP {}", status),
            Self::Decode { reason } => write!(f, "malformed payload: {}", reason),
            Self::Other { cause } => write!(f, "{}", cause),
        }
    }
}

/// Classifies a load-stage error into a domain-specific failure reason.
pub fn classify_load_failure(error: &AppError) -> LoadFailure {
    match error {
        AppError::NetworkFailure(e) => LoadFailure::Transport {
            cause: e.to_string(),
        },
        AppError::ResourceRead { source, .. } | AppError::Io(source) => LoadFailure::Transport {
            cause: source.to_string(),
        },
        AppError::FeedService { status, .. } => LoadFailure::ServiceStatus {
            status: status.as_u16(),
        },
        AppError::Decode { source, .. } => LoadFailure::Decode {
            reason: source.to_string(),
        },
        AppError::MalformedResponse(reason) => LoadFailure::Decode {
            reason: reason.clone(),
        },
        other => LoadFailure::Other {
            cause: other.to_string(),
        },
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
