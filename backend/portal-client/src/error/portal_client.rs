//! Error types for reporting-portal operations.
//!
//! - One variant per failure stage: session, query, decode, timeout, validation
//! - HTTP status codes stored directly (not parsed from strings)
//! - All errors include ErrorLocation for debugging
//! - `#[track_caller]` for automatic location capture
//!
//! Nothing here is retried by the client; the caller decides.

use crate::error::config::ConfigError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::time::Duration;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PortalClientError {
    /// The bootstrap page answered but set no session cookie.
    #[error(
        "Session Error: portal answered HTTP {status} without a session cookie (headers: {}) {location}",
        .header_names.join(", ")
    )]
    Session {
        status: HttpStatusCode,
        header_names: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Query Error: HTTP {status} - {body_prefix} {location}")]
    Query {
        status: HttpStatusCode,
        body_prefix: String,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Timeout Error: {stage} exceeded {timeout_secs}s {location}")]
    Timeout {
        stage: &'static str,
        timeout_secs: u64,
        location: ErrorLocation,
    },

    #[error("Validation Error: {dataset}: {reason} {location}")]
    Validation {
        dataset: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PortalClientError {
    #[track_caller]
    pub fn session(status: impl Into<HttpStatusCode>, header_names: Vec<String>) -> Self {
        PortalClientError::Session {
            status: status.into(),
            header_names,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn query(status: impl Into<HttpStatusCode>, body_prefix: impl Into<String>) -> Self {
        PortalClientError::Query {
            status: status.into(),
            body_prefix: body_prefix.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        PortalClientError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        PortalClientError::Validation {
            dataset: dataset.into(),
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Classify a transport failure, splitting deadline overruns from the rest.
    #[track_caller]
    pub fn transport(error: reqwest::Error, stage: &'static str, timeout: Duration) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if error.is_timeout() {
            PortalClientError::Timeout {
                stage,
                timeout_secs: timeout.as_secs(),
                location,
            }
        } else {
            PortalClientError::Http {
                message: format!("{stage}: {error}"),
                location,
            }
        }
    }

    /// Short machine-readable name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            PortalClientError::Session { .. } => "session",
            PortalClientError::Query { .. } => "query",
            PortalClientError::Decode { .. } => "decode",
            PortalClientError::Timeout { .. } => "timeout",
            PortalClientError::Validation { .. } => "validation",
            PortalClientError::Http { .. } => "http",
            PortalClientError::UrlParse { .. } => "url",
            PortalClientError::Config(_) => "config",
        }
    }
}

impl From<url::ParseError> for PortalClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        PortalClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for PortalClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        PortalClientError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for PortalClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        PortalClientError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
