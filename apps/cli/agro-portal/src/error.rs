use common::{ErrorLocation, HttpStatusCode};

use portal_client::PortalClientError;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the command-line front end.
///
/// Serialized into the `error` field of the response envelope, so every
/// variant keeps structured data and its location.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum AgroPortalError {
    /// Error from this app (startup, logger)
    #[error("Agro Portal Error: {message} {location}")]
    AgroPortal {
        message: String,
        location: ErrorLocation,
    },

    /// Command-line input the portal client would reject anyway
    #[error("Usage Error: {message} {location}")]
    Usage {
        message: String,
        location: ErrorLocation,
    },

    /// Error from portal-client operations; `kind` is the client's failure class
    #[error("Portal Error: {message} {location}")]
    Portal {
        kind: String,
        message: String,
        location: ErrorLocation,
    },

    /// Result could not be written or serialized
    #[error("Output Error: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },
}

impl AgroPortalError {
    #[track_caller]
    pub fn usage(message: impl Into<String>) -> Self {
        AgroPortalError::Usage {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn output(message: impl Into<String>) -> Self {
        AgroPortalError::Output {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP-style status reported in the response envelope.
    pub fn status(&self) -> HttpStatusCode {
        match self {
            AgroPortalError::Usage { .. } => HttpStatusCode(400),
            AgroPortalError::Portal { kind, .. } => status_for_portal_kind(kind),
            AgroPortalError::AgroPortal { .. } | AgroPortalError::Output { .. } => {
                HttpStatusCode(500)
            }
        }
    }
}

/// Caller mistakes are 400, upstream failures 502/504, local setup 500.
pub fn status_for_portal_kind(kind: &str) -> HttpStatusCode {
    match kind {
        "validation" => HttpStatusCode(400),
        "timeout" => HttpStatusCode(504),
        "session" | "query" | "decode" | "http" => HttpStatusCode(502),
        _ => HttpStatusCode(500),
    }
}

impl From<PortalClientError> for AgroPortalError {
    #[track_caller]
    fn from(error: PortalClientError) -> Self {
        AgroPortalError::Portal {
            kind: error.kind().to_string(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
