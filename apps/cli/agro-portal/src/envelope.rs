use crate::error::AgroPortalError;

use common::HttpStatusCode;

use serde::Serialize;

/// JSON shape printed for every command: `{ok, data, status}` plus `error`
/// on failure.
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub status: HttpStatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AgroPortalError>,
}

impl<T: Serialize> ResponseEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            status: HttpStatusCode(200),
            error: None,
        }
    }

    pub fn failure(error: AgroPortalError) -> Self {
        Self {
            ok: false,
            data: None,
            status: error.status(),
            error: Some(error),
        }
    }

    pub fn from_result(result: Result<T, AgroPortalError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, AgroPortalError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        json.map_err(|e| AgroPortalError::output(format!("Failed to serialize response: {e}")))
    }
}
