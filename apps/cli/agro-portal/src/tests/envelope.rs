// Unit tests for the response envelope

use crate::envelope::ResponseEnvelope;
use crate::error::AgroPortalError;

use portal_client::PortalClientError;

use serde_json::json;

/// **VALUE**: Verifies a success prints `{ok, data, status}` with no error key.
///
/// **WHY THIS MATTERS**: Scripts test `ok` and read `data` without
/// checking for nulls.
///
/// **BUG THIS CATCHES**: Would catch `"error": null` leaking into success output.
#[test]
fn given_success_when_serialized_then_has_ok_data_status() {
    let envelope = ResponseEnvelope::success(json!({"rows": 2}));

    let json: serde_json::Value = serde_json::from_str(&envelope.to_json(false).unwrap()).unwrap();

    assert_eq!(json, json!({"ok": true, "data": {"rows": 2}, "status": 200}));
}

/// **VALUE**: Verifies a failure carries the mapped status and the error.
///
/// **WHY THIS MATTERS**: The status is how callers tell a timeout from bad input.
///
/// **BUG THIS CATCHES**: Would catch failures reported with status 200.
#[test]
fn given_query_failure_when_wrapped_then_status_is_bad_gateway() {
    let result: Result<serde_json::Value, AgroPortalError> =
        Err(PortalClientError::query(500u16, "Internal error").into());

    let envelope = ResponseEnvelope::from_result(result);
    let json: serde_json::Value = serde_json::from_str(&envelope.to_json(true).unwrap()).unwrap();

    assert!(!envelope.ok);
    assert_eq!(json["ok"], false);
    assert_eq!(json["status"], 502);
    assert!(json.get("data").is_none());
    assert_eq!(json["error"]["data"]["kind"], "query");
}
