//! Test helpers for portal integration tests.
//!
//! A wiremock server stands in for the reporting portal:
//! - Config pointing the client at the mock server
//! - Bootstrap pages that set session cookies
//! - CDA JSON bodies

use portal_client::config::ResourceFamily;
use portal_client::{PortalConfig, ReportingPortalClient};

use serde_json::Value;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const QUERY_PATH: &str = "/pentaho/plugin/cda/api/doQuery";
pub const CHART_PATH: &str = "/pentaho/plugin/cgg/api/services/draw";
pub const PRODUCTS_COOKIE: &str = "JSESSIONID=products-session";
pub const FREIGHT_COOKIE: &str = "JSESSIONID=freight-session";

/// Test helper: Config aimed at the mock server with a short deadline.
pub fn test_config(server: &MockServer) -> PortalConfig {
    PortalConfig {
        base_url: server.uri(),
        timeout_secs: 1,
        ..PortalConfig::default()
    }
}

pub fn test_client(server: &MockServer) -> ReportingPortalClient {
    ReportingPortalClient::new(test_config(server)).expect("Failed to build portal client")
}

/// Regex matching a family's default bootstrap page path.
pub fn bootstrap_path_regex(family: ResourceFamily) -> &'static str {
    match family {
        ResourceFamily::Products => r"produtos360\.wcdf/generatedContent$",
        ResourceFamily::Freight => r"frete\.wcdf/generatedContent$",
    }
}

pub fn session_cookie(family: ResourceFamily) -> &'static str {
    match family {
        ResourceFamily::Products => PRODUCTS_COOKIE,
        ResourceFamily::Freight => FREIGHT_COOKIE,
    }
}

/// Test helper: Mount a bootstrap page that sets the family cookie plus a
/// second, attribute-laden cookie. Expects exactly `calls` session bootstraps.
pub async fn mount_bootstrap(server: &MockServer, family: ResourceFamily, calls: u64) {
    Mock::given(method("GET"))
        .and(path_regex(bootstrap_path_regex(family)))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", format!("{}; Path=/pentaho; HttpOnly", session_cookie(family)))
                .append_header("set-cookie", "session-flushed=true; Path=/")
                .set_body_string("<html>dashboard</html>"),
        )
        .expect(calls)
        .mount(server)
        .await;
}

/// Cookie header the client should replay after [`mount_bootstrap`].
pub fn expected_cookie_header(family: ResourceFamily) -> String {
    format!("{}; session-flushed=true", session_cookie(family))
}

/// Test helper: CDA response body.
pub fn cda_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string().into_bytes(), "application/json")
}
