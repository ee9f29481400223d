use crate::helpers::{
    bootstrap_path_regex, expected_cookie_header, mount_bootstrap, test_config,
};

use portal_client::config::{PortalEndpoints, ResourceFamily};
use portal_client::portal_client::http::build_http_client;
use portal_client::session::SessionManager;
use portal_client::PortalClientError;

use std::sync::Arc;

use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_manager(server: &MockServer) -> SessionManager {
    let config = test_config(server);
    let client = build_http_client(&config).expect("Failed to build HTTP client");
    let endpoints = PortalEndpoints::resolve(&config).expect("Failed to resolve endpoints");
    SessionManager::new(client, Arc::new(endpoints), config.timeout())
}

/// **VALUE**: Verifies the bootstrap GET produces a session carrying every cookie.
///
/// **WHY THIS MATTERS**: The query service rejects requests missing any of
/// the cookies the dashboard page set.
///
/// **BUG THIS CATCHES**: Would catch only the first Set-Cookie being kept,
/// or attributes leaking into the Cookie header.
#[tokio::test]
async fn given_bootstrap_sets_cookies_when_session_acquired_then_captures_all() {
    // GIVEN: Freight bootstrap page that sets two cookies
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Freight, 1).await;

    // WHEN: Acquiring a freight session
    let session = session_manager(&server)
        .acquire_session(ResourceFamily::Freight)
        .await
        .expect("Session should be acquired");

    // THEN: Cookie header holds both name=value pairs and the referer is the bootstrap page
    assert_eq!(session.family(), ResourceFamily::Freight);
    assert_eq!(
        session.cookie_header(),
        expected_cookie_header(ResourceFamily::Freight)
    );
    assert!(session.referer().as_str().contains("frete.wcdf/generatedContent"));
}

/// **VALUE**: Verifies a bootstrap without cookies is a SessionError that
/// reports the status and the headers actually received.
///
/// **WHY THIS MATTERS**: When the portal changes its login flow, the header
/// list is the only clue to what it sent instead.
///
/// **BUG THIS CATCHES**: Would catch a cookie-less "session" being returned
/// and every later query failing with an opaque error.
#[tokio::test]
async fn given_bootstrap_without_cookies_when_session_acquired_then_returns_session_error() {
    // GIVEN: Bootstrap page with no Set-Cookie
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(bootstrap_path_regex(ResourceFamily::Products)))
        .respond_with(ResponseTemplate::new(200).append_header("x-portal-node", "n1"))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Acquiring a products session
    let result = session_manager(&server)
        .acquire_session(ResourceFamily::Products)
        .await;

    // THEN: SessionError with status and header names
    match result {
        Err(PortalClientError::Session {
            status,
            header_names,
            ..
        }) => {
            assert_eq!(status.as_u16(), 200);
            assert!(
                header_names.iter().any(|name| name == "x-portal-node"),
                "Header names were {header_names:?}"
            );
        }
        other => panic!("Expected SessionError, got {other:?}"),
    }
}

/// **VALUE**: Verifies each acquisition performs its own bootstrap.
///
/// **WHY THIS MATTERS**: Sessions are never cached or shared between
/// logical requests.
///
/// **BUG THIS CATCHES**: Would catch a hidden session cache.
#[tokio::test]
async fn given_two_acquisitions_when_session_acquired_then_bootstraps_twice() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 2).await;
    let manager = session_manager(&server);

    let first = manager.acquire_session(ResourceFamily::Products).await;
    let second = manager.acquire_session(ResourceFamily::Products).await;

    assert!(first.is_ok() && second.is_ok());
}
