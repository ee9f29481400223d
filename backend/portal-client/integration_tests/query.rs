use crate::helpers::{
    QUERY_PATH, bootstrap_path_regex, cda_response, expected_cookie_header, mount_bootstrap,
    test_client,
};

use portal_client::config::{FamilyConfig, ResourceFamily};
use portal_client::{Cell, PortalClientError, Product};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the query POST replays the session and carries the
/// headers the portal checks, with a once-encoded body.
///
/// **WHY THIS MATTERS**: The CDA endpoint answers with a login page when
/// Cookie, Referer, X-Requested-With or Origin is missing.
///
/// **BUG THIS CATCHES**: Would catch a dropped header, the wrong session
/// cookie, or `[Produto].[MILHO]` sent raw or double-encoded.
#[tokio::test]
async fn given_price_table_query_when_executed_then_sends_portal_headers() {
    // GIVEN: Products bootstrap and a query mock that only matches a correct request
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 1).await;
    let referer = format!("{}{}", server.uri(), FamilyConfig::products().bootstrap_path);

    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(header(
            "content-type",
            "application/x-www-form-urlencoded; charset=UTF-8",
        ))
        .and(header(
            "cookie",
            expected_cookie_header(ResourceFamily::Products).as_str(),
        ))
        .and(header("referer", referer.as_str()))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(header("origin", server.uri().as_str()))
        .and(body_string_contains("path=%2Fhome%2FProdutos%2Fprodutos360.cda"))
        .and(body_string_contains("dataAccessId=ultimaSemanaPrecoProduto_new"))
        .and(body_string_contains("paramprodutoPreco=%5BProduto%5D.%5BMILHO%5D"))
        .respond_with(cda_response(json!({
            "metadata": [
                {"colIndex": 0, "colName": "UF", "colType": "String"},
                {"colIndex": 1, "colName": "Produto", "colType": "String"},
                {"colIndex": 2, "colName": "UF", "colType": "String"},
                {"colIndex": 3, "colName": "Preço", "colType": "Numeric"},
                {"colIndex": 4, "colName": "Data", "colType": "String"}
            ],
            "resultset": [
                ["SP", "MILHO", "SP", 75.5, "2025-08-04"],
                ["PR", "MILHO", "PR", 71.25, "2025-08-04"]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching the corn price table
    let table = test_client(&server)
        .price_table(Product::Corn)
        .await
        .expect("Price table should decode");

    // THEN: Duplicate UF dropped, trailing column dropped
    assert_eq!(table.column_names(), vec!["UF", "Produto", "Preço"]);
    assert_eq!(
        table.rows[1],
        vec![Cell::from("PR"), Cell::from("MILHO"), Cell::from(71.25)]
    );
}

/// **VALUE**: Verifies an HTTP error status becomes a QueryError with a body excerpt.
///
/// **WHY THIS MATTERS**: The portal's error pages explain which parameter
/// it disliked; callers need that text.
///
/// **BUG THIS CATCHES**: Would catch a 500 being decoded as data or
/// reported without status.
#[tokio::test]
async fn given_server_error_when_query_executed_then_returns_query_error() {
    // GIVEN: Query endpoint failing with 500
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 1).await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
        .mount(&server)
        .await;

    // WHEN: Fetching the price table
    let result = test_client(&server).price_table(Product::Soybean).await;

    // THEN: QueryError carries status and body
    match result {
        Err(PortalClientError::Query {
            status,
            body_prefix,
            ..
        }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body_prefix, "Internal error");
        }
        other => panic!("Expected QueryError, got {other:?}"),
    }
}

/// **VALUE**: Verifies a 200 response that is not JSON is a DecodeError.
///
/// **WHY THIS MATTERS**: An expired session yields the HTML login page with
/// HTTP 200; it must not look like an empty dataset.
///
/// **BUG THIS CATCHES**: Would catch HTML being treated as "no data".
#[tokio::test]
async fn given_html_body_when_query_executed_then_returns_decode_error() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 1).await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Login</html>"))
        .mount(&server)
        .await;

    let result = test_client(&server).price_table(Product::Soybean).await;

    assert!(
        matches!(result, Err(PortalClientError::Decode { .. })),
        "Expected DecodeError, got {result:?}"
    );
}

/// **VALUE**: Verifies a "no data" CDA answer decodes to an empty table.
///
/// **WHY THIS MATTERS**: The portal omits `metadata`/`resultset` when a
/// product has no rows; that is a normal answer.
///
/// **BUG THIS CATCHES**: Would catch "no data" being reported as a failure.
#[tokio::test]
async fn given_response_without_resultset_when_query_executed_then_returns_empty_table() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 1).await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(cda_response(json!({"queryInfo": {"totalRows": "0"}})))
        .mount(&server)
        .await;

    let table = test_client(&server)
        .price_table(Product::Wheat)
        .await
        .expect("Empty answer should decode");

    assert!(table.is_empty());
}

/// **VALUE**: Verifies slow calls fail with TimeoutError naming the stage.
///
/// **WHY THIS MATTERS**: The public portal stalls for minutes under load;
/// callers need a bounded failure they can tell apart from bad data.
///
/// **BUG THIS CATCHES**: Would catch a missing client timeout or timeouts
/// reported as generic HTTP errors.
#[tokio::test]
async fn given_slow_portal_when_fetching_then_returns_timeout_error() {
    // GIVEN: Bootstrap slower than the 1s deadline
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(bootstrap_path_regex(ResourceFamily::Products)))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "JSESSIONID=late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    // WHEN: Fetching anything from the products family
    let result = test_client(&server).price_table(Product::Corn).await;

    // THEN: TimeoutError at the bootstrap stage
    match result {
        Err(PortalClientError::Timeout {
            stage,
            timeout_secs,
            ..
        }) => {
            assert_eq!(stage, "session bootstrap");
            assert_eq!(timeout_secs, 1);
        }
        other => panic!("Expected TimeoutError, got {other:?}"),
    }
}

/// **VALUE**: Verifies the query stage is also bounded by the deadline.
///
/// **WHY THIS MATTERS**: Bootstrap is fast; it is the CDA query that stalls.
///
/// **BUG THIS CATCHES**: Would catch the deadline applying to the GET only.
#[tokio::test]
async fn given_slow_query_when_fetching_then_returns_query_stage_timeout() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 1).await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .respond_with(cda_response(json!({})).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let result = test_client(&server).price_table(Product::Corn).await;

    assert!(
        matches!(result, Err(PortalClientError::Timeout { stage: "query", .. })),
        "Expected query TimeoutError, got {result:?}"
    );
}
