use agro_portal::cli::{Cli, Command};
use agro_portal::commands::{self, ChartOutput, save_chart};

use portal_client::{PortalConfig, Product, ReportingPortalClient, SupplyDemandChart};

use std::fs;

use clap::Parser;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Integration tests for CLI commands against a mock portal
// ============================================================================

const QUERY_PATH: &str = "/pentaho/plugin/cda/api/doQuery";

async fn mount_bootstrap(server: &MockServer, page: &str) {
    Mock::given(method("GET"))
        .and(path_regex(page))
        .respond_with(ResponseTemplate::new(200).append_header("set-cookie", "JSESSIONID=cli; Path=/"))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> ReportingPortalClient {
    ReportingPortalClient::new(PortalConfig {
        base_url: server.uri(),
        timeout_secs: 1,
        ..PortalConfig::default()
    })
    .expect("Failed to build portal client")
}

/// **VALUE**: Verifies `prices --uf` narrows the table to one state.
///
/// **WHY THIS MATTERS**: Farmers compare their own state's quote; the full
/// table has one row per UF.
///
/// **BUG THIS CATCHES**: Would catch filtering on the wrong column or a
/// case-sensitive UF match.
#[tokio::test]
async fn given_prices_with_uf_when_run_then_only_that_state_remains() {
    // GIVEN: Price table with two states
    let server = MockServer::start().await;
    mount_bootstrap(&server, r"produtos360\.wcdf/generatedContent$").await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("dataAccessId=ultimaSemanaPrecoProduto_new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": [
                {"colIndex": 0, "colName": "Regionalizacao.Regionalizacao"},
                {"colIndex": 1, "colName": "UltimoPrecoMedio"},
                {"colIndex": 2, "colName": "Regionalizacao.Regionalizacao"},
                {"colIndex": 3, "colName": "Extra"}
            ],
            "resultset": [
                ["SP", 75.5, "SP", 0],
                ["PR", 71.25, "PR", 0]
            ]
        })))
        .mount(&server)
        .await;

    // WHEN: Running prices for corn in lower-case "pr"
    let command = Command::Prices {
        product: Product::Corn,
        uf: Some("pr".to_string()),
    };
    let data = commands::run(&client_for(&server), &command).await.unwrap();

    // THEN: Only the PR row, trailing column dropped
    assert_eq!(data["resultset"], json!([["PR", 71.25]]));
    assert_eq!(data["metadata"][1]["colName"], "UltimoPrecoMedio");
}

/// **VALUE**: Verifies the estimate uses the latest data year and the mean per-ton rate.
///
/// **WHY THIS MATTERS**: Users rarely know which year has data for a route.
///
/// **BUG THIS CATCHES**: Would catch the estimate using R$/t·km without
/// distance, or the year lookup being skipped.
#[tokio::test]
async fn given_freight_estimate_without_year_when_run_then_uses_last_year() {
    // GIVEN: Freight portal answering the last-year and rate-table queries
    let server = MockServer::start().await;
    mount_bootstrap(&server, r"frete\.wcdf/generatedContent$").await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("dataAccessId=ultimoAnoComDado"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": [{"colIndex": 0, "colName": "ano"}],
            "resultset": [[2023]]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("dataAccessId=tabelaFretes"))
        .and(body_string_contains("paramanoInicio=2023"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": [
                {"colIndex": 0, "colName": "mes_referencia"},
                {"colIndex": 1, "colName": "fonte"},
                {"colIndex": 2, "colName": "distancia_em_km"},
                {"colIndex": 3, "colName": "vlr_tonelada_km"},
                {"colIndex": 4, "colName": "vlr_tonelada"}
            ],
            "resultset": [
                ["01/2023", "PESQUISA", 1000, 0.2, 200.0],
                ["02/2023", "PESQUISA", 1000, 0.3, 300.0]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Estimating 10 tons with no year
    let command = Command::FreightEstimate {
        origin: "SORRISO-MT".to_string(),
        destination: "SANTOS-SP".to_string(),
        tons: 10.0,
        year: None,
    };
    let data = commands::run(&client_for(&server), &command).await.unwrap();

    // THEN: 2023 rates, mean 250 R$/t
    assert_eq!(data["year"], 2023);
    assert_eq!(data["average_ton_rate"], 250.0);
    assert_eq!(data["estimated_cost"], 2500.0);
    assert_eq!(data["distance_km"], 1000.0);
}

/// **VALUE**: Verifies non-positive tonnage is rejected before any request.
///
/// **WHY THIS MATTERS**: A negative estimate is meaningless and wastes two
/// slow portal calls.
///
/// **BUG THIS CATCHES**: Would catch the check running after the fetch.
#[tokio::test]
async fn given_zero_tons_when_estimating_then_returns_usage_error_without_requests() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let command = Command::FreightEstimate {
        origin: "SORRISO-MT".to_string(),
        destination: "SANTOS-SP".to_string(),
        tons: 0.0,
        year: Some(2024),
    };
    let result = commands::run(&client_for(&server), &command).await;

    let err = result.err().expect("Zero tons must be rejected");
    assert_eq!(err.status().as_u16(), 400);
}

/// **VALUE**: Verifies the full path from config file to JSON envelope.
///
/// **WHY THIS MATTERS**: This is what the binary prints.
///
/// **BUG THIS CATCHES**: Would catch `--config` being ignored or upstream
/// failures reported as success.
#[tokio::test]
async fn given_config_file_and_failing_portal_when_executed_then_envelope_reports_502() {
    // GIVEN: Config file pointing at a portal that sets no cookie
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let temp = tempdir().unwrap();
    let config_path = temp.path().join("portal.toml");
    fs::write(
        &config_path,
        format!("base_url = \"{}\"\ntimeout_secs = 1\n", server.uri()),
    )
    .unwrap();

    // WHEN: Executing a parsed command line
    let cli = Cli::try_parse_from([
        "agro-portal",
        "--config",
        config_path.to_str().unwrap(),
        "freight-origins",
    ])
    .unwrap();
    let envelope = commands::execute(&cli).await;

    // THEN: Failure envelope with the session kind
    let json: serde_json::Value = serde_json::from_str(&envelope.to_json(false).unwrap()).unwrap();
    assert_eq!(json["ok"], false);
    assert_eq!(json["status"], 502);
    assert_eq!(json["error"]["data"]["kind"], "session");
}

/// **VALUE**: Verifies chart bytes land on disk and no-data writes nothing.
///
/// **WHY THIS MATTERS**: An empty or HTML file named `.png` confuses users.
///
/// **BUG THIS CATCHES**: Would catch a file created for `NoData`.
#[test]
fn given_chart_results_when_saved_then_only_images_are_written() {
    let temp = tempdir().unwrap();
    let image_path = temp.path().join("corn.png");
    let empty_path = temp.path().join("sorghum.png");

    let saved = save_chart(
        SupplyDemandChart::Image {
            content_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        },
        &image_path,
    )
    .unwrap();
    let skipped = save_chart(SupplyDemandChart::NoData, &empty_path).unwrap();

    assert_eq!(
        saved,
        ChartOutput::Saved {
            path: image_path.clone(),
            content_type: "image/png".to_string(),
            bytes: 4,
        }
    );
    assert_eq!(fs::read(&image_path).unwrap(), vec![0x89, b'P', b'N', b'G']);
    assert_eq!(skipped, ChartOutput::NoData);
    assert!(!empty_path.exists());
}
