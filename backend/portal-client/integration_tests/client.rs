use crate::helpers::{
    CHART_PATH, QUERY_PATH, cda_response, expected_cookie_header, mount_bootstrap, test_client,
};

use portal_client::config::ResourceFamily;
use portal_client::portal_client::OVERVIEW_DATASETS;
use portal_client::{Dataset, Product, SupplyDemandChart};

use chrono::{Datelike, Local};
use serde_json::json;
use wiremock::matchers::{any, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies blank freight inputs never reach the network.
///
/// **WHY THIS MATTERS**: Forms call these on every keystroke; a blank
/// origin must answer instantly with nothing.
///
/// **BUG THIS CATCHES**: Would catch a bootstrap or query issued for an
/// empty plan.
#[tokio::test]
async fn given_blank_origin_when_listing_destinations_then_makes_no_requests() {
    // GIVEN: A portal that must not be called
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let client = test_client(&server);

    // WHEN: Using blank inputs
    let destinations = client.freight_destinations("  ").await.unwrap();
    let last_year = client.freight_last_year("", "SANTOS-SP").await.unwrap();

    // THEN: Empty answers, current-year fallback, zero requests
    assert!(destinations.is_empty());
    assert_eq!(last_year, Local::now().year());
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "Expected no requests, got {}", received.len());
}

/// **VALUE**: Verifies a route lookup goes through the freight session and
/// projects the rate table.
///
/// **WHY THIS MATTERS**: Freight uses its own bootstrap page and `.cda`
/// file; a products session returns nothing for freight queries.
///
/// **BUG THIS CATCHES**: Would catch the wrong family session or the
/// municipality parameters going out untrimmed.
#[tokio::test]
async fn given_route_when_fetching_freight_then_projects_rates() {
    // GIVEN: Freight bootstrap and a rate table
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Freight, 1).await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(header(
            "cookie",
            expected_cookie_header(ResourceFamily::Freight).as_str(),
        ))
        .and(body_string_contains("path=%2Fhome%2Ffrete%2Ffrete.cda"))
        .and(body_string_contains("dataAccessId=tabelaFretes"))
        .and(body_string_contains("parammunicipioOrigemConsulta=SORRISO-MT"))
        .and(body_string_contains("parammunicipioDestinoConsulta=SANTOS-SP"))
        .and(body_string_contains("paramanoInicio=2024"))
        .respond_with(cda_response(json!({
            "metadata": [
                {"colIndex": 0, "colName": "mes_referencia"},
                {"colIndex": 1, "colName": "fonte"},
                {"colIndex": 2, "colName": "origem"},
                {"colIndex": 3, "colName": "destino"},
                {"colIndex": 4, "colName": "distancia_em_km"},
                {"colIndex": 5, "colName": "vlr_tonelada_km"},
                {"colIndex": 6, "colName": "vlr_tonelada"}
            ],
            "resultset": [
                ["03/2024", "PESQUISA", "SORRISO-MT", "SANTOS-SP", 1950, 0.16, 312.0],
                ["04/2024", "PESQUISA", "SORRISO-MT", "SANTOS-SP", 1950, 0.18, 351.0]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching the route with padded input
    let route = test_client(&server)
        .freight_route(" SORRISO-MT ", "SANTOS-SP ", 2024)
        .await
        .expect("Route should decode");

    // THEN: Rows projected and names trimmed
    assert_eq!(route.origin, "SORRISO-MT");
    assert_eq!(route.destination, "SANTOS-SP");
    assert_eq!(route.distance_km, Some(1950.0));
    assert_eq!(route.rows.len(), 2);
    assert_eq!(route.rows[1].ton_rate, 351.0);
}

/// **VALUE**: Verifies origins are listed from the freight family.
///
/// **WHY THIS MATTERS**: This list seeds every freight form.
///
/// **BUG THIS CATCHES**: Would catch the source filter missing from the request.
#[tokio::test]
async fn given_origins_when_listed_then_returns_municipalities() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Freight, 1).await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("dataAccessId=municipioOrigem"))
        .and(body_string_contains("paramfonte=%5BFonte%5D.%5BPESQUISA%5D"))
        .respond_with(cda_response(json!({
            "metadata": [
                {"colIndex": 0, "colName": "[Municipio Origem].[MDX_UNIQUE_NAME]"},
                {"colIndex": 1, "colName": "[Municipio Origem].[MDX_CAPTION]"}
            ],
            "resultset": [
                ["[Municipio Origem].[SORRISO-MT]", "SORRISO-MT"],
                ["[Municipio Origem].[RIO VERDE-GO]", "RIO VERDE-GO"]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let origins = test_client(&server).freight_origins().await.unwrap();

    let names: Vec<&str> = origins.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["SORRISO-MT", "RIO VERDE-GO"]);
}

/// **VALUE**: Verifies the overview runs every dataset on one session.
///
/// **WHY THIS MATTERS**: Six bootstraps per overview would multiply load on
/// a slow public portal.
///
/// **BUG THIS CATCHES**: Would catch a session per query, or datasets
/// missing from the result map.
#[tokio::test]
async fn given_product_when_fetching_overview_then_uses_single_session() {
    // GIVEN: One products bootstrap and a generic CDA answer
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 1).await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("paramproduto=MILHO"))
        .respond_with(cda_response(json!({
            "metadata": [{"colIndex": 0, "colName": "valor"}],
            "resultset": [[1]]
        })))
        .expect(OVERVIEW_DATASETS.len() as u64)
        .mount(&server)
        .await;

    // WHEN: Fetching the corn overview
    let overview = test_client(&server)
        .product_overview(Product::Corn, None)
        .await
        .expect("Overview should load");

    // THEN: One result per dataset
    assert_eq!(overview.len(), OVERVIEW_DATASETS.len());
    assert!(overview.contains_key(&Dataset::Conjuncture));
    assert!(overview.contains_key(&Dataset::StockSupplyDemand));
}

/// **VALUE**: Verifies the renderer's no-data page maps to `NoData`.
///
/// **WHY THIS MATTERS**: Most minor crops have no supply/demand chart.
///
/// **BUG THIS CATCHES**: Would catch HTML saved as an image.
#[tokio::test]
async fn given_no_chart_when_fetching_chart_then_returns_no_data() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 1).await;
    Mock::given(method("POST"))
        .and(path(CHART_PATH))
        .and(body_string_contains("script=%2Fhome%2FProdutos%2FofertaDemanda.js"))
        .and(body_string_contains("paramproduto=SORGO"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>No Data Found</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let chart = test_client(&server)
        .supply_demand_chart(Product::Sorghum)
        .await
        .unwrap();

    assert_eq!(chart, SupplyDemandChart::NoData);
}

/// **VALUE**: Verifies image bytes come back unchanged.
///
/// **WHY THIS MATTERS**: Callers write the bytes straight to a file.
///
/// **BUG THIS CATCHES**: Would catch bytes lost to text decoding.
#[tokio::test]
async fn given_chart_image_when_fetching_chart_then_returns_bytes() {
    let server = MockServer::start().await;
    mount_bootstrap(&server, ResourceFamily::Products, 1).await;
    let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0xFF, 0x00];
    Mock::given(method("POST"))
        .and(path(CHART_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png.clone(), "image/png"))
        .mount(&server)
        .await;

    let chart = test_client(&server)
        .supply_demand_chart(Product::Soybean)
        .await
        .unwrap();

    assert_eq!(
        chart,
        SupplyDemandChart::Image {
            content_type: "image/png".to_string(),
            bytes: png,
        }
    );
}
