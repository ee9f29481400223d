// Unit tests for dataset builders and parameter validation

use crate::dataset::builders::{
    self, FREIGHT_SOURCE_FILTER, freight_destinations, freight_last_year, freight_rate_table,
    price_table,
};
use crate::dataset::{
    Dataset, DatasetQuery, PARAM_CONJUNCTURE_DATE, PARAM_ORIGIN, PARAM_PRICE_PRODUCT,
    PARAM_PRODUCT, PARAM_SOURCE, Product, QueryPlan, ResourceFamily,
};
use crate::decoder::ColumnRule;
use crate::error::PortalClientError;
use crate::query::QueryParams;

use chrono::NaiveDate;

fn executed(plan: QueryPlan) -> DatasetQuery {
    match plan {
        QueryPlan::Execute(query) => query,
        QueryPlan::Empty(dataset) => panic!("Expected a query for {dataset}, got Empty"),
    }
}

/// **VALUE**: Verifies rice is sent under its price-table label, as an OLAP member.
///
/// **WHY THIS MATTERS**: The price cube has no plain "ARROZ" member; the
/// untranslated label silently returns zero rows.
///
/// **BUG THIS CATCHES**: Would catch the override table being skipped.
#[test]
fn given_rice_when_price_table_built_then_uses_translated_member() {
    let query = executed(price_table(Product::Rice).unwrap());

    assert_eq!(query.dataset(), Dataset::PriceTable);
    assert_eq!(
        query.params().get(PARAM_PRICE_PRODUCT),
        Some("[Produto].[ARROZ LONGO FINO EM CASCA]")
    );
}

/// **VALUE**: Verifies corn passes through unchanged.
///
/// **WHY THIS MATTERS**: Only listed products are translated.
///
/// **BUG THIS CATCHES**: Would catch a translation applied to every product.
#[test]
fn given_corn_when_price_table_built_then_uses_plain_label() {
    let query = executed(price_table(Product::Corn).unwrap());

    assert_eq!(query.params().get(PARAM_PRICE_PRODUCT), Some("[Produto].[MILHO]"));
}

/// **VALUE**: Verifies blank freight inputs short-circuit instead of querying.
///
/// **WHY THIS MATTERS**: The dashboards fire these queries while the user
/// is still picking an origin; a blank origin must cost no network call.
///
/// **BUG THIS CATCHES**: Would catch a query sent with an empty member.
#[test]
fn given_blank_origin_when_freight_builders_called_then_plan_is_empty() {
    assert_eq!(
        freight_destinations("   ").unwrap(),
        QueryPlan::Empty(Dataset::FreightDestinations)
    );
    assert_eq!(
        freight_last_year("", "RIO DE JANEIRO-RJ").unwrap(),
        QueryPlan::Empty(Dataset::FreightLastYear)
    );
    assert_eq!(
        freight_last_year("SORRISO-MT", " ").unwrap(),
        QueryPlan::Empty(Dataset::FreightLastYear)
    );
}

/// **VALUE**: Verifies the destination query carries the trimmed origin and
/// the fixed source filter.
///
/// **WHY THIS MATTERS**: Without the source filter the portal mixes in
/// freight sources the dashboards never show.
///
/// **BUG THIS CATCHES**: Would catch untrimmed input or a dropped filter.
#[test]
fn given_origin_when_destinations_built_then_includes_source_filter() {
    let query = executed(freight_destinations(" SORRISO-MT ").unwrap());

    assert_eq!(query.params().get(PARAM_ORIGIN), Some("SORRISO-MT"));
    assert_eq!(query.params().get(PARAM_SOURCE), Some(FREIGHT_SOURCE_FILTER));
    assert_eq!(query.dataset().family(), ResourceFamily::Freight);
}

/// **VALUE**: Verifies a missing required parameter is a ValidationError.
///
/// **WHY THIS MATTERS**: The portal answers a missing parameter with an
/// empty result, indistinguishable from "no data".
///
/// **BUG THIS CATCHES**: Would catch blank values passing the check.
#[test]
fn given_missing_or_blank_param_when_query_created_then_returns_validation_error() {
    let missing = DatasetQuery::new(Dataset::Conjuncture, QueryParams::new().with(PARAM_PRODUCT, "SOJA"));
    let blank = DatasetQuery::new(
        Dataset::Conjuncture,
        QueryParams::new()
            .with(PARAM_PRODUCT, "SOJA")
            .with(PARAM_CONJUNCTURE_DATE, " "),
    );

    for result in [missing, blank] {
        match result {
            Err(PortalClientError::Validation { dataset, reason, .. }) => {
                assert_eq!(dataset, "conjuncture");
                assert!(reason.contains(PARAM_CONJUNCTURE_DATE), "Reason was {reason}");
            }
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies the conjuncture date defaults to last week's Monday
/// and rejects explicit non-Mondays.
///
/// **WHY THIS MATTERS**: Conjuncture rows are keyed by week start; any other
/// day returns nothing.
///
/// **BUG THIS CATCHES**: Would catch an unchecked caller-supplied date.
#[test]
fn given_conjuncture_dates_when_built_then_defaults_and_validates() {
    let thursday = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();

    let defaulted = executed(builders::conjuncture(Product::Soybean, None, thursday).unwrap());
    let rejected = builders::conjuncture(Product::Soybean, Some(thursday), thursday);

    assert_eq!(defaulted.params().get(PARAM_CONJUNCTURE_DATE), Some("2025-07-28"));
    assert_eq!(defaulted.params().get(PARAM_PRODUCT), Some("SOJA"));
    assert!(matches!(rejected, Err(PortalClientError::Validation { .. })));
}

/// **VALUE**: Verifies the rate table spans one full calendar year and
/// rejects years outside the supported range.
///
/// **WHY THIS MATTERS**: A half-open month range drops December.
///
/// **BUG THIS CATCHES**: Would catch an unvalidated year reaching the portal.
#[test]
fn given_year_when_rate_table_built_then_covers_whole_year() {
    let query = executed(freight_rate_table("SORRISO-MT", "SANTOS-SP", 2024).unwrap());

    assert_eq!(query.params().get("paramanoInicio"), Some("2024"));
    assert_eq!(query.params().get("paramanoFim"), Some("2024"));
    assert_eq!(query.params().get("parammesInicio"), Some("01"));
    assert_eq!(query.params().get("parammesFim"), Some("12"));

    assert!(matches!(
        freight_rate_table("SORRISO-MT", "SANTOS-SP", 1900),
        Err(PortalClientError::Validation { .. })
    ));
}

/// **VALUE**: Verifies per-dataset metadata: family, column rule and names.
///
/// **WHY THIS MATTERS**: A dataset in the wrong family is queried with the
/// wrong session and `.cda` file.
///
/// **BUG THIS CATCHES**: Would catch the trailing-column rule leaking to
/// other datasets, or names that do not round-trip through `FromStr`.
#[test]
fn given_every_dataset_when_inspected_then_metadata_is_consistent() {
    for dataset in Dataset::ALL {
        assert_eq!(dataset.name().parse::<Dataset>().unwrap(), dataset);
        let expected_rule = if dataset == Dataset::PriceTable {
            ColumnRule::DropTrailingColumn
        } else {
            ColumnRule::FirstSeen
        };
        assert_eq!(dataset.column_rule(), expected_rule, "{dataset}");
        assert!(!dataset.required_params().is_empty(), "{dataset}");
    }

    assert_eq!(Dataset::FreightRateTable.family(), ResourceFamily::Freight);
    assert_eq!(Dataset::StockSupplyDemand.family(), ResourceFamily::Products);
    assert!(Dataset::SupplyDemandChart.is_image());
    assert!(builders::product_dataset(Dataset::PriceTable, Product::Corn).is_err());
}
