//! One pure builder per dataset.
//!
//! Builders validate caller input before any network call and return a
//! [`QueryPlan`]. Blank freight municipalities short-circuit to
//! [`QueryPlan::Empty`] instead of failing.

use crate::dataset::dates::{format_conjuncture_date, is_monday, last_full_week_monday};
use crate::dataset::{
    Dataset, DatasetQuery, PARAM_CONJUNCTURE_DATE, PARAM_DESTINATION_QUERY, PARAM_ORIGIN,
    PARAM_ORIGIN_QUERY, PARAM_PRICE_PRODUCT, PARAM_PRODUCT, PARAM_SOURCE, PARAM_YEAR_END,
    PARAM_YEAR_START, Product, QueryPlan,
};
use crate::error::PortalClientError;
use crate::query::QueryParams;

use std::ops::RangeInclusive;

use chrono::NaiveDate;

/// Freight sources the dashboards always filter on (survey + contract prices).
pub const FREIGHT_SOURCE_FILTER: &str = "[Fonte].[PESQUISA], [Fonte].[CONTRATO]";

pub const FREIGHT_YEARS: RangeInclusive<i32> = 1990..=2100;

const FIRST_MONTH: &str = "01";
const LAST_MONTH: &str = "12";

/// Market conjuncture commentary for one product and week.
///
/// `reference` must be a Monday; when absent, the Monday of the most
/// recently completed week before `today` is used.
#[track_caller]
pub fn conjuncture(
    product: Product,
    reference: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<QueryPlan, PortalClientError> {
    let date = reference.unwrap_or_else(|| last_full_week_monday(today));
    if !is_monday(date) {
        return Err(PortalClientError::validation(
            Dataset::Conjuncture.name(),
            format!("reference date {date} is not a Monday"),
        ));
    }

    let params = QueryParams::new()
        .with(PARAM_PRODUCT, product.portal_label())
        .with(PARAM_CONJUNCTURE_DATE, format_conjuncture_date(date));
    Ok(QueryPlan::Execute(DatasetQuery::new(Dataset::Conjuncture, params)?))
}

/// Latest weekly price table, one row per UF.
#[track_caller]
pub fn price_table(product: Product) -> Result<QueryPlan, PortalClientError> {
    let member = format!("[Produto].[{}]", product.price_label());
    let params = QueryParams::new().with(PARAM_PRICE_PRODUCT, member);
    Ok(QueryPlan::Execute(DatasetQuery::new(Dataset::PriceTable, params)?))
}

/// Exports, imports, production cost and stock datasets: product only.
#[track_caller]
pub fn product_dataset(dataset: Dataset, product: Product) -> Result<QueryPlan, PortalClientError> {
    match dataset {
        Dataset::Exports
        | Dataset::Imports
        | Dataset::ProductionCostPeriods
        | Dataset::ProductionCostPrice
        | Dataset::StockSupplyDemand
        | Dataset::SupplyDemandChart => {
            let params = QueryParams::new().with(PARAM_PRODUCT, product.portal_label());
            Ok(QueryPlan::Execute(DatasetQuery::new(dataset, params)?))
        }
        other => Err(PortalClientError::validation(
            other.name(),
            "not a product-only dataset",
        )),
    }
}

/// Server-rendered supply/demand chart for one product.
#[track_caller]
pub fn supply_demand_chart(product: Product) -> Result<QueryPlan, PortalClientError> {
    product_dataset(Dataset::SupplyDemandChart, product)
}

#[track_caller]
pub fn freight_origins() -> Result<QueryPlan, PortalClientError> {
    let params = QueryParams::new().with(PARAM_SOURCE, FREIGHT_SOURCE_FILTER);
    Ok(QueryPlan::Execute(DatasetQuery::new(Dataset::FreightOrigins, params)?))
}

#[track_caller]
pub fn freight_destinations(origin: &str) -> Result<QueryPlan, PortalClientError> {
    let origin = origin.trim();
    if origin.is_empty() {
        return Ok(QueryPlan::Empty(Dataset::FreightDestinations));
    }

    let params = QueryParams::new()
        .with(PARAM_ORIGIN, origin)
        .with(PARAM_SOURCE, FREIGHT_SOURCE_FILTER);
    Ok(QueryPlan::Execute(DatasetQuery::new(Dataset::FreightDestinations, params)?))
}

#[track_caller]
pub fn freight_last_year(origin: &str, destination: &str) -> Result<QueryPlan, PortalClientError> {
    let (origin, destination) = (origin.trim(), destination.trim());
    if origin.is_empty() || destination.is_empty() {
        return Ok(QueryPlan::Empty(Dataset::FreightLastYear));
    }

    let params = QueryParams::new()
        .with(PARAM_ORIGIN_QUERY, origin)
        .with(PARAM_DESTINATION_QUERY, destination)
        .with("paramorigemPreenchida", "1")
        .with("paramdestinoPreenchido", "1");
    Ok(QueryPlan::Execute(DatasetQuery::new(Dataset::FreightLastYear, params)?))
}

/// Monthly freight rates for a route over one full calendar year.
#[track_caller]
pub fn freight_rate_table(
    origin: &str,
    destination: &str,
    year: i32,
) -> Result<QueryPlan, PortalClientError> {
    if !FREIGHT_YEARS.contains(&year) {
        return Err(PortalClientError::validation(
            Dataset::FreightRateTable.name(),
            format!(
                "year {year} outside {}-{}",
                FREIGHT_YEARS.start(),
                FREIGHT_YEARS.end()
            ),
        ));
    }

    let year = year.to_string();
    let params = QueryParams::new()
        .with(PARAM_ORIGIN_QUERY, origin.trim())
        .with(PARAM_DESTINATION_QUERY, destination.trim())
        .with("paramtodosMunicipiosOrigem", "-")
        .with("paramtodosMunicipiosDestino", "-")
        .with("paramfonteConsulta", "1")
        .with(PARAM_YEAR_START, year.as_str())
        .with(PARAM_YEAR_END, year.as_str())
        .with("parammesInicio", FIRST_MONTH)
        .with("parammesFim", LAST_MONTH);
    Ok(QueryPlan::Execute(DatasetQuery::new(Dataset::FreightRateTable, params)?))
}
