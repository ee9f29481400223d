//! Named CDA datasets and the validated queries built for them.
//!
//! Dataset differences live here as data (family, required parameters,
//! column rule); the session and query code is shared.

pub mod builders;
pub mod dates;
pub mod product;

pub use crate::config::ResourceFamily;
pub use product::Product;

use crate::decoder::ColumnRule;
use crate::error::PortalClientError;
use crate::query::QueryParams;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const PARAM_PRODUCT: &str = "paramproduto";
pub const PARAM_CONJUNCTURE_DATE: &str = "paramdata_conjuntura";
pub const PARAM_PRICE_PRODUCT: &str = "paramprodutoPreco";
pub const PARAM_SOURCE: &str = "paramfonte";
pub const PARAM_ORIGIN: &str = "parammunicipioOrigem";
pub const PARAM_ORIGIN_QUERY: &str = "parammunicipioOrigemConsulta";
pub const PARAM_DESTINATION_QUERY: &str = "parammunicipioDestinoConsulta";
pub const PARAM_YEAR_START: &str = "paramanoInicio";
pub const PARAM_YEAR_END: &str = "paramanoFim";

/// Price-table column holding the state (UF) of each quote.
pub const PRICE_TABLE_UF_COLUMN: &str = "Regionalizacao.Regionalizacao";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dataset {
    Conjuncture,
    PriceTable,
    FreightOrigins,
    FreightDestinations,
    FreightLastYear,
    FreightRateTable,
    SupplyDemandChart,
    Exports,
    Imports,
    ProductionCostPeriods,
    ProductionCostPrice,
    StockSupplyDemand,
}

impl Dataset {
    pub const ALL: [Dataset; 12] = [
        Dataset::Conjuncture,
        Dataset::PriceTable,
        Dataset::FreightOrigins,
        Dataset::FreightDestinations,
        Dataset::FreightLastYear,
        Dataset::FreightRateTable,
        Dataset::SupplyDemandChart,
        Dataset::Exports,
        Dataset::Imports,
        Dataset::ProductionCostPeriods,
        Dataset::ProductionCostPrice,
        Dataset::StockSupplyDemand,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Dataset::Conjuncture => "conjuncture",
            Dataset::PriceTable => "price-table",
            Dataset::FreightOrigins => "freight-origins",
            Dataset::FreightDestinations => "freight-destinations",
            Dataset::FreightLastYear => "freight-last-year",
            Dataset::FreightRateTable => "freight-rate-table",
            Dataset::SupplyDemandChart => "supply-demand-chart",
            Dataset::Exports => "exports",
            Dataset::Imports => "imports",
            Dataset::ProductionCostPeriods => "production-cost-periods",
            Dataset::ProductionCostPrice => "production-cost-price",
            Dataset::StockSupplyDemand => "stock-supply-demand",
        }
    }

    pub const fn family(&self) -> ResourceFamily {
        match self {
            Dataset::FreightOrigins
            | Dataset::FreightDestinations
            | Dataset::FreightLastYear
            | Dataset::FreightRateTable => ResourceFamily::Freight,
            _ => ResourceFamily::Products,
        }
    }

    pub const fn column_rule(&self) -> ColumnRule {
        match self {
            Dataset::PriceTable => ColumnRule::DropTrailingColumn,
            _ => ColumnRule::FirstSeen,
        }
    }

    /// Whether the dataset answers with an image instead of CDA JSON.
    pub const fn is_image(&self) -> bool {
        matches!(self, Dataset::SupplyDemandChart)
    }

    pub const fn required_params(&self) -> &'static [&'static str] {
        match self {
            Dataset::Conjuncture => &[PARAM_PRODUCT, PARAM_CONJUNCTURE_DATE],
            Dataset::PriceTable => &[PARAM_PRICE_PRODUCT],
            Dataset::FreightOrigins => &[PARAM_SOURCE],
            Dataset::FreightDestinations => &[PARAM_ORIGIN, PARAM_SOURCE],
            Dataset::FreightLastYear => &[PARAM_ORIGIN_QUERY, PARAM_DESTINATION_QUERY],
            Dataset::FreightRateTable => &[
                PARAM_ORIGIN_QUERY,
                PARAM_DESTINATION_QUERY,
                PARAM_YEAR_START,
                PARAM_YEAR_END,
            ],
            Dataset::SupplyDemandChart
            | Dataset::Exports
            | Dataset::Imports
            | Dataset::ProductionCostPeriods
            | Dataset::ProductionCostPrice
            | Dataset::StockSupplyDemand => &[PARAM_PRODUCT],
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = PortalClientError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Dataset::ALL
            .into_iter()
            .find(|dataset| dataset.name() == wanted)
            .ok_or_else(|| PortalClientError::validation(value, "unknown dataset"))
    }
}

/// A dataset plus parameters that passed its required-parameter check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetQuery {
    dataset: Dataset,
    params: QueryParams,
}

impl DatasetQuery {
    /// # Errors
    ///
    /// Returns [`PortalClientError::Validation`] if a required parameter is
    /// missing or blank.
    #[track_caller]
    pub fn new(dataset: Dataset, params: QueryParams) -> Result<Self, PortalClientError> {
        if let Some(missing) = dataset
            .required_params()
            .iter()
            .find(|name| params.get(name).is_none_or(|value| value.trim().is_empty()))
        {
            return Err(PortalClientError::validation(
                dataset.name(),
                format!("missing required parameter '{missing}'"),
            ));
        }
        Ok(Self { dataset, params })
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

/// Outcome of a builder: a query to run, or a known-empty answer that
/// needs no network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    Execute(DatasetQuery),
    Empty(Dataset),
}

impl QueryPlan {
    pub fn dataset(&self) -> Dataset {
        match self {
            QueryPlan::Execute(query) => query.dataset(),
            QueryPlan::Empty(dataset) => *dataset,
        }
    }
}
