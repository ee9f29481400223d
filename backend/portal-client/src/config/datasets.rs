use crate::dataset::Dataset;

use serde::{Deserialize, Serialize};

/// `dataAccessId` selector strings, one per tabular dataset.
///
/// Defaults are the values observed on the live portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatasetIds {
    pub conjuncture: String,
    pub price_table: String,
    pub exports: String,
    pub imports: String,
    pub production_cost_periods: String,
    pub production_cost_price: String,
    pub stock_supply_demand: String,
    pub freight_origins: String,
    pub freight_destinations: String,
    pub freight_last_year: String,
    pub freight_rate_table: String,
}

impl Default for DatasetIds {
    fn default() -> Self {
        Self {
            conjuncture: "conjuntura".to_string(),
            price_table: "ultimaSemanaPrecoProduto_new".to_string(),
            exports: "exportacao_new".to_string(),
            imports: "importacao".to_string(),
            production_cost_periods: "anoMesCustoProducao".to_string(),
            production_cost_price: "custoProducaoPreco".to_string(),
            stock_supply_demand: "estoqueOfertaDemandaSafra".to_string(),
            freight_origins: "municipioOrigem".to_string(),
            freight_destinations: "municipioDestino".to_string(),
            freight_last_year: "ultimoAnoComDado".to_string(),
            freight_rate_table: "tabelaFretes".to_string(),
        }
    }
}

impl DatasetIds {
    /// Selector for a tabular dataset. The chart is rendered by a script, not a CDA query.
    pub fn id_for(&self, dataset: Dataset) -> Option<&str> {
        let id = match dataset {
            Dataset::Conjuncture => &self.conjuncture,
            Dataset::PriceTable => &self.price_table,
            Dataset::Exports => &self.exports,
            Dataset::Imports => &self.imports,
            Dataset::ProductionCostPeriods => &self.production_cost_periods,
            Dataset::ProductionCostPrice => &self.production_cost_price,
            Dataset::StockSupplyDemand => &self.stock_supply_demand,
            Dataset::FreightOrigins => &self.freight_origins,
            Dataset::FreightDestinations => &self.freight_destinations,
            Dataset::FreightLastYear => &self.freight_last_year,
            Dataset::FreightRateTable => &self.freight_rate_table,
            Dataset::SupplyDemandChart => return None,
        };
        Some(id.as_str())
    }

    pub(crate) fn entries(&self) -> [(&'static str, &str); 11] {
        [
            ("conjuncture", self.conjuncture.as_str()),
            ("price_table", self.price_table.as_str()),
            ("exports", self.exports.as_str()),
            ("imports", self.imports.as_str()),
            ("production_cost_periods", self.production_cost_periods.as_str()),
            ("production_cost_price", self.production_cost_price.as_str()),
            ("stock_supply_demand", self.stock_supply_demand.as_str()),
            ("freight_origins", self.freight_origins.as_str()),
            ("freight_destinations", self.freight_destinations.as_str()),
            ("freight_last_year", self.freight_last_year.as_str()),
            ("freight_rate_table", self.freight_rate_table.as_str()),
        ]
    }
}
