pub mod http;

use crate::chart::{SupplyDemandChart, decode_chart};
use crate::config::{PortalConfig, PortalEndpoints};
use crate::dataset::{Dataset, DatasetQuery, Product, QueryPlan, builders};
use crate::decoder::{TabularResult, decode};
use crate::error::PortalClientError;
use crate::freight::{self, FreightRoute, Municipality};
use crate::query::{QueryExecutor, QueryParams};
use crate::session::{Session, SessionManager};

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use log::{debug, info};

/// Datasets fetched together for a product overview, in request order.
pub const OVERVIEW_DATASETS: [Dataset; 6] = [
    Dataset::Conjuncture,
    Dataset::Exports,
    Dataset::Imports,
    Dataset::ProductionCostPeriods,
    Dataset::ProductionCostPrice,
    Dataset::StockSupplyDemand,
];

/// Client for the reporting portal's CDA query service.
///
/// Every public call acquires its own session and runs its queries
/// sequentially on it. Independent calls may run concurrently.
#[derive(Clone)]
pub struct ReportingPortalClient {
    config: Arc<PortalConfig>,
    sessions: SessionManager,
    executor: QueryExecutor,
}

impl ReportingPortalClient {
    pub fn new(config: PortalConfig) -> Result<Self, PortalClientError> {
        config.validate()?;

        let client = http::build_http_client(&config)?;
        let endpoints = Arc::new(PortalEndpoints::resolve(&config)?);
        let timeout = config.timeout();

        Ok(Self {
            sessions: SessionManager::new(client.clone(), endpoints.clone(), timeout),
            executor: QueryExecutor::new(client, endpoints, timeout),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Run a tabular plan: acquire a session, query, decode.
    ///
    /// [`QueryPlan::Empty`] returns an empty result without touching the network.
    pub async fn fetch(&self, plan: QueryPlan) -> Result<TabularResult, PortalClientError> {
        let query = match plan {
            QueryPlan::Execute(query) => query,
            QueryPlan::Empty(dataset) => {
                debug!("{dataset}: blank input, skipping portal call");
                return Ok(TabularResult::empty());
            }
        };

        let session = self.sessions.acquire_session(query.dataset().family()).await?;
        self.fetch_with(&session, &query).await
    }

    /// Run one tabular query on an existing session of the matching family.
    pub async fn fetch_with(
        &self,
        session: &Session,
        query: &DatasetQuery,
    ) -> Result<TabularResult, PortalClientError> {
        let dataset = query.dataset();
        if dataset.family() != session.family() {
            return Err(PortalClientError::validation(
                dataset.name(),
                format!(
                    "needs a {} session, got {}",
                    dataset.family(),
                    session.family()
                ),
            ));
        }
        let Some(data_access_id) = self.config.datasets.id_for(dataset) else {
            return Err(PortalClientError::validation(
                dataset.name(),
                "image dataset, use supply_demand_chart",
            ));
        };

        let response = self
            .executor
            .execute_query(session, data_access_id, query.params())
            .await?;
        let result = decode(&response.body, dataset.column_rule())?;

        info!(
            "{dataset}: {} rows x {} columns",
            result.rows.len(),
            result.columns.len()
        );
        Ok(result)
    }

    pub async fn conjuncture(
        &self,
        product: Product,
        reference: Option<NaiveDate>,
    ) -> Result<TabularResult, PortalClientError> {
        self.fetch(builders::conjuncture(product, reference, today())?)
            .await
    }

    pub async fn price_table(&self, product: Product) -> Result<TabularResult, PortalClientError> {
        self.fetch(builders::price_table(product)?).await
    }

    /// Conjuncture plus the trade, cost and stock datasets, on one session.
    pub async fn product_overview(
        &self,
        product: Product,
        reference: Option<NaiveDate>,
    ) -> Result<BTreeMap<Dataset, TabularResult>, PortalClientError> {
        let mut plans = Vec::with_capacity(OVERVIEW_DATASETS.len());
        for dataset in OVERVIEW_DATASETS {
            let plan = match dataset {
                Dataset::Conjuncture => builders::conjuncture(product, reference, today())?,
                other => builders::product_dataset(other, product)?,
            };
            plans.push(plan);
        }

        let session = self
            .sessions
            .acquire_session(Dataset::Conjuncture.family())
            .await?;

        let mut overview = BTreeMap::new();
        for plan in plans {
            if let QueryPlan::Execute(query) = plan {
                let result = self.fetch_with(&session, &query).await?;
                overview.insert(query.dataset(), result);
            }
        }
        Ok(overview)
    }

    pub async fn freight_origins(&self) -> Result<Vec<Municipality>, PortalClientError> {
        let table = self.fetch(builders::freight_origins()?).await?;
        Ok(Municipality::list_from(&table))
    }

    pub async fn freight_destinations(
        &self,
        origin: &str,
    ) -> Result<Vec<Municipality>, PortalClientError> {
        let table = self.fetch(builders::freight_destinations(origin)?).await?;
        Ok(Municipality::list_from(&table))
    }

    /// Latest year with freight data for the route; the current year when
    /// the portal has none or either end is blank.
    pub async fn freight_last_year(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<i32, PortalClientError> {
        let table = self
            .fetch(builders::freight_last_year(origin, destination)?)
            .await?;
        Ok(freight::last_year_or(&table, today().year()))
    }

    pub async fn freight_rate_table(
        &self,
        origin: &str,
        destination: &str,
        year: i32,
    ) -> Result<TabularResult, PortalClientError> {
        self.fetch(builders::freight_rate_table(origin, destination, year)?)
            .await
    }

    pub async fn freight_route(
        &self,
        origin: &str,
        destination: &str,
        year: i32,
    ) -> Result<FreightRoute, PortalClientError> {
        let table = self.freight_rate_table(origin, destination, year).await?;
        FreightRoute::from_table(origin.trim(), destination.trim(), year, &table)
    }

    pub async fn supply_demand_chart(
        &self,
        product: Product,
    ) -> Result<SupplyDemandChart, PortalClientError> {
        let QueryPlan::Execute(query) = builders::supply_demand_chart(product)? else {
            return Ok(SupplyDemandChart::NoData);
        };

        let mut params = QueryParams::new()
            .with("script", self.config.chart.script.as_str())
            .with("outputType", self.config.chart.output_type.as_str());
        params.extend(query.params());

        let session = self.sessions.acquire_session(query.dataset().family()).await?;
        let response = self.executor.execute_chart(&session, &params).await?;
        let chart = decode_chart(response);

        if chart.is_no_data() {
            info!("{}: no chart for {product}", query.dataset());
        }
        Ok(chart)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
