//! Command dispatch: one portal-client call per subcommand, result as JSON.

use crate::cli::{Cli, Command, resolve_config_path};
use crate::envelope::ResponseEnvelope;
use crate::error::AgroPortalError;

use portal_client::dataset::PRICE_TABLE_UF_COLUMN;
use portal_client::{
    FreightRoute, PortalClientError, PortalConfig, ReportingPortalClient, SupplyDemandChart,
};

use std::path::{Path, PathBuf};

use log::{debug, error, info};
use serde::Serialize;
use serde_json::Value;

/// Freight cost estimate for one route and year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreightEstimate {
    pub origin: String,
    pub destination: String,
    pub year: i32,
    pub tons: f64,
    pub distance_km: Option<f64>,
    pub average_ton_rate: Option<f64>,
    pub average_ton_rate_km: Option<f64>,
    /// `None` when the route has no rates for the year.
    pub estimated_cost: Option<f64>,
}

impl FreightEstimate {
    pub fn from_route(route: &FreightRoute, tons: f64) -> Self {
        Self {
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            year: route.year,
            tons,
            distance_km: route.distance_km,
            average_ton_rate: route.average_ton_rate(),
            average_ton_rate_km: route.average_ton_rate_km(),
            estimated_cost: route.estimate_cost(tons),
        }
    }
}

/// Where a chart image ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartOutput {
    NoData,
    Saved {
        path: PathBuf,
        content_type: String,
        bytes: usize,
    },
}

/// Load config, build the client and run the parsed command.
pub async fn execute(cli: &Cli) -> ResponseEnvelope<Value> {
    let env_config = std::env::var(crate::cli::CONFIG_ENV_VAR).ok();
    let config_path = resolve_config_path(cli.config.as_deref(), env_config);

    let result = load_and_run(&config_path, &cli.command).await;

    if let Err(e) = &result {
        error!("Command failed: {e}");
    }
    ResponseEnvelope::from_result(result)
}

async fn load_and_run(config_path: &Path, command: &Command) -> Result<Value, AgroPortalError> {
    let config = PortalConfig::load(config_path).map_err(PortalClientError::from)?;
    let client = ReportingPortalClient::new(config)?;
    run(&client, command).await
}

/// Run one command against an existing client.
pub async fn run(client: &ReportingPortalClient, command: &Command) -> Result<Value, AgroPortalError> {
    debug!("Running {command:?}");

    match command {
        Command::Conjuncture { product, date } => {
            to_value(&client.conjuncture(*product, *date).await?)
        }
        Command::Prices { product, uf } => {
            let table = client.price_table(*product).await?;
            let table = match uf {
                Some(uf) => table.filter_rows(PRICE_TABLE_UF_COLUMN, uf.trim().to_uppercase().as_str()),
                None => table,
            };
            info!("{product}: {} price rows", table.rows.len());
            to_value(&table)
        }
        Command::Overview { product, date } => {
            to_value(&client.product_overview(*product, *date).await?)
        }
        Command::FreightOrigins => to_value(&client.freight_origins().await?),
        Command::FreightDestinations { origin } => {
            to_value(&client.freight_destinations(origin).await?)
        }
        Command::FreightLastYear {
            origin,
            destination,
        } => to_value(&client.freight_last_year(origin, destination).await?),
        Command::FreightTable {
            origin,
            destination,
            year,
        } => {
            let year = route_year(client, origin, destination, *year).await?;
            to_value(&client.freight_route(origin, destination, year).await?)
        }
        Command::FreightEstimate {
            origin,
            destination,
            tons,
            year,
        } => {
            if !tons.is_finite() || *tons <= 0.0 {
                return Err(AgroPortalError::usage(format!(
                    "tons must be a positive number, got {tons}"
                )));
            }
            let year = route_year(client, origin, destination, *year).await?;
            let route = client.freight_route(origin, destination, year).await?;
            to_value(&FreightEstimate::from_route(&route, *tons))
        }
        Command::Chart { product, out } => {
            let chart = client.supply_demand_chart(*product).await?;
            to_value(&save_chart(chart, out)?)
        }
    }
}

async fn route_year(
    client: &ReportingPortalClient,
    origin: &str,
    destination: &str,
    year: Option<i32>,
) -> Result<i32, AgroPortalError> {
    match year {
        Some(year) => Ok(year),
        None => Ok(client.freight_last_year(origin, destination).await?),
    }
}

/// Write chart bytes to `out`; nothing is written for `NoData`.
pub fn save_chart(chart: SupplyDemandChart, out: &Path) -> Result<ChartOutput, AgroPortalError> {
    match chart {
        SupplyDemandChart::NoData => Ok(ChartOutput::NoData),
        SupplyDemandChart::Image {
            content_type,
            bytes,
        } => {
            std::fs::write(out, &bytes).map_err(|e| {
                AgroPortalError::output(format!("Failed to write {}: {e}", out.display()))
            })?;
            info!("Chart saved to {} ({} bytes)", out.display(), bytes.len());
            Ok(ChartOutput::Saved {
                path: out.to_path_buf(),
                content_type,
                bytes: bytes.len(),
            })
        }
    }
}

fn to_value<T: Serialize>(data: &T) -> Result<Value, AgroPortalError> {
    serde_json::to_value(data)
        .map_err(|e| AgroPortalError::output(format!("Failed to serialize result: {e}")))
}
