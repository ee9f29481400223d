//! Client for the agricultural reporting portal's undocumented CDA query service.
//!
//! A call acquires a cookie session from a family's bootstrap page, posts a
//! form-encoded query with that session, and decodes the columnar answer.

pub mod chart;
pub mod config;
pub mod dataset;
pub mod decoder;
pub mod error;
pub mod freight;
pub mod portal_client;
pub mod query;
pub mod session;

#[cfg(test)]
mod tests;

pub use chart::SupplyDemandChart;
pub use config::{PortalConfig, ResourceFamily};
pub use dataset::{Dataset, DatasetQuery, Product, QueryPlan};
pub use decoder::{Cell, Column, TabularResult};
pub use error::{ConfigError, PortalClientError};
pub use freight::{FreightRateRow, FreightRoute, Municipality};
pub use portal_client::ReportingPortalClient;
pub use session::Session;

pub const PORTAL_HOSTNAME: &str = "pentahoportaldeinformacoes.conab.gov.br";
pub const PORTAL_BASE_URL: &str = const_format::concatcp!("https://", PORTAL_HOSTNAME);
