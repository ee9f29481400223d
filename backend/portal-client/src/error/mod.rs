pub mod config;
pub mod portal_client;

pub use config::ConfigError;
pub use portal_client::PortalClientError;
