use portal_client::Product;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::LevelFilter;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "AGRO_PORTAL_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "config/portal.toml";

#[derive(Parser, Debug)]
#[command(
    name = "agro-portal",
    version,
    about = "Query CONAB's agricultural reporting portal: market conjuncture, prices, freight rates"
)]
pub struct Cli {
    /// Path to portal configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Also write logs to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log request flow at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Weekly market commentary for a product
    Conjuncture {
        #[arg(value_parser = parse_product)]
        product: Product,
        /// Monday of the week (YYYY-MM-DD); defaults to last completed week
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Latest weekly price table, optionally narrowed to one state
    Prices {
        #[arg(value_parser = parse_product)]
        product: Product,
        /// Two-letter state code, e.g. SP
        #[arg(long)]
        uf: Option<String>,
    },

    /// Conjuncture, trade, production cost and stock datasets together
    Overview {
        #[arg(value_parser = parse_product)]
        product: Product,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Municipalities with freight data as origin
    FreightOrigins,

    /// Destinations reachable from an origin
    FreightDestinations { origin: String },

    /// Latest year with freight data for a route
    FreightLastYear { origin: String, destination: String },

    /// Monthly freight rates for a route
    FreightTable {
        origin: String,
        destination: String,
        /// Defaults to the latest year with data
        #[arg(long)]
        year: Option<i32>,
    },

    /// Estimated haul cost for a route at the year's mean per-ton rate
    FreightEstimate {
        origin: String,
        destination: String,
        #[arg(long)]
        tons: f64,
        #[arg(long)]
        year: Option<i32>,
    },

    /// Save the supply/demand chart image
    Chart {
        #[arg(value_parser = parse_product)]
        product: Product,
        /// Output file for the image
        #[arg(long)]
        out: PathBuf,
    },
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        crate::logger::level_for(self.verbose)
    }
}

fn parse_product(value: &str) -> Result<Product, String> {
    value.parse::<Product>().map_err(|_| {
        let known: Vec<&str> = Product::ALL.iter().map(Product::english_name).collect();
        format!("unknown product '{value}' (expected one of: {})", known.join(", "))
    })
}

/// Config file to load: `--config`, then `AGRO_PORTAL_CONFIG`, then the default.
pub fn resolve_config_path(explicit: Option<&Path>, env_value: Option<String>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
