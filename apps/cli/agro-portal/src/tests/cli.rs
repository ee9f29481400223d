// Unit tests for argument parsing and config resolution

use crate::cli::{Cli, Command, DEFAULT_CONFIG_PATH, resolve_config_path};

use portal_client::Product;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{CommandFactory, Parser};

/// **VALUE**: Verifies the clap definition is internally consistent.
///
/// **WHY THIS MATTERS**: Conflicting short flags only fail at runtime.
///
/// **BUG THIS CATCHES**: Would catch two args sharing `-c` or `-v`.
#[test]
fn given_cli_definition_when_asserted_then_is_valid() {
    Cli::command().debug_assert();
}

/// **VALUE**: Verifies products parse from portal labels and dates from ISO text.
///
/// **WHY THIS MATTERS**: Users type crop names in Portuguese as often as English.
///
/// **BUG THIS CATCHES**: Would catch the product parser not being wired to clap.
#[test]
fn given_conjuncture_args_when_parsed_then_builds_command() {
    let cli = Cli::try_parse_from(["agro-portal", "conjuncture", "café", "--date", "2025-07-28", "--pretty"])
        .unwrap();

    assert!(cli.pretty);
    assert_eq!(
        cli.command,
        Command::Conjuncture {
            product: Product::Coffee,
            date: NaiveDate::from_ymd_opt(2025, 7, 28),
        }
    );
}

/// **VALUE**: Verifies unknown products fail at parse time.
///
/// **WHY THIS MATTERS**: Catching typos before any network call keeps the
/// error next to the typo.
///
/// **BUG THIS CATCHES**: Would catch a permissive fallback product.
#[test]
fn given_unknown_product_when_parsed_then_returns_error() {
    let result = Cli::try_parse_from(["agro-portal", "prices", "banana"]);

    let message = result.err().expect("Unknown product must be rejected").to_string();
    assert!(message.contains("banana"), "Got {message}");
}

/// **VALUE**: Verifies the freight estimate arguments.
///
/// **WHY THIS MATTERS**: `--tons` is required; the year is optional.
///
/// **BUG THIS CATCHES**: Would catch a missing `--tons` defaulting to zero.
#[test]
fn given_freight_estimate_args_when_parsed_then_tons_required() {
    let parsed = Cli::try_parse_from([
        "agro-portal",
        "freight-estimate",
        "SORRISO-MT",
        "SANTOS-SP",
        "--tons",
        "37.5",
    ])
    .unwrap();
    let missing = Cli::try_parse_from(["agro-portal", "freight-estimate", "SORRISO-MT", "SANTOS-SP"]);

    assert_eq!(
        parsed.command,
        Command::FreightEstimate {
            origin: "SORRISO-MT".to_string(),
            destination: "SANTOS-SP".to_string(),
            tons: 37.5,
            year: None,
        }
    );
    assert!(missing.is_err());
}

/// **VALUE**: Verifies config path precedence.
///
/// **WHY THIS MATTERS**: Deployments point at their config via the
/// environment; an explicit flag must still win.
///
/// **BUG THIS CATCHES**: Would catch a blank variable overriding the default.
#[test]
fn given_config_sources_when_resolved_then_flag_beats_env_beats_default() {
    let flag = Path::new("/etc/agro/portal.toml");

    assert_eq!(
        resolve_config_path(Some(flag), Some("/env/portal.toml".to_string())),
        flag.to_path_buf()
    );
    assert_eq!(
        resolve_config_path(None, Some("/env/portal.toml".to_string())),
        PathBuf::from("/env/portal.toml")
    );
    assert_eq!(
        resolve_config_path(None, Some("  ".to_string())),
        PathBuf::from(DEFAULT_CONFIG_PATH)
    );
    assert_eq!(resolve_config_path(None, None), PathBuf::from(DEFAULT_CONFIG_PATH));
}
