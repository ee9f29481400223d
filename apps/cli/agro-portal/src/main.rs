use agro_portal::cli::Cli;
use agro_portal::commands;
use agro_portal::logger::initialize as LoggerInitialize;

use std::process::ExitCode;

use clap::Parser;
use log::info;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is normal
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = LoggerInitialize(cli.log_dir.as_deref(), cli.log_level()) {
        eprintln!("{e}");
    }
    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let envelope = commands::execute(&cli).await;

    match envelope.to_json(cli.pretty) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    if envelope.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
