mod client;
mod config;
mod errors;
mod loader;
mod models;
mod report;
mod sql;

use std::process::ExitCode;

use env_logger::Env;

use crate::client::ClickHouseClient;
use crate::config::LoaderConfig;
use crate::errors::LoaderError;
use crate::loader::Loader;

const USAGE: &str = "Usage: nyc_taxi_loader [row_limit]";

/// The only argument is an optional row limit for test loads.
fn parse_limit(args: &[String]) -> Result<Option<u64>, LoaderError> {
    match args {
        [] => Ok(None),
        [limit] => limit
            .parse::<u64>()
            .map(Some)
            .map_err(|_| LoaderError::Validation(USAGE.to_string())),
        _ => Err(LoaderError::Validation(USAGE.to_string())),
    }
}

/// Printed on stderr so it survives `RUST_LOG=off`.
fn failure_line(e: &LoaderError) -> String {
    format!("Load failed: {}", e)
}

async fn run(limit: Option<u64>) -> Result<(), LoaderError> {
    let cfg = LoaderConfig::new()?;
    let client = ClickHouseClient::new(&cfg.url(), &cfg.user, &cfg.password);
    let loader = Loader::new(client, cfg);

    let report = loader.run(limit).await?;
    println!("\n{}", report::render(&report));
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    println!("{}", report::banner());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let limit = match parse_limit(&args) {
        Ok(limit) => limit,
        Err(_) => {
            println!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };
    if let Some(n) = limit {
        println!("\nLimiting load to {} rows (test mode)", report::group_thousands(n));
    }

    match run(limit).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_line(&e));
            ExitCode::FAILURE
        }
    }
}
