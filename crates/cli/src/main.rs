use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod config;

use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    match args.command() {
        Command::Report(report_args) => {
            let as_of = report_args
                .as_of()
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            let report = commands::report(report_args.config(), as_of).await?;
            commands::print_json(&report)
        }
        Command::Parse(parse_args) => {
            let transactions =
                commands::parse(parse_args.config(), parse_args.dialect(), parse_args.file()).await?;
            commands::print_json(&transactions)
        }
    }
}

/// Logs go to stderr so stdout carries only JSON.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(level.to_string()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
