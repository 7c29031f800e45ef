use clap::Parser;
use colored::*;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use talerts::{app, cli, errors};

/// Log filter variable; defaults to `warn` so command output stays clean.
const LOG_ENV: &str = "TALERTS_LOG";

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = cli::Cli::parse();
    if let Err(e) = app::App::run(cli.command).await {
        eprintln!("{} {}", "Error:".red().bold(), errors::format_error_chain(&e));
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
