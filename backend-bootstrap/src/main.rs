use anyhow::Result;
use clap::Parser;

use backend_bootstrap::telemetry::init_tracing;
use backend_bootstrap::RunOptions;
use backend_infrastructure::{AppConfig, CONFIG_PATH_ENV};

#[derive(Parser, Debug)]
#[command(name = "statwatch")]
#[command(about = "Live NHL stat ingestor and read API", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Delete all stored players before watching starts
    #[arg(long)]
    clear_on_start: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_PATH_ENV, config);
    }

    let (config, source) = AppConfig::load().await?;
    let _log_guard = init_tracing(config.log_dir.as_deref());
    source.log();

    backend_bootstrap::run_standalone(
        config,
        RunOptions {
            clear_on_start: args.clear_on_start,
        },
    )
    .await
}
