//! Foody E2E - end-to-end CRUD suite for the Foody food review API

use std::path::PathBuf;

use clap::Parser;
use foody::commands::Commands;
use foody::{cli, common::logging};

#[derive(Parser)]
#[command(name = "foody", about = "End-to-end suite for the Foody food review API")]
#[command(version, long_about = None)]
struct Cli {
    /// Path to a config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    logging::init_cli(verbose);

    if let Err(e) = cli::dispatch(cli.command, cli.config.as_deref()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
