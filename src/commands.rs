//! CLI command definitions
//!
//! Defines the clap commands for the Foody suite.

use clap::{Args, Subcommand};

use crate::common::config::Overrides;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the food review CRUD suite
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Show method, path and timing for every step
        #[arg(long, short)]
        verbose: bool,

        /// Print the report as JSON instead of colored progress
        #[arg(long)]
        json: bool,
    },

    /// Authenticate only and report whether a token was issued
    Login {
        #[command(flatten)]
        target: TargetArgs,

        /// Print the issued token
        #[arg(long)]
        show_token: bool,
    },

    /// List the scenario steps in execution order
    Steps,

    /// Show the resolved configuration
    Config {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Service location and credentials, overriding the config file
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Base URL of the Foody API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Login username
    #[arg(long, short)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, short)]
    pub password: Option<String>,
}

impl From<TargetArgs> for Overrides {
    fn from(args: TargetArgs) -> Self {
        Self {
            base_url: args.base_url,
            username: args.username,
            password: args.password,
        }
    }
}
