//! CLI command handling
//!
//! Resolves configuration, dispatches commands and formats output.

use std::path::Path;

use colored::Colorize;

use crate::api::{authenticate, ApiClient};
use crate::commands::{Commands, TargetArgs};
use crate::common::config::Config;
use crate::common::paths::config_path;
use crate::common::{Error, Result};
use crate::scenario::{run_suite, RunOptions, FOOD_SCENARIO};

/// Load the config file (explicit path or the default location) and apply CLI overrides
pub fn resolve_config(path: Option<&Path>, target: TargetArgs) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config.with_overrides(target.into()))
}

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config_file: Option<&Path>) -> Result<()> {
    match command {
        Commands::Run {
            target,
            verbose,
            json,
        } => {
            let config = resolve_config(config_file, target)?;
            let report = run_suite(
                &config,
                RunOptions {
                    verbose,
                    quiet: json,
                },
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }

            if report.passed() {
                Ok(())
            } else {
                Err(Error::TestAssertion(format!(
                    "{} of {} steps failed",
                    report.failed_count(),
                    report.steps.len()
                )))
            }
        }

        Commands::Login { target, show_token } => {
            let config = resolve_config(config_file, target)?;
            let client = ApiClient::new(&config.server.base_url, config.timeouts.request())?;
            let token = authenticate(&client, &config.credentials, config.suite.missing_fields)
                .await?;

            if token.is_empty() {
                println!("{} No token issued for {}", "✗".red(), config.credentials.username);
                return Err(Error::TestAssertion(format!(
                    "No access token issued for '{}'",
                    config.credentials.username
                )));
            }

            println!(
                "{} Authenticated as {} ({} byte token)",
                "✓".green(),
                config.credentials.username,
                token.len()
            );
            if show_token {
                println!("{}", token);
            }

            Ok(())
        }

        Commands::Steps => {
            for (i, step) in FOOD_SCENARIO.iter().enumerate() {
                println!(
                    "{}. {:<40} {:<6} {} -> {}",
                    i + 1,
                    step.name(),
                    step.method().as_str(),
                    step.path_template(),
                    step.expected_status()
                );
            }
            Ok(())
        }

        Commands::Config { target } => {
            let config = resolve_config(config_file, target)?;

            match config_file.map(Path::to_path_buf).or_else(config_path) {
                Some(path) if path.exists() => println!("Config file: {}", path.display()),
                Some(path) => println!("Config file: {} (not found, using defaults)", path.display()),
                None => println!("Config file: none (using defaults)"),
            }
            println!();
            print!("{}", config.to_redacted_toml()?);

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_config_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"http://file:1\"\n").unwrap();

        let config = resolve_config(
            Some(path.as_path()),
            TargetArgs {
                base_url: None,
                username: Some("cli-user".to_string()),
                password: None,
            },
        )
        .unwrap();

        assert_eq!(config.server.base_url, "http://file:1");
        assert_eq!(config.credentials.username, "cli-user");
    }

    #[test]
    fn test_resolve_config_cli_url_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"http://file:1\"\n").unwrap();

        let config = resolve_config(
            Some(path.as_path()),
            TargetArgs {
                base_url: Some("http://cli:2".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(config.server.base_url, "http://cli:2");
    }
}
