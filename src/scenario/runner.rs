//! Suite runner
//!
//! Opens one authenticated session, runs every step in order against it,
//! and closes the session. A failing step is recorded and the run moves on.

use std::time::Instant;

use colored::Colorize;
use serde::Serialize;

use crate::api::Session;
use crate::common::config::{Config, MissingFieldPolicy};
use crate::common::Result;

use super::steps::{FoodStep, ScenarioContext, FOOD_SCENARIO};

/// Output options for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print method and path for every step
    pub verbose: bool,
    /// Print nothing to stdout
    pub quiet: bool,
}

/// Result of a single step
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    /// 1-based position in the scenario
    pub order: usize,
    pub step: FoodStep,
    pub name: String,
    pub passed: bool,
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// Result of a suite run
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub base_url: String,
    pub steps: Vec<StepOutcome>,
}

impl SuiteReport {
    /// Whether every step passed
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.passed)
    }

    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.passed).count()
    }

    /// Outcome of `step`, if it ran
    pub fn outcome(&self, step: FoodStep) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.step == step)
    }
}

/// Run the food review scenario against the configured service
///
/// Setup errors (transport failure or an unusable login response) abort the
/// run before any step executes.
pub async fn run_suite(config: &Config, options: RunOptions) -> Result<SuiteReport> {
    if !options.quiet {
        println!(
            "\n{} {}",
            "Running Suite:".blue().bold(),
            config.server.base_url.white().bold()
        );
    }

    let session = Session::open(config).await?;

    if !options.quiet {
        println!("  {} Authenticated as {}", "✓".green(), config.credentials.username);
    }

    let report = run_steps(
        &session,
        &FOOD_SCENARIO,
        config.suite.missing_fields,
        options,
    )
    .await;

    session.close();

    if !options.quiet {
        print_summary(&report);
    }

    Ok(report)
}

/// Run `steps` in the given order against an open session
pub async fn run_steps(
    session: &Session,
    steps: &[FoodStep],
    policy: MissingFieldPolicy,
    options: RunOptions,
) -> SuiteReport {
    let mut ctx = ScenarioContext::new(policy);
    let mut outcomes = Vec::with_capacity(steps.len());

    if !options.quiet {
        println!("\n{}", "Steps:".cyan());
    }

    for (i, step) in steps.iter().copied().enumerate() {
        let order = i + 1;
        let started = Instant::now();

        let result = step.execute(session.client(), &mut ctx).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = match result {
            Ok(()) => {
                tracing::info!(order, step = step.name(), "Step passed");
                StepOutcome {
                    order,
                    step,
                    name: step.name().to_string(),
                    passed: true,
                    error: None,
                    elapsed_ms,
                }
            }
            Err(e) => {
                tracing::warn!(order, step = step.name(), error = %e, "Step failed");
                StepOutcome {
                    order,
                    step,
                    name: step.name().to_string(),
                    passed: false,
                    error: Some(e.to_string()),
                    elapsed_ms,
                }
            }
        };

        if !options.quiet {
            print_outcome(step, &outcome, options.verbose);
        }
        outcomes.push(outcome);
    }

    SuiteReport {
        base_url: session.base_url().to_string(),
        steps: outcomes,
    }
}

fn print_outcome(step: FoodStep, outcome: &StepOutcome, verbose: bool) {
    if outcome.passed {
        println!(
            "  {} Step {}: {}",
            "✓".green(),
            outcome.order,
            outcome.name.dimmed()
        );
    } else {
        println!(
            "  {} Step {}: {}",
            "✗".red(),
            outcome.order,
            outcome.name
        );
        if let Some(error) = &outcome.error {
            println!("      {}", error.red());
        }
    }

    if verbose {
        println!(
            "      {} {} ({} ms)",
            step.method().as_str().dimmed(),
            step.path_template().dimmed(),
            outcome.elapsed_ms
        );
    }
}

fn print_summary(report: &SuiteReport) {
    if report.passed() {
        println!(
            "\n{} {}\n",
            "✓".green().bold(),
            "Suite Passed".green().bold()
        );
    } else {
        println!(
            "\n{} {}\n",
            "✗".red().bold(),
            format!(
                "Suite Failed: {} of {} steps failed",
                report.failed_count(),
                report.steps.len()
            )
            .red()
            .bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(step: FoodStep, order: usize, passed: bool) -> StepOutcome {
        StepOutcome {
            order,
            step,
            name: step.name().to_string(),
            passed,
            error: (!passed).then(|| "boom".to_string()),
            elapsed_ms: 1,
        }
    }

    #[test]
    fn test_report_counts_failures() {
        let report = SuiteReport {
            base_url: "http://localhost".to_string(),
            steps: vec![
                outcome(FoodStep::CreateFood, 1, true),
                outcome(FoodStep::EditFoodTitle, 2, false),
                outcome(FoodStep::ListFoods, 3, true),
            ],
        };
        assert!(!report.passed());
        assert_eq!(report.failed_count(), 1);
        assert!(!report.outcome(FoodStep::EditFoodTitle).unwrap().passed);
        assert!(report.outcome(FoodStep::DeleteFood).is_none());
    }

    #[test]
    fn test_report_serializes_step_ids() {
        let report = SuiteReport {
            base_url: "http://localhost".to_string(),
            steps: vec![outcome(FoodStep::DeleteMissingFood, 7, true)],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0]["step"], "delete_missing_food");
        assert_eq!(json["steps"][0]["order"], 7);
        assert!(json["steps"][0]["error"].is_null());
    }

    #[test]
    fn test_empty_report_passes() {
        let report = SuiteReport {
            base_url: String::new(),
            steps: Vec::new(),
        };
        assert!(report.passed());
    }
}
