//! Foody E2E - end-to-end CRUD suite for the Foody food review API
//!
//! Authenticates once against the remote service, then runs a fixed,
//! ordered sequence of create, edit, list and delete checks, including
//! negative-path validation, and reports pass/fail per step.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use scenario::{run_suite, FoodStep, RunOptions, SuiteReport, FOOD_SCENARIO};
