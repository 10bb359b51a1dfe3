//! Food review CRUD scenario
//!
//! An explicit, ordered list of steps sharing one authenticated session and
//! a [`ScenarioContext`] that carries the created food's id forward.

mod runner;
mod steps;

pub use runner::{run_steps, run_suite, RunOptions, StepOutcome, SuiteReport};
pub use steps::*;
