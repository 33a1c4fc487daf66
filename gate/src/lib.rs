pub mod commands;
pub mod config;
pub mod error;
pub mod github;

pub use commands::{run_evaluate, run_lint_ignore_revs, EvaluateInputs};
pub use config::{GateConfig, OUTPUT_ENV, SUMMARY_ENV};
pub use error::{GateError, GateResult};
