//! Evaluation of a GitHub Actions `needs` context.
//!
//! Given the results of every job a gate depends on, plus the names that are
//! allowed to fail or be skipped, decide whether the gate passes and render
//! the explanation shown in the job log and step summary.

pub mod allow;
pub mod error;
pub mod evaluate;
pub mod report;
pub mod types;

pub use allow::AllowList;
pub use error::{VerdictError, VerdictResult, EMPTY_MATRIX_MESSAGE};
pub use evaluate::{evaluate, JobPolicy, JobStatus, Verdict};
pub use report::{status_line, Report, ReportEntry};
pub use types::{Job, JobMatrix, JobResult};

pub mod prelude {
    pub use crate::allow::*;
    pub use crate::error::*;
    pub use crate::evaluate::*;
    pub use crate::report::*;
    pub use crate::types::*;
}
