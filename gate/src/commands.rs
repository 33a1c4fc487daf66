//! The work behind each CLI subcommand, kept free of process globals so it
//! can be driven from tests.

use crate::config::GateConfig;
use crate::error::{GateError, GateResult};
use crate::github::{write_outputs, write_summary};
use ignore_revs::history::verify_in_repository;
use ignore_revs::IgnoreRevs;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{error, info, warn};
use verdict::{evaluate, AllowList, JobMatrix, Report, VerdictError};

/// Raw action inputs for the `evaluate` subcommand.
#[derive(Debug, Clone, Default)]
pub struct EvaluateInputs {
    pub allowed_failures: String,
    pub allowed_skips: String,
    pub jobs: String,
}

impl EvaluateInputs {
    pub fn new(jobs: impl Into<String>) -> Self {
        Self {
            jobs: jobs.into(),
            ..Self::default()
        }
    }

    pub fn with_allowed_failures(mut self, raw: impl Into<String>) -> Self {
        self.allowed_failures = raw.into();
        self
    }

    pub fn with_allowed_skips(mut self, raw: impl Into<String>) -> Self {
        self.allowed_skips = raw.into();
        self
    }
}

fn emit(report: &Report, config: &GateConfig, console: &mut impl Write) -> GateResult<()> {
    for line in report.log_lines() {
        writeln!(console, "{}", line)?;
    }
    write_summary(config.summary_path(), &report.to_markdown())
}

/// Evaluate the matrix, publish outputs and summary, and return the process
/// exit code.
///
/// Invalid input is reported through the summary and yields exit code 1
/// without publishing any outputs.
pub fn run_evaluate(
    config: &GateConfig,
    inputs: &EvaluateInputs,
    console: &mut impl Write,
    stdout: &mut impl Write,
) -> GateResult<u8> {
    config
        .validate()
        .map_err(|message| GateError::InvalidConfig { message })?;

    let allowed_failures = AllowList::parse(&inputs.allowed_failures);
    let allowed_skips = AllowList::parse(&inputs.allowed_skips);

    let verdict = match JobMatrix::from_json(&inputs.jobs)
        .and_then(|matrix| evaluate(&matrix, &allowed_failures, &allowed_skips))
    {
        Ok(verdict) => verdict,
        Err(VerdictError::EmptyMatrix) => {
            error!("Received an empty jobs matrix");
            emit(&Report::for_empty_matrix(), config, console)?;
            return Ok(1);
        }
        Err(e) => {
            error!("Could not read jobs matrix: {}", e);
            emit(&Report::for_invalid_input(&e.to_string()), config, console)?;
            return Ok(1);
        }
    };

    for name in &verdict.unknown_allowed {
        warn!(job = %name, "Allow-listed job is not part of the needs context");
    }

    write_outputs(config.output_path(), &verdict.outputs(), stdout)?;
    emit(&Report::for_verdict(&verdict), config, console)?;

    info!(
        result = verdict.result_label(),
        jobs = verdict.statuses.len(),
        "Job matrix evaluated"
    );

    Ok(verdict.exit_code())
}

/// Validate a blame-ignore list, optionally against the history of
/// `repo`. Returns 0 when no issues are found.
pub fn run_lint_ignore_revs(
    file: &Path,
    repo: Option<&Path>,
    console: &mut impl Write,
) -> GateResult<u8> {
    let text = fs::read_to_string(file).map_err(|source| GateError::Read {
        path: file.display().to_string(),
        source,
    })?;

    let revs = IgnoreRevs::parse(&text)?;
    let mut report = revs.validate();

    if let Some(repo) = repo {
        report.extend(verify_in_repository(&revs, repo)?);
    }

    let display = file.display().to_string();
    for line in report.render(&display) {
        writeln!(console, "{}", line)?;
    }

    if report.is_clean() {
        info!(entries = revs.len(), "Ignore list is valid");
        Ok(0)
    } else {
        warn!(issues = report.issues.len(), "Ignore list has problems");
        Ok(1)
    }
}
