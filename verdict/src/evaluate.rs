//! Verdict evaluation for a `needs` job matrix.

use crate::allow::AllowList;
use crate::error::{VerdictError, VerdictResult};
use crate::types::{JobMatrix, JobResult};
use std::fmt;
use tracing::debug;

/// How strictly a single job is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPolicy {
    RequiredToSucceed,
    AllowedToBeSkipped,
    /// Also implies the job may be skipped.
    AllowedToFail,
}

impl JobPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            JobPolicy::RequiredToSucceed => "required to succeed",
            JobPolicy::AllowedToBeSkipped => "allowed to be skipped",
            JobPolicy::AllowedToFail => "allowed to fail",
        }
    }

    /// Whether `result` is acceptable for a job under this policy.
    pub fn accepts(&self, result: &JobResult) -> bool {
        match self {
            JobPolicy::RequiredToSucceed => result.is_success(),
            JobPolicy::AllowedToBeSkipped => result.is_success_or_skipped(),
            JobPolicy::AllowedToFail => true,
        }
    }
}

impl fmt::Display for JobPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobStatus {
    pub name: String,
    pub result: JobResult,
    pub policy: JobPolicy,
}

impl JobStatus {
    pub fn is_acceptable(&self) -> bool {
        self.policy.accepts(&self.result)
    }
}

/// Outcome of evaluating a job matrix against the allow-lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub succeeded: bool,
    pub statuses: Vec<JobStatus>,
    /// `Some` only when at least one job is allowed to fail.
    pub allowed_failures_succeeded: Option<bool>,
    /// `Some` only when at least one job is allowed to be skipped.
    pub allowed_skips_succeeded: Option<bool>,
    /// Allow-list entries that name no job in the matrix.
    pub unknown_allowed: Vec<String>,
}

impl Verdict {
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.succeeded)
    }

    pub fn result_label(&self) -> &'static str {
        if self.succeeded {
            "success"
        } else {
            "failure"
        }
    }

    /// Step outputs in the order they are published.
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("failure", (!self.succeeded).to_string()),
            ("result", self.result_label().to_string()),
            ("success", self.succeeded.to_string()),
        ]
    }

    pub fn failed_jobs(&self) -> impl Iterator<Item = &JobStatus> {
        self.statuses.iter().filter(|status| !status.is_acceptable())
    }
}

/// Judge every job in `matrix`.
///
/// A job named in `allowed_failures` never affects the verdict. A job named
/// only in `allowed_skips` must be `success` or `skipped`. Every other job
/// must be `success`.
pub fn evaluate(
    matrix: &JobMatrix,
    allowed_failures: &AllowList,
    allowed_skips: &AllowList,
) -> VerdictResult<Verdict> {
    if matrix.is_empty() {
        return Err(VerdictError::EmptyMatrix);
    }

    let statuses: Vec<JobStatus> = matrix
        .iter()
        .map(|(name, job)| {
            let policy = if allowed_failures.contains(name) {
                JobPolicy::AllowedToFail
            } else if allowed_skips.contains(name) {
                JobPolicy::AllowedToBeSkipped
            } else {
                JobPolicy::RequiredToSucceed
            };
            JobStatus {
                name: name.to_string(),
                result: job.result.clone(),
                policy,
            }
        })
        .collect();

    let succeeded = statuses.iter().all(JobStatus::is_acceptable);

    let allowed_failures_succeeded = (!allowed_failures.is_empty()).then(|| {
        statuses
            .iter()
            .filter(|s| s.policy == JobPolicy::AllowedToFail)
            .all(|s| s.result.is_success())
    });

    let may_be_skipped =
        |name: &str| allowed_failures.contains(name) || allowed_skips.contains(name);
    let allowed_skips_succeeded =
        (!allowed_failures.is_empty() || !allowed_skips.is_empty()).then(|| {
            statuses
                .iter()
                .filter(|s| may_be_skipped(&s.name))
                .all(|s| s.result.is_success())
        });

    let mut unknown_allowed = Vec::new();
    for name in allowed_failures.iter().chain(allowed_skips.iter()) {
        if !matrix.contains(name) && !unknown_allowed.iter().any(|n| n == name) {
            unknown_allowed.push(name.to_string());
        }
    }

    debug!(jobs = statuses.len(), succeeded, "Evaluated job matrix");

    Ok(Verdict {
        succeeded,
        statuses,
        allowed_failures_succeeded,
        allowed_skips_succeeded,
        unknown_allowed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Job;

    fn matrix(jobs: &[(&str, &str)]) -> JobMatrix {
        jobs.iter()
            .fold(JobMatrix::new(), |m, (name, result)| {
                m.with_job(*name, Job::new(*result))
            })
    }

    #[test]
    fn test_empty_matrix_is_rejected() {
        let err = evaluate(&JobMatrix::new(), &AllowList::new(), &AllowList::new()).unwrap_err();
        assert!(matches!(err, VerdictError::EmptyMatrix));
        assert!(err.to_string().contains("Invalid input jobs matrix"));
    }

    #[test]
    fn test_all_required_jobs_succeed() {
        let m = matrix(&[("build", "success"), ("test", "success")]);
        let verdict = evaluate(&m, &AllowList::new(), &AllowList::new()).unwrap();

        assert!(verdict.succeeded);
        assert_eq!(verdict.exit_code(), 0);
        assert_eq!(verdict.allowed_failures_succeeded, None);
        assert_eq!(verdict.allowed_skips_succeeded, None);
        assert!(verdict
            .statuses
            .iter()
            .all(|s| s.policy == JobPolicy::RequiredToSucceed));
    }

    #[test]
    fn test_required_skip_fails_the_matrix() {
        let m = matrix(&[("build", "success"), ("publish", "skipped")]);
        let verdict = evaluate(&m, &AllowList::new(), &AllowList::new()).unwrap();

        assert!(!verdict.succeeded);
        assert_eq!(verdict.exit_code(), 1);
        let failed: Vec<&str> = verdict.failed_jobs().map(|s| s.name.as_str()).collect();
        assert_eq!(failed, vec!["publish"]);
    }

    #[test]
    fn test_cancelled_required_job_fails_the_matrix() {
        let m = matrix(&[("build", "cancelled")]);
        let verdict = evaluate(&m, &AllowList::new(), &AllowList::new()).unwrap();
        assert!(!verdict.succeeded);
    }

    #[test]
    fn test_allowed_skip_accepts_skipped_but_not_failure() {
        let skips = AllowList::parse("docs");

        let skipped = matrix(&[("build", "success"), ("docs", "skipped")]);
        let verdict = evaluate(&skipped, &AllowList::new(), &skips).unwrap();
        assert!(verdict.succeeded);
        assert_eq!(verdict.allowed_skips_succeeded, Some(false));
        assert_eq!(verdict.statuses[1].policy, JobPolicy::AllowedToBeSkipped);

        let failed = matrix(&[("build", "success"), ("docs", "failure")]);
        let verdict = evaluate(&failed, &AllowList::new(), &skips).unwrap();
        assert!(!verdict.succeeded);
    }

    #[test]
    fn test_allowed_failure_wins_over_allowed_skip() {
        let m = matrix(&[("flaky", "failure")]);
        let verdict = evaluate(&m, &AllowList::parse("flaky"), &AllowList::parse("flaky")).unwrap();

        assert!(verdict.succeeded);
        assert_eq!(verdict.statuses[0].policy, JobPolicy::AllowedToFail);
        assert_eq!(verdict.allowed_failures_succeeded, Some(false));
        assert_eq!(verdict.allowed_skips_succeeded, Some(false));
    }

    #[test]
    fn test_failure_permission_counts_towards_skip_report() {
        let m = matrix(&[("nightly", "failure"), ("build", "success")]);
        let verdict = evaluate(&m, &AllowList::parse("nightly"), &AllowList::new()).unwrap();

        assert!(verdict.succeeded);
        assert_eq!(verdict.allowed_skips_succeeded, Some(false));
    }

    #[test]
    fn test_outputs_are_lowercase_booleans() {
        let m = matrix(&[("build", "failure")]);
        let verdict = evaluate(&m, &AllowList::new(), &AllowList::new()).unwrap();

        assert_eq!(
            verdict.outputs(),
            vec![
                ("failure", "true".to_string()),
                ("result", "failure".to_string()),
                ("success", "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_allowed_names_are_collected() {
        let m = matrix(&[("build", "success")]);
        let verdict = evaluate(
            &m,
            &AllowList::parse("nightly, build"),
            &AllowList::parse("nightly, docs"),
        )
        .unwrap();

        assert_eq!(verdict.unknown_allowed, vec!["nightly", "docs"]);
    }

    #[test]
    fn test_unrecognised_result_is_not_success() {
        let m = matrix(&[("build", "timed_out")]);
        let verdict = evaluate(&m, &AllowList::new(), &AllowList::parse("build")).unwrap();
        assert!(!verdict.succeeded);
    }
}
