//! Human-readable rendering of a [`Verdict`].
//!
//! The same entries feed two sinks: plain log lines for the job console and
//! GitHub-flavoured Markdown for the step summary.

use crate::error::EMPTY_MATRIX_MESSAGE;
use crate::evaluate::{JobStatus, Verdict};
use crate::types::JobResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    /// Headline decision about the required jobs.
    Decision(String),
    Info(String),
    StatusHeader,
    Status(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn for_verdict(verdict: &Verdict) -> Self {
        let mut entries = Vec::new();

        entries.push(ReportEntry::Decision(if verdict.succeeded {
            "🎉 All of the required dependency jobs succeeded.".to_string()
        } else {
            "😢 Some of the required to succeed jobs failed.".to_string()
        }));

        match verdict.allowed_failures_succeeded {
            Some(true) => entries.push(ReportEntry::Info(
                "🛈 All of the allowed to fail dependency jobs succeeded.".to_string(),
            )),
            Some(false) => entries.push(ReportEntry::Info(
                "🛈 Some of the allowed to fail jobs did not succeed.".to_string(),
            )),
            None => {}
        }

        match verdict.allowed_skips_succeeded {
            Some(true) => entries.push(ReportEntry::Info(
                "🛈 All of the allowed to be skipped dependency jobs succeeded.".to_string(),
            )),
            Some(false) => entries.push(ReportEntry::Info(
                "🛈 Some of the allowed to be skipped jobs did not succeed.".to_string(),
            )),
            None => {}
        }

        entries.push(ReportEntry::StatusHeader);
        entries.extend(verdict.statuses.iter().map(|s| ReportEntry::Status(status_line(s))));

        Self { entries }
    }

    /// Report for a `needs` context without any jobs.
    pub fn for_empty_matrix() -> Self {
        Self {
            entries: vec![ReportEntry::Decision(format!("❌ {}", EMPTY_MATRIX_MESSAGE))],
        }
    }

    /// Report for input that could not be parsed at all. Shares the
    /// empty-matrix heading; `detail` follows as an info line.
    pub fn for_invalid_input(detail: &str) -> Self {
        let mut report = Self::for_empty_matrix();
        report.entries.push(ReportEntry::Info(detail.to_string()));
        report
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Console lines, one per entry.
    pub fn log_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match entry {
                ReportEntry::Decision(text) | ReportEntry::Info(text) => text.clone(),
                ReportEntry::StatusHeader => "📝 Job statuses:".to_string(),
                ReportEntry::Status(text) => format!("📝 {}", text),
            })
            .collect()
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let mut in_list = false;

        for entry in &self.entries {
            match entry {
                ReportEntry::Decision(text) => {
                    out.push_str(&format!("# {}\n\n", text));
                }
                ReportEntry::Info(text) => {
                    out.push_str(&format!("{}\n\n", text));
                }
                ReportEntry::StatusHeader => {
                    out.push_str("## 📝 Job statuses\n\n");
                }
                ReportEntry::Status(text) => {
                    in_list = true;
                    out.push_str(&format!("- {}\n", text));
                }
            }
        }

        if in_list {
            out.push('\n');
        }
        out
    }
}

fn status_mark(result: &JobResult) -> &'static str {
    match result {
        JobResult::Success => "✓",
        JobResult::Skipped => "⬜",
        _ => "❌",
    }
}

/// `<name> → <mark> <result> [<policy>]`
pub fn status_line(status: &JobStatus) -> String {
    format!(
        "{} → {} {} [{}]",
        status.name,
        status_mark(&status.result),
        status.result,
        status.policy
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allow::AllowList;
    use crate::evaluate::evaluate;
    use crate::types::{Job, JobMatrix};

    fn sample_verdict() -> Verdict {
        let matrix = JobMatrix::new()
            .with_job("failing-job", Job::new("failure"))
            .with_job("succeeding-job", Job::new("success"))
            .with_job("skipped-job", Job::new("skipped"));
        evaluate(
            &matrix,
            &AllowList::parse(r#"["failing-job", "skipped-job"]"#),
            &AllowList::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_log_lines_follow_job_order() {
        let lines = Report::for_verdict(&sample_verdict()).log_lines();

        assert_eq!(
            lines,
            vec![
                "🎉 All of the required dependency jobs succeeded.",
                "🛈 Some of the allowed to fail jobs did not succeed.",
                "🛈 Some of the allowed to be skipped jobs did not succeed.",
                "📝 Job statuses:",
                "📝 failing-job → ❌ failure [allowed to fail]",
                "📝 succeeding-job → ✓ success [required to succeed]",
                "📝 skipped-job → ⬜ skipped [allowed to fail]",
            ]
        );
    }

    #[test]
    fn test_info_lines_omitted_without_allow_lists() {
        let matrix = JobMatrix::new().with_job("build", Job::new("success"));
        let verdict = evaluate(&matrix, &AllowList::new(), &AllowList::new()).unwrap();
        let report = Report::for_verdict(&verdict);

        assert!(!report
            .entries()
            .iter()
            .any(|e| matches!(e, ReportEntry::Info(_))));
    }

    #[test]
    fn test_markdown_layout() {
        let markdown = Report::for_verdict(&sample_verdict()).to_markdown();

        assert!(markdown.starts_with("# 🎉 All of the required dependency jobs succeeded.\n\n"));
        assert!(markdown.contains("## 📝 Job statuses\n\n"));
        assert!(markdown.contains("- succeeding-job → ✓ success [required to succeed]\n"));
        assert!(markdown.ends_with("[allowed to fail]\n\n"));
    }

    #[test]
    fn test_empty_matrix_report() {
        let report = Report::for_empty_matrix();
        assert_eq!(
            report.log_lines(),
            vec!["❌ Invalid input jobs matrix, please provide a non-empty `needs` context"]
        );
        assert!(report.to_markdown().starts_with("# ❌ Invalid input jobs matrix"));
    }

    #[test]
    fn test_invalid_input_report_keeps_empty_matrix_heading() {
        let report = Report::for_invalid_input("Invalid jobs matrix: expected value");
        assert_eq!(
            report.log_lines(),
            vec![
                "❌ Invalid input jobs matrix, please provide a non-empty `needs` context",
                "Invalid jobs matrix: expected value",
            ]
        );
        assert!(report.to_markdown().starts_with(
            "# ❌ Invalid input jobs matrix, please provide a non-empty `needs` context\n\n"
        ));
    }

    #[test]
    fn test_unknown_result_uses_failure_mark() {
        let status = JobStatus {
            name: "deploy".to_string(),
            result: JobResult::from("timed_out"),
            policy: crate::evaluate::JobPolicy::AllowedToBeSkipped,
        };
        assert_eq!(
            status_line(&status),
            "deploy → ❌ timed_out [allowed to be skipped]"
        );
    }
}
