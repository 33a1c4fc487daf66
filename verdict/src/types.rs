use crate::error::{VerdictError, VerdictResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The `result` reported for a job in the `needs` context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobResult {
    Success,
    Failure,
    Cancelled,
    Skipped,
    /// Anything GitHub may add later; kept verbatim.
    Other(String),
}

impl JobResult {
    pub fn as_str(&self) -> &str {
        match self {
            JobResult::Success => "success",
            JobResult::Failure => "failure",
            JobResult::Cancelled => "cancelled",
            JobResult::Skipped => "skipped",
            JobResult::Other(raw) => raw,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobResult::Success)
    }

    pub fn is_success_or_skipped(&self) -> bool {
        matches!(self, JobResult::Success | JobResult::Skipped)
    }
}

impl From<String> for JobResult {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "success" => JobResult::Success,
            "failure" => JobResult::Failure,
            "cancelled" => JobResult::Cancelled,
            "skipped" => JobResult::Skipped,
            _ => JobResult::Other(raw),
        }
    }
}

impl From<&str> for JobResult {
    fn from(raw: &str) -> Self {
        JobResult::from(raw.to_string())
    }
}

impl From<JobResult> for String {
    fn from(result: JobResult) -> Self {
        result.as_str().to_string()
    }
}

impl fmt::Display for JobResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub result: JobResult,
    #[serde(default)]
    pub outputs: Map<String, Value>,
}

impl Job {
    pub fn new(result: impl Into<JobResult>) -> Self {
        Self {
            result: result.into(),
            outputs: Map::new(),
        }
    }

    pub fn with_output(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.outputs.insert(name.into(), value.into());
        self
    }
}

/// Needed jobs in the order the workflow reported them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobMatrix {
    jobs: Vec<(String, Job)>,
}

impl JobMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON rendering of `toJSON(needs)`.
    ///
    /// `null` yields an empty matrix; emptiness is rejected later by
    /// [`crate::evaluate`] so callers can still report it.
    pub fn from_json(raw: &str) -> VerdictResult<Self> {
        let parsed: Option<Map<String, Value>> =
            serde_json::from_str(raw).map_err(|e| VerdictError::InvalidJobs {
                message: e.to_string(),
            })?;

        let mut matrix = Self::new();
        for (name, value) in parsed.unwrap_or_default() {
            let job: Job = serde_json::from_value(value).map_err(|e| VerdictError::InvalidJobs {
                message: format!("job `{}`: {}", name, e),
            })?;
            matrix.push(name, job);
        }

        Ok(matrix)
    }

    pub fn with_job(mut self, name: impl Into<String>, job: Job) -> Self {
        self.push(name, job);
        self
    }

    /// Insert a job, replacing an earlier entry of the same name in place.
    pub fn push(&mut self, name: impl Into<String>, job: Job) {
        let name = name.into();
        match self.jobs.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = job,
            None => self.jobs.push((name, job)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Job> {
        self.jobs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, job)| job)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Job)> {
        self.jobs.iter().map(|(name, job)| (name.as_str(), job))
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
