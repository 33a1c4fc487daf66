use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the file that collects step outputs.
pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";
/// Environment variable naming the file rendered as the job summary.
pub const SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateConfig {
    pub output_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
}

impl GateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the runner-provided file locations. Unset or blank variables
    /// leave the corresponding sink disabled.
    pub fn from_env() -> Self {
        Self {
            output_path: path_from_env(OUTPUT_ENV),
            summary_path: path_from_env(SUMMARY_ENV),
        }
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_summary_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.summary_path = Some(path.into());
        self
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn summary_path(&self) -> Option<&Path> {
        self.summary_path.as_deref()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self
            .output_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err("Output path cannot be empty".to_string());
        }

        if self
            .summary_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err("Summary path cannot be empty".to_string());
        }

        if let (Some(output), Some(summary)) = (&self.output_path, &self.summary_path) {
            if output == summary {
                return Err("Output and summary must be written to different files".to_string());
            }
        }

        Ok(())
    }
}

fn path_from_env(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
