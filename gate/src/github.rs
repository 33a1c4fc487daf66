//! Writers for the GitHub Actions runner files.

use crate::error::{GateError, GateResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

fn append(path: &Path, contents: &str) -> GateResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| GateError::Write {
            path: path.display().to_string(),
            source,
        })?;

    file.write_all(contents.as_bytes())
        .map_err(|source| GateError::Write {
            path: path.display().to_string(),
            source,
        })
}

/// Render outputs in the `name=value` form the runner expects.
pub fn format_outputs<K: AsRef<str>, V: AsRef<str>>(outputs: &[(K, V)]) -> String {
    outputs
        .iter()
        .map(|(name, value)| format!("{}={}\n", name.as_ref(), value.as_ref()))
        .collect()
}

/// Append step outputs to `path`, or to `fallback` when no output file is
/// configured (local runs).
pub fn write_outputs<K: AsRef<str>, V: AsRef<str>>(
    path: Option<&Path>,
    outputs: &[(K, V)],
    fallback: &mut impl Write,
) -> GateResult<()> {
    let rendered = format_outputs(outputs);
    match path {
        Some(path) => {
            debug!(path = %path.display(), count = outputs.len(), "Writing step outputs");
            append(path, &rendered)
        }
        None => Ok(fallback.write_all(rendered.as_bytes())?),
    }
}

/// Append Markdown to the step summary, if the runner provides one.
pub fn write_summary(path: Option<&Path>, markdown: &str) -> GateResult<()> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Writing step summary");
            append(path, markdown)
        }
        None => {
            debug!("No step summary file configured; skipping summary");
            Ok(())
        }
    }
}
