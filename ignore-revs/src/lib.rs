//! Validation for `.git-blame-ignore-revs` files.
//!
//! The file lists full revision ids that `git blame --ignore-revs-file`
//! should skip. Entries are grouped into labeled blocks:
//!
//! ```text
//! # Formatting sweep START
//! 0123456789abcdef0123456789abcdef01234567  # black
//! # Formatting sweep END
//! ```

pub mod history;

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Length of a full SHA-1 revision id.
pub const HASH_LEN: usize = 40;

/// Structural errors that make the file unreadable as a whole.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: block `{label}` ends without a matching START")]
    UnopenedBlock { line: usize, label: String },

    #[error("line {line}: block `{label}` starts inside block `{open}`")]
    NestedBlock {
        line: usize,
        label: String,
        open: String,
    },

    #[error("line {line}: block `{label}` is closed as `{found}`")]
    MismatchedBlock {
        line: usize,
        label: String,
        found: String,
    },

    #[error("line {line}: block `{label}` is never closed")]
    UnterminatedBlock { line: usize, label: String },
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreEntry {
    /// 1-based line number in the source file.
    pub line: usize,
    pub hash: String,
    pub comment: Option<String>,
    pub block: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    InvalidLength { length: usize },
    NotHexadecimal,
    Duplicate { first_line: usize },
    UnknownCommit,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::InvalidLength { length } => write!(
                f,
                "revision id has {} characters, expected {}",
                length, HASH_LEN
            ),
            IssueKind::NotHexadecimal => f.write_str("revision id is not hexadecimal"),
            IssueKind::Duplicate { first_line } => {
                write!(f, "revision id already listed on line {}", first_line)
            }
            IssueKind::UnknownCommit => f.write_str("revision id names no commit in the repository"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub line: usize,
    pub hash: String,
    pub kind: IssueKind,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.line, self.kind, self.hash)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
        self.issues.sort_by_key(|issue| issue.line);
    }

    /// One `<path>:<line>: <message>` line per issue.
    pub fn render(&self, path: &str) -> Vec<String> {
        self.issues
            .iter()
            .map(|issue| format!("{}:{}", path, issue))
            .collect()
    }
}

fn is_hex(hash: &str) -> bool {
    !hash.is_empty() && hash.chars().all(|c| c.is_ascii_hexdigit())
}

/// Returns the block label for a `# <label> START` / `# <label> END` marker.
fn block_marker<'a>(comment: &'a str, keyword: &str) -> Option<&'a str> {
    let label = comment.strip_suffix(keyword)?;
    if !label.is_empty() && !label.ends_with(char::is_whitespace) {
        return None;
    }
    Some(label.trim())
}

/// A parsed blame-ignore list in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRevs {
    entries: Vec<IgnoreEntry>,
}

impl IgnoreRevs {
    pub fn parse(text: &str) -> ParseResult<Self> {
        let mut entries = Vec::new();
        let mut open: Option<(usize, String)> = None;

        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();

            if trimmed.is_empty() {
                continue;
            }

            if let Some(comment) = trimmed.strip_prefix('#') {
                let comment = comment.trim();

                if let Some(label) = block_marker(comment, "START") {
                    if let Some((_, current)) = &open {
                        return Err(ParseError::NestedBlock {
                            line,
                            label: label.to_string(),
                            open: current.clone(),
                        });
                    }
                    open = Some((line, label.to_string()));
                } else if let Some(label) = block_marker(comment, "END") {
                    match open.take() {
                        None => {
                            return Err(ParseError::UnopenedBlock {
                                line,
                                label: label.to_string(),
                            })
                        }
                        Some((_, current)) if current != label => {
                            return Err(ParseError::MismatchedBlock {
                                line,
                                label: current,
                                found: label.to_string(),
                            })
                        }
                        Some(_) => {}
                    }
                }
                continue;
            }

            let (hash, comment) = match trimmed.split_once('#') {
                Some((hash, comment)) => (hash.trim(), Some(comment.trim().to_string())),
                None => (trimmed, None),
            };

            entries.push(IgnoreEntry {
                line,
                hash: hash.to_string(),
                comment: comment.filter(|c| !c.is_empty()),
                block: open.as_ref().map(|(_, label)| label.clone()),
            });
        }

        if let Some((line, label)) = open {
            return Err(ParseError::UnterminatedBlock { line, label });
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[IgnoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose hash is a well-formed revision id.
    pub fn well_formed(&self) -> impl Iterator<Item = &IgnoreEntry> {
        self.entries
            .iter()
            .filter(|e| e.hash.chars().count() == HASH_LEN && is_hex(&e.hash))
    }

    /// Check shape and uniqueness of every entry.
    pub fn validate(&self) -> ValidationReport {
        let mut issues = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for entry in &self.entries {
            let length = entry.hash.chars().count();
            if length != HASH_LEN {
                issues.push(Issue {
                    line: entry.line,
                    hash: entry.hash.clone(),
                    kind: IssueKind::InvalidLength { length },
                });
            }

            if !is_hex(&entry.hash) {
                issues.push(Issue {
                    line: entry.line,
                    hash: entry.hash.clone(),
                    kind: IssueKind::NotHexadecimal,
                });
            }

            // git treats ids case-insensitively
            let key = entry.hash.to_ascii_lowercase();
            match seen.get(&key) {
                Some(&first_line) => issues.push(Issue {
                    line: entry.line,
                    hash: entry.hash.clone(),
                    kind: IssueKind::Duplicate { first_line },
                }),
                None => {
                    seen.insert(key, entry.line);
                }
            }
        }

        ValidationReport { issues }
    }
}
