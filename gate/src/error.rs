use ignore_revs::history::HistoryError;
use ignore_revs::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Malformed ignore list: {0}")]
    IgnoreList(#[from] ParseError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

pub type GateResult<T> = Result<T, GateError>;
