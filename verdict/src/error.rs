use thiserror::Error;

/// Message reported when the `needs` context carries no jobs.
pub const EMPTY_MATRIX_MESSAGE: &str =
    "Invalid input jobs matrix, please provide a non-empty `needs` context";

#[derive(Error, Debug)]
pub enum VerdictError {
    #[error("{}", EMPTY_MATRIX_MESSAGE)]
    EmptyMatrix,

    #[error("Invalid jobs matrix: {message}")]
    InvalidJobs { message: String },
}

pub type VerdictResult<T> = Result<T, VerdictError>;
