use crate::core::record::Record;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Provider returned code {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Ambiguous match: {0}")]
    AmbiguousMatch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Credential error: {0}")]
    Credential(String),
}

/// Failure of a batch operation.
///
/// Batches are applied one record at a time and stop at the first failure.
/// Mutations that already reached the provider are not rolled back; they are
/// returned in `applied` so the caller can re-derive its desired state.
#[derive(Error, Debug)]
#[error("{source} ({} record(s) applied before the failure)", .applied.len())]
pub struct BatchError {
    pub applied: Vec<Record>,
    pub source: Error,
}

impl BatchError {
    pub fn new(applied: Vec<Record>, source: impl Into<Error>) -> Self {
        Self {
            applied,
            source: source.into(),
        }
    }
}

impl From<Error> for BatchError {
    fn from(source: Error) -> Self {
        Self::new(Vec::new(), source)
    }
}
