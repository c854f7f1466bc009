use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resource not found")]
    NotFound,
    #[error("resource already exists ({0})")]
    Conflict(String),
    /// A row-level check constraint rejected the write; carries the constraint name.
    #[error("constraint violated ({0})")]
    Invalid(String),
    #[error("query timed out")]
    Timeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
