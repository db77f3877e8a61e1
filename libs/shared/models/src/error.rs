use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failures reported by the storage collaborator.
///
/// Everything except `UniqueViolation` is an infrastructure fault that the
/// scheduling core propagates without reinterpretation.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepositoryError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RepositoryError::UniqueViolation(_))
    }
}
