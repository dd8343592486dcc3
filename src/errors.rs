use thiserror::Error;

/// Error type that captures ledger validation and persistence failures.
///
/// No variant is fatal to the process: validation errors are reported back
/// to the input surface, read failures recover into defaults, and write
/// failures leave the in-memory ledger usable for the rest of the session.
#[derive(Debug, Error)]
pub enum SpendError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("invalid budget: {0}")]
    InvalidBudget(String),
    #[error("storage read failed: {0}")]
    StorageRead(String),
    #[error("storage write failed: {0}")]
    StorageWrite(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
