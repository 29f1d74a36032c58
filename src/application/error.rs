use thiserror::Error;

use crate::horizon::QueryError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid account address '{0}': expected a 56-character address starting with G")]
    InvalidAccountAddress(String),

    #[error("Invalid transaction hash '{0}': expected 64 hexadecimal characters")]
    InvalidTransactionHash(String),

    // Never echo the secret back
    #[error("Invalid secret key: expected a 56-character seed starting with S")]
    InvalidSecretKey,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response from ledger API: {0}")]
    Decode(String),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(what) => AppError::NotFound(what),
            QueryError::Network(detail) => AppError::Network(detail),
            QueryError::Decode(detail) => AppError::Decode(detail),
        }
    }
}

impl AppError {
    /// Validation failures are detected before any query is issued.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidAccountAddress(_)
                | AppError::InvalidTransactionHash(_)
                | AppError::InvalidSecretKey
        )
    }
}
