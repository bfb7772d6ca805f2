use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    #[error("Invalid login code")]
    InvalidCredential,
    #[error("Allocated total does not match the points limit")]
    TotalMismatch,
    #[error("Invalid input provided")]
    InvalidInput,
    #[error("This code has already voted")]
    AlreadyVoted,
    #[error("Operation not allowed")]
    NotAllowed,
    #[error("Resource not found")]
    NotFound,
    #[error("Storage failure")]
    StorageFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: ErrorCode,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self { error: error.into(), code }
    }
}
