use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorCode, ErrorResponse, ValidationError, AllocationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Malformed ledger: {0}")]
    Csv(#[from] csv::Error),
    #[error("Ledger row {row} has a non-integer value: {value}")]
    BadLedgerValue { row: usize, value: String },
    #[error("Ledger columns {found:?} do not match projects {expected:?}")]
    HeaderMismatch { expected: Vec<String>, found: Vec<String> },
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ValidationError),
}

impl StoreError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StoreError::Io { path: path.display().to_string(), source }
    }

    pub fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        StoreError::Json { path: path.display().to_string(), source }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Incorrect login")]
    InvalidCredential,
    #[error("Please allocate exactly {expected} points before submitting (currently {actual}).")]
    TotalMismatch { expected: u32, actual: u32 },
    #[error("{0}")]
    InvalidInput(String),
    #[error("This code has already voted")]
    AlreadyVoted,
    #[error("{0}")]
    NotAllowed(&'static str),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidInput(e.to_string())
    }
}

impl From<AllocationError> for ApiError {
    fn from(e: AllocationError) -> Self {
        ApiError::InvalidInput(e.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::InvalidCredential => Status::Unauthorized,
            ApiError::TotalMismatch { .. } => Status::BadRequest,
            ApiError::InvalidInput(_) => Status::BadRequest,
            ApiError::AlreadyVoted => Status::Forbidden,
            ApiError::NotAllowed(_) => Status::Forbidden,
            ApiError::Storage(_) => Status::InternalServerError,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::InvalidCredential => ErrorCode::InvalidCredential,
            ApiError::TotalMismatch { .. } => ErrorCode::TotalMismatch,
            ApiError::InvalidInput(_) => ErrorCode::InvalidInput,
            ApiError::AlreadyVoted => ErrorCode::AlreadyVoted,
            ApiError::NotAllowed(_) => ErrorCode::NotAllowed,
            ApiError::Storage(_) | ApiError::Internal(_) => ErrorCode::StorageFailure,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        let message = match &self {
            ApiError::Storage(_) | ApiError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
                "An internal server error occurred.".to_string()
            }
            other => other.to_string(),
        };

        rocket::Response::build_from(Json(ErrorResponse::new(self.code(), message)).respond_to(req)?)
            .status(status)
            .ok()
    }
}
