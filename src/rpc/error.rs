use crate::services::ServiceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RpcResult<T> = Result<T, RpcError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcErrorCode {
    /// Input did not match the procedure's schema
    BadRequest,
    /// No such procedure
    NotFound,
    InternalServerError,
}

impl RpcErrorCode {
    pub fn http_status(self) -> u16 {
        match self {
            RpcErrorCode::BadRequest => 400,
            RpcErrorCode::NotFound => 404,
            RpcErrorCode::InternalServerError => 500,
        }
    }
}

/// Error crossing the procedure boundary. Serializes to `{ "code": ..., "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct RpcError {
    pub code: RpcErrorCode,
    pub message: String,
}

impl RpcError {
    pub fn new(code: RpcErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(RpcErrorCode::InternalServerError, message)
    }
}

impl From<ServiceError> for RpcError {
    fn from(e: ServiceError) -> Self {
        match &e {
            ServiceError::AuthorNotFound(_) => RpcError::internal(e.to_string()),
            ServiceError::Db(db) => {
                tracing::error!(error = %db, "data store failure");
                RpcError::internal("data store failure")
            }
        }
    }
}
