use crate::db::error::DbError;
use crate::models::types::PostId;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// A post references a profile that does not exist (anymore)
    #[error("author for post {0} not found")]
    AuthorNotFound(PostId),

    #[error(transparent)]
    Db(#[from] DbError),
}
