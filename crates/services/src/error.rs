use auth::{AuthError, InvalidTokenReason};
use cinema_core::DatabaseError;
use storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Movie {movie_id} is already a favorite of user {user_id}")]
    DuplicateFavorite { user_id: i64, movie_id: i64 },

    /// Unknown email and wrong password are deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(InvalidTokenReason),

    #[error(transparent)]
    Auth(AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<AuthError> for ServiceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidToken(reason) => Self::InvalidToken(reason),
            other => Self::Auth(other),
        }
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(error: DatabaseError) -> Self {
        Self::Storage(StorageError::Session(error))
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
