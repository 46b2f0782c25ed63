//! Users service errors.

use argon2::password_hash;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("username already taken")]
    AlreadyExists,

    #[error("username and password are required")]
    InvalidData,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    PasswordHash(password_hash::Error),

    #[error("password hashing task did not complete: {0}")]
    HashingTask(#[from] JoinError),
}

impl From<password_hash::Error> for UsersServiceError {
    fn from(error: password_hash::Error) -> Self {
        match error {
            password_hash::Error::Password => Self::InvalidCredentials,
            other => Self::PasswordHash(other),
        }
    }
}
