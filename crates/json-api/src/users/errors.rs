//! User Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Username already taken")
        }
        UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Username and password are required")
        }
        UsersServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid username or password")
        }
        UsersServiceError::PasswordHash(source) => {
            error!("password hashing failed: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::HashingTask(source) => {
            error!("password hashing task did not complete: {source}");

            StatusError::internal_server_error()
        }
    }
}
