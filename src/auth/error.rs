// Authentication error types

use crate::error::ApiError;

/// Outcomes of the auth service that are not a success
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("password hashing failed")]
    HashingFailed,

    #[error("cannot create user: {0}")]
    CreateFailed(String),

    /// Unknown username or wrong password; the two are deliberately indistinguishable
    #[error("invalid credentials")]
    UserNotFound,

    #[error("cannot get user: {0}")]
    LookupFailed(String),

    #[error("cannot sign token: {0}")]
    SignFailed(String),

    #[error("invalid token")]
    InvalidToken,

    #[error("invalid authorization header")]
    MissingToken,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AlreadyExists => ApiError::Conflict {
                message: err.to_string(),
            },
            AuthError::UserNotFound => ApiError::BadRequest(err.to_string()),
            AuthError::InvalidToken | AuthError::MissingToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::HashingFailed
            | AuthError::CreateFailed(_)
            | AuthError::LookupFailed(_)
            | AuthError::SignFailed(_) => ApiError::InternalError(err.to_string()),
        }
    }
}
