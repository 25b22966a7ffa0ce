// Bearer token middleware for protected routes

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::error::AuthError;
use crate::error::ApiError;
use crate::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity resolved from the bearer token of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    if value.len() <= BEARER_PREFIX.len() {
        return None;
    }

    let (scheme, token) = value.split_at(BEARER_PREFIX.len());
    if scheme.eq_ignore_ascii_case(BEARER_PREFIX) && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

/// Rejects requests without a valid bearer token and records the caller's id
///
/// Downstream handlers read the id with the [`AuthenticatedUser`] extractor.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = {
        let token = bearer_token(request.headers()).ok_or(AuthError::MissingToken)?;
        state.auth.parse_token(token)?
    };

    debug!(user_id, path = %request.uri().path(), "request authenticated");
    request.extensions_mut().insert(AuthenticatedUser { user_id });
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| ApiError::from(AuthError::MissingToken))
    }
}
