// HTTP handlers for authentication endpoints

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::models::{SignInRequest, SignUpRequest, TokenResponse};
use crate::error::ApiError;
use crate::models::IdResponse;
use crate::AppState;

/// Register a new user
/// POST /auth/sign-up
pub async fn sign_up_handler(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let id = state
        .auth
        .register_user(&request.username, &request.password, &request.email)
        .await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// Exchange credentials for a bearer token
/// POST /auth/sign-in
pub async fn sign_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let token = state
        .auth
        .generate_token(&request.username, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
