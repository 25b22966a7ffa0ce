// HTTP handlers for purchase endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::IdResponse;
use crate::purchases::models::{MakePurchaseRequest, PurchaseListResponse};
use crate::AppState;

/// Handler for POST /api/v1/purchase/make-purchase
/// Records a purchase for `user_id`, or for the caller when it is omitted
pub async fn make_purchase_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<MakePurchaseRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let id = state
        .purchases
        .make_purchase(
            request.user_id.unwrap_or(user.user_id),
            request.product_id,
            request.quantity,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// Handler for GET /api/v1/purchase/get-user-purchase/:id
pub async fn get_user_purchases_handler(
    State(state): State<AppState>,
    user_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<PurchaseListResponse>, ApiError> {
    let Path(user_id) = user_id?;
    let purchases = state.purchases.get_user_purchases(user_id).await?;
    Ok(Json(PurchaseListResponse { purchases }))
}

/// Handler for GET /api/v1/purchase/get-product-purchase/:id
pub async fn get_product_purchases_handler(
    State(state): State<AppState>,
    product_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<PurchaseListResponse>, ApiError> {
    let Path(product_id) = product_id?;
    let purchases = state.purchases.get_product_purchases(product_id).await?;
    Ok(Json(PurchaseListResponse { purchases }))
}
