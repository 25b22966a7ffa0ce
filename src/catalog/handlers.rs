// HTTP handlers for product endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::catalog::models::{ProductListResponse, ProductRequest, ProductResponse};
use crate::error::ApiError;
use crate::models::{IdResponse, MessageResponse};
use crate::AppState;

/// Handler for POST /api/v1/products/add-product
pub async fn add_product_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let id = state.catalog.add_product(request.into()).await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// Handler for GET /api/v1/products/get-products
pub async fn get_products_handler(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.catalog.get_all_products().await?;
    Ok(Json(ProductListResponse { products }))
}

/// Handler for GET /api/v1/products/get-product/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let Path(id) = id?;
    let product = state.catalog.get_product_by_id(id).await?;
    Ok(Json(ProductResponse { product }))
}

/// Handler for PUT /api/v1/products/update-product/:id
/// Replaces every field of the product
pub async fn update_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    request.validate()?;

    state.catalog.update_product(id, request.into()).await?;

    Ok(Json(MessageResponse::success()))
}

/// Handler for DELETE /api/v1/products/delete-product/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    state.catalog.delete_product(id).await?;
    Ok(Json(MessageResponse::success()))
}
