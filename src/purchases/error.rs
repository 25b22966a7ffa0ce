// Purchase error types

use crate::error::ApiError;

/// Error types for purchase operations
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i32),

    #[error("product {0} not found")]
    ProductNotFound(i32),

    #[error("user {0} does not exist")]
    UnknownUser(i32),

    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i32, available: i32 },

    #[error("cannot create purchase: {0}")]
    CreateFailed(String),

    #[error("cannot get purchases: {0}")]
    LookupFailed(String),
}

impl From<PurchaseError> for ApiError {
    fn from(err: PurchaseError) -> Self {
        match err {
            PurchaseError::InvalidQuantity(_) | PurchaseError::UnknownUser(_) => {
                ApiError::BadRequest(err.to_string())
            }
            PurchaseError::ProductNotFound(id) => ApiError::NotFound {
                resource: "Product".to_string(),
                id: id.to_string(),
            },
            PurchaseError::InsufficientStock { .. } => ApiError::Conflict {
                message: err.to_string(),
            },
            PurchaseError::CreateFailed(_) | PurchaseError::LookupFailed(_) => {
                ApiError::InternalError(err.to_string())
            }
        }
    }
}
