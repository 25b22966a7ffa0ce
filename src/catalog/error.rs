// Catalog error types

use crate::error::ApiError;

/// Error types for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product {0} not found")]
    NotFound(i32),

    /// The product is referenced by recorded purchases
    #[error("product {0} has recorded purchases")]
    InUse(i32),

    #[error("invalid product: {0}")]
    Invalid(String),

    #[error("cannot create product: {0}")]
    CreateFailed(String),

    #[error("cannot get products: {0}")]
    LookupFailed(String),

    #[error("cannot update product: {0}")]
    UpdateFailed(String),

    #[error("cannot delete product: {0}")]
    DeleteFailed(String),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::AlreadyExists | CatalogError::InUse(_) => ApiError::Conflict {
                message: err.to_string(),
            },
            CatalogError::NotFound(id) => ApiError::NotFound {
                resource: "Product".to_string(),
                id: id.to_string(),
            },
            CatalogError::Invalid(_) => ApiError::BadRequest(err.to_string()),
            CatalogError::CreateFailed(_)
            | CatalogError::LookupFailed(_)
            | CatalogError::UpdateFailed(_)
            | CatalogError::DeleteFailed(_) => ApiError::InternalError(err.to_string()),
        }
    }
}
