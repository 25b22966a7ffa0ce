// Catalog service - business logic layer

use std::sync::Arc;

use axum::async_trait;
use tracing::{debug, error, info, warn};

use crate::catalog::{
    error::CatalogError,
    models::{NewProduct, Product},
    repository::ProductStore,
};
use crate::db::StoreError;
use crate::validation::max_price;

/// Product catalog operations
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn add_product(&self, product: NewProduct) -> Result<i32, CatalogError>;

    async fn get_all_products(&self) -> Result<Vec<Product>, CatalogError>;

    async fn get_product_by_id(&self, id: i32) -> Result<Product, CatalogError>;

    /// Replace every field of the product; succeeds even when `id` is unknown
    async fn update_product(&self, id: i32, product: NewProduct) -> Result<(), CatalogError>;

    /// Succeeds even when `id` is unknown
    async fn delete_product(&self, id: i32) -> Result<(), CatalogError>;
}

/// Catalog service backed by a [`ProductStore`]
pub struct CatalogServiceImpl {
    products: Arc<dyn ProductStore>,
}

impl CatalogServiceImpl {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    fn check(product: &NewProduct) -> Result<(), CatalogError> {
        if product.name.trim().is_empty() {
            return Err(CatalogError::Invalid("name must not be blank".to_string()));
        }
        if product.price.is_sign_negative() && !product.price.is_zero() {
            return Err(CatalogError::Invalid("price must not be negative".to_string()));
        }
        if product.price.round_dp(2) > max_price() {
            return Err(CatalogError::Invalid(format!(
                "price must not exceed {}",
                max_price()
            )));
        }
        if product.quantity < 0 {
            return Err(CatalogError::Invalid("quantity must not be negative".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_product(&self, product: NewProduct) -> Result<i32, CatalogError> {
        Self::check(&product)?;

        match self.products.create_product(&product).await {
            Ok(id) => {
                info!(product_id = id, name = %product.name, "product added");
                Ok(id)
            }
            Err(StoreError::UniqueViolation) => {
                warn!(name = %product.name, "product name already taken");
                Err(CatalogError::AlreadyExists)
            }
            Err(e) => {
                error!("CatalogService.add_product - create_product: {}", e);
                Err(CatalogError::CreateFailed(e.to_string()))
            }
        }
    }

    async fn get_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.list_products().await.map_err(|e| {
            error!("CatalogService.get_all_products - list_products: {}", e);
            CatalogError::LookupFailed(e.to_string())
        })?;

        debug!(count = products.len(), "listed products");
        Ok(products)
    }

    async fn get_product_by_id(&self, id: i32) -> Result<Product, CatalogError> {
        self.products
            .find_product(id)
            .await
            .map_err(|e| {
                error!("CatalogService.get_product_by_id - find_product: {}", e);
                CatalogError::LookupFailed(e.to_string())
            })?
            .ok_or(CatalogError::NotFound(id))
    }

    async fn update_product(&self, id: i32, product: NewProduct) -> Result<(), CatalogError> {
        Self::check(&product)?;

        match self.products.update_product(id, &product).await {
            Ok(()) => {
                info!(product_id = id, "product updated");
                Ok(())
            }
            Err(StoreError::UniqueViolation) => {
                warn!(product_id = id, name = %product.name, "product name already taken");
                Err(CatalogError::AlreadyExists)
            }
            Err(e) => {
                error!("CatalogService.update_product - update_product: {}", e);
                Err(CatalogError::UpdateFailed(e.to_string()))
            }
        }
    }

    async fn delete_product(&self, id: i32) -> Result<(), CatalogError> {
        match self.products.delete_product(id).await {
            Ok(()) => {
                info!(product_id = id, "product deleted");
                Ok(())
            }
            Err(StoreError::ForeignKeyViolation) => {
                warn!(product_id = id, "refusing to delete product with purchases");
                Err(CatalogError::InUse(id))
            }
            Err(e) => {
                error!("CatalogService.delete_product - delete_product: {}", e);
                Err(CatalogError::DeleteFailed(e.to_string()))
            }
        }
    }
}
