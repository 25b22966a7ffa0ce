// Purchase service - business logic layer

use std::sync::Arc;

use axum::async_trait;
use tracing::{debug, error, info, warn};

use crate::db::StoreError;
use crate::purchases::{
    error::PurchaseError,
    models::{NewPurchase, Purchase},
    repository::PurchaseLedger,
};

/// Purchase recording and history
#[async_trait]
pub trait PurchaseService: Send + Sync {
    /// Record a purchase, decrementing stock atomically, and return its id
    async fn make_purchase(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<i32, PurchaseError>;

    async fn get_user_purchases(&self, user_id: i32) -> Result<Vec<Purchase>, PurchaseError>;

    async fn get_product_purchases(&self, product_id: i32)
        -> Result<Vec<Purchase>, PurchaseError>;
}

/// Purchase service backed by a [`PurchaseLedger`]
pub struct PurchaseServiceImpl {
    ledger: Arc<dyn PurchaseLedger>,
}

impl PurchaseServiceImpl {
    pub fn new(ledger: Arc<dyn PurchaseLedger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl PurchaseService for PurchaseServiceImpl {
    async fn make_purchase(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<i32, PurchaseError> {
        if quantity <= 0 {
            return Err(PurchaseError::InvalidQuantity(quantity));
        }

        let purchase = NewPurchase {
            user_id,
            product_id,
            quantity,
        };

        match self.ledger.record_purchase(&purchase).await {
            Ok(id) => {
                info!(purchase_id = id, user_id, product_id, quantity, "purchase recorded");
                Ok(id)
            }
            Err(StoreError::NotFound) => Err(PurchaseError::ProductNotFound(product_id)),
            Err(StoreError::InsufficientStock {
                requested,
                available,
            }) => {
                warn!(product_id, requested, available, "purchase exceeds stock");
                Err(PurchaseError::InsufficientStock {
                    requested,
                    available,
                })
            }
            Err(StoreError::ForeignKeyViolation) => {
                warn!(user_id, "purchase for unknown user");
                Err(PurchaseError::UnknownUser(user_id))
            }
            Err(e) => {
                error!("PurchaseService.make_purchase - record_purchase: {}", e);
                Err(PurchaseError::CreateFailed(e.to_string()))
            }
        }
    }

    async fn get_user_purchases(&self, user_id: i32) -> Result<Vec<Purchase>, PurchaseError> {
        let purchases = self.ledger.find_by_user(user_id).await.map_err(|e| {
            error!("PurchaseService.get_user_purchases - find_by_user: {}", e);
            PurchaseError::LookupFailed(e.to_string())
        })?;

        debug!(user_id, count = purchases.len(), "listed user purchases");
        Ok(purchases)
    }

    async fn get_product_purchases(
        &self,
        product_id: i32,
    ) -> Result<Vec<Purchase>, PurchaseError> {
        let purchases = self.ledger.find_by_product(product_id).await.map_err(|e| {
            error!("PurchaseService.get_product_purchases - find_by_product: {}", e);
            PurchaseError::LookupFailed(e.to_string())
        })?;

        debug!(product_id, count = purchases.len(), "listed product purchases");
        Ok(purchases)
    }
}
