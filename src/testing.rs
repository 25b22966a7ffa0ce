// In-memory store doubles for service and HTTP tests
//
// Mirrors the constraint behaviour of the PostgreSQL schema: unique usernames
// and product names, purchase foreign keys, and the guarded stock decrement.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use axum::async_trait;
use chrono::Utc;

use crate::auth::{models::User, repository::UserStore};
use crate::catalog::{
    models::{NewProduct, Product},
    repository::ProductStore,
};
use crate::db::StoreError;
use crate::purchases::{
    models::{NewPurchase, Purchase},
    repository::PurchaseLedger,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    products: BTreeMap<i32, Product>,
    purchases: Vec<Purchase>,
    next_product_id: i32,
}

/// One store implementing every store trait over shared tables
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    /// Make every subsequent operation fail as if the pool timed out
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Insert a user directly, bypassing hashing
    pub fn add_user(&self, username: &str) -> i32 {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.users.len() as i32 + 1;
        tables.users.push(User {
            id,
            username: username.to_string(),
            password_hash: "unused".to_string(),
            email: format!("{}@example.com", username),
        });
        id
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
    ) -> Result<i32, StoreError> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(StoreError::UniqueViolation);
        }

        let id = tables.users.len() as i32 + 1;
        tables.users.push(User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            email: email.to_string(),
        });
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn create_product(&self, product: &NewProduct) -> Result<i32, StoreError> {
        let mut tables = self.tables()?;
        if tables.products.values().any(|p| p.name == product.name) {
            return Err(StoreError::UniqueViolation);
        }

        tables.next_product_id += 1;
        let id = tables.next_product_id;
        tables.products.insert(id, product.clone().with_id(id));
        Ok(id)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.products.values().cloned().collect())
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.products.get(&id).cloned())
    }

    async fn update_product(&self, id: i32, product: &NewProduct) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        if !tables.products.contains_key(&id) {
            return Ok(());
        }
        if tables
            .products
            .values()
            .any(|p| p.id != id && p.name == product.name)
        {
            return Err(StoreError::UniqueViolation);
        }

        tables.products.insert(id, product.clone().with_id(id));
        Ok(())
    }

    async fn delete_product(&self, id: i32) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        if tables.purchases.iter().any(|p| p.product_id == id) {
            return Err(StoreError::ForeignKeyViolation);
        }

        tables.products.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PurchaseLedger for InMemoryStore {
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<i32, StoreError> {
        let mut tables = self.tables()?;

        let available = tables
            .products
            .get(&purchase.product_id)
            .map(|p| p.quantity)
            .ok_or(StoreError::NotFound)?;
        if available < purchase.quantity {
            return Err(StoreError::InsufficientStock {
                requested: purchase.quantity,
                available,
            });
        }
        if !tables.users.iter().any(|u| u.id == purchase.user_id) {
            return Err(StoreError::ForeignKeyViolation);
        }

        if let Some(product) = tables.products.get_mut(&purchase.product_id) {
            product.quantity -= purchase.quantity;
        }
        let id = tables.purchases.len() as i32 + 1;
        tables.purchases.push(Purchase {
            id,
            user_id: purchase.user_id,
            product_id: purchase.product_id,
            quantity: purchase.quantity,
            timestamp: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Purchase>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .purchases
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Vec<Purchase>, StoreError> {
        let tables = self.tables()?;
        Ok(tables
            .purchases
            .iter()
            .filter(|p| p.product_id == product_id)
            .cloned()
            .collect())
    }
}
