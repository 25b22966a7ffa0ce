// Purchase ledger

use axum::async_trait;
use sqlx::PgPool;

use crate::db::StoreError;
use crate::purchases::models::{NewPurchase, Purchase};

/// Records purchases against product stock
#[async_trait]
pub trait PurchaseLedger: Send + Sync {
    /// Decrement stock and insert the purchase as one atomic unit
    ///
    /// Fails with `NotFound` for an unknown product, `InsufficientStock` when
    /// the product has fewer units than requested and `ForeignKeyViolation`
    /// for an unknown user. Stock is untouched on every failure.
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<i32, StoreError>;

    /// Purchases made by a user, in insertion order
    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Purchase>, StoreError>;

    /// Purchases of a product, in insertion order
    async fn find_by_product(&self, product_id: i32) -> Result<Vec<Purchase>, StoreError>;
}

/// PostgreSQL-backed purchase ledger
#[derive(Clone)]
pub struct PgPurchaseLedger {
    pool: PgPool,
}

impl PgPurchaseLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseLedger for PgPurchaseLedger {
    async fn record_purchase(&self, purchase: &NewPurchase) -> Result<i32, StoreError> {
        // Dropping `tx` without commit rolls back the decrement.
        let mut tx = self.pool.begin().await?;

        // The row lock taken here serializes concurrent purchases of the same
        // product; the guard is re-checked once the lock is granted.
        let remaining: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET quantity = quantity - $1
            WHERE id = $2 AND quantity >= $1
            RETURNING quantity
            "#,
        )
        .bind(purchase.quantity)
        .bind(purchase.product_id)
        .fetch_optional(&mut *tx)
        .await?;

        if remaining.is_none() {
            let available: Option<i32> =
                sqlx::query_scalar("SELECT quantity FROM products WHERE id = $1")
                    .bind(purchase.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match available {
                Some(available) => StoreError::InsufficientStock {
                    requested: purchase.quantity,
                    available,
                },
                None => StoreError::NotFound,
            });
        }

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO purchases (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(purchase.user_id)
        .bind(purchase.product_id)
        .bind(purchase.quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Purchase>, StoreError> {
        let purchases = sqlx::query_as::<_, Purchase>(
            r#"
            SELECT id, user_id, product_id, quantity, "timestamp"
            FROM purchases
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }

    async fn find_by_product(&self, product_id: i32) -> Result<Vec<Purchase>, StoreError> {
        let purchases = sqlx::query_as::<_, Purchase>(
            r#"
            SELECT id, user_id, product_id, quantity, "timestamp"
            FROM purchases
            WHERE product_id = $1
            ORDER BY id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(purchases)
    }
}
