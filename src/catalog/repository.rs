// Product store

use axum::async_trait;
use sqlx::PgPool;

use crate::catalog::models::{NewProduct, Product};
use crate::db::StoreError;

/// Persistence for product records
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product and return its id; `UniqueViolation` on a taken name
    async fn create_product(&self, product: &NewProduct) -> Result<i32, StoreError>;

    /// All products ordered by id
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_product(&self, id: i32) -> Result<Option<Product>, StoreError>;

    /// Overwrite every field of a product; a missing id is a no-op
    async fn update_product(&self, id: i32, product: &NewProduct) -> Result<(), StoreError>;

    /// Remove a product; a missing id is a no-op, referenced products fail
    /// with `ForeignKeyViolation`
    async fn delete_product(&self, id: i32) -> Result<(), StoreError>;
}

/// PostgreSQL-backed product store
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn create_product(&self, product: &NewProduct) -> Result<i32, StoreError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, price, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, quantity FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_product(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, quantity FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn update_product(&self, id: i32, product: &NewProduct) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, quantity = $4
            WHERE id = $5
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_product(&self, id: i32) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
