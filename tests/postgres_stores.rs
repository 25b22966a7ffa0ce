// PostgreSQL store tests
//
// Run with `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.
// Every test uses freshly generated names so tests can share one database.

use std::sync::Arc;

use market_api::auth::{PgUserStore, UserStore};
use market_api::catalog::{NewProduct, PgProductStore, ProductStore};
use market_api::db::{self, StoreError};
use market_api::purchases::{NewPurchase, PgPurchaseLedger, PurchaseLedger};
use rust_decimal_macros::dec;
use sqlx::PgPool;

async fn setup_test_db() -> PgPool {
    let database_url =
        std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");

    let pool = db::create_pool(&database_url, 10)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn unique(prefix: &str) -> String {
    format!("{}_{:08x}", prefix, rand::random::<u32>())
}

fn product_named(name: &str, quantity: i32) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: "A widget".to_string(),
        price: dec!(9.99),
        quantity,
    }
}

/// A fresh user and product with the given stock
async fn seed(pool: &PgPool, stock: i32) -> (i32, i32) {
    let user_id = PgUserStore::new(pool.clone())
        .create_user(&unique("buyer"), "hash", "buyer@example.com")
        .await
        .expect("Failed to create user");
    let product_id = PgProductStore::new(pool.clone())
        .create_product(&product_named(&unique("widget"), stock))
        .await
        .expect("Failed to create product");
    (user_id, product_id)
}

async fn stock_of(pool: &PgPool, product_id: i32) -> i32 {
    PgProductStore::new(pool.clone())
        .find_product(product_id)
        .await
        .expect("Failed to read product")
        .expect("Product not found")
        .quantity
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_user_store_create_find_and_unique_username() {
    let pool = setup_test_db().await;
    let users = PgUserStore::new(pool);
    let username = unique("alice");

    let id = users
        .create_user(&username, "$argon2id$stub", "a@x.com")
        .await
        .expect("Failed to create user");
    let found = users
        .find_by_username(&username)
        .await
        .expect("Failed to find user")
        .expect("User not found");

    assert_eq!(found.id, id);
    assert_eq!(found.password_hash, "$argon2id$stub");
    assert!(matches!(
        users.create_user(&username, "other", "b@x.com").await,
        Err(StoreError::UniqueViolation)
    ));
    assert!(users
        .find_by_username(&unique("nobody"))
        .await
        .expect("Failed to query")
        .is_none());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_product_store_crud() {
    let pool = setup_test_db().await;
    let products = PgProductStore::new(pool);
    let name = unique("widget");

    let id = products
        .create_product(&product_named(&name, 10))
        .await
        .expect("Failed to create product");
    let stored = products
        .find_product(id)
        .await
        .expect("Failed to find product")
        .expect("Product not found");
    assert_eq!(stored, product_named(&name, 10).with_id(id));

    assert!(matches!(
        products.create_product(&product_named(&name, 1)).await,
        Err(StoreError::UniqueViolation)
    ));

    let renamed = NewProduct {
        name: unique("gadget"),
        description: "Updated".to_string(),
        price: dec!(0.00),
        quantity: 3,
    };
    products
        .update_product(id, &renamed)
        .await
        .expect("Failed to update product");
    assert_eq!(
        products.find_product(id).await.unwrap(),
        Some(renamed.with_id(id))
    );

    let listed = products.list_products().await.expect("Failed to list");
    assert!(listed.windows(2).all(|w| w[0].id < w[1].id));
    assert!(listed.iter().any(|p| p.id == id));

    products.delete_product(id).await.expect("Failed to delete");
    assert!(products.find_product(id).await.unwrap().is_none());
    products
        .delete_product(id)
        .await
        .expect("Deleting a missing product is a no-op");
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_purchase_decrements_stock_and_is_listed() {
    let pool = setup_test_db().await;
    let (user_id, product_id) = seed(&pool, 10).await;
    let ledger = PgPurchaseLedger::new(pool.clone());

    let first = ledger
        .record_purchase(&NewPurchase {
            user_id,
            product_id,
            quantity: 3,
        })
        .await
        .expect("Failed to record purchase");
    let second = ledger
        .record_purchase(&NewPurchase {
            user_id,
            product_id,
            quantity: 2,
        })
        .await
        .expect("Failed to record purchase");

    assert_eq!(stock_of(&pool, product_id).await, 5);
    let by_product = ledger.find_by_product(product_id).await.unwrap();
    assert_eq!(
        by_product.iter().map(|p| (p.id, p.quantity)).collect::<Vec<_>>(),
        vec![(first, 3), (second, 2)]
    );
    assert_eq!(ledger.find_by_user(user_id).await.unwrap(), by_product);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_failed_purchases_leave_stock_untouched() {
    let pool = setup_test_db().await;
    let (user_id, product_id) = seed(&pool, 2).await;
    let ledger = PgPurchaseLedger::new(pool.clone());

    let oversell = ledger
        .record_purchase(&NewPurchase {
            user_id,
            product_id,
            quantity: 3,
        })
        .await;
    assert!(matches!(
        oversell,
        Err(StoreError::InsufficientStock {
            requested: 3,
            available: 2
        })
    ));

    // The decrement succeeds before the insert fails; the rollback must undo it.
    let unknown_user = ledger
        .record_purchase(&NewPurchase {
            user_id: i32::MAX,
            product_id,
            quantity: 1,
        })
        .await;
    assert!(matches!(unknown_user, Err(StoreError::ForeignKeyViolation)));

    let unknown_product = ledger
        .record_purchase(&NewPurchase {
            user_id,
            product_id: i32::MAX,
            quantity: 1,
        })
        .await;
    assert!(matches!(unknown_product, Err(StoreError::NotFound)));

    assert_eq!(stock_of(&pool, product_id).await, 2);
    assert!(ledger.find_by_product(product_id).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_concurrent_purchases_never_oversell() {
    let pool = setup_test_db().await;
    let (user_id, product_id) = seed(&pool, 20).await;
    let ledger = Arc::new(PgPurchaseLedger::new(pool.clone()));

    let handles: Vec<_> = (0..30)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move {
                ledger
                    .record_purchase(&NewPurchase {
                        user_id,
                        product_id,
                        quantity: 1,
                    })
                    .await
            })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => succeeded += 1,
            Err(StoreError::InsufficientStock { .. }) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(succeeded, 20);
    assert_eq!(stock_of(&pool, product_id).await, 0);
    let recorded: i32 = ledger
        .find_by_product(product_id)
        .await
        .unwrap()
        .iter()
        .map(|p| p.quantity)
        .sum();
    assert_eq!(recorded, 20);
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_product_with_purchases_is_protected_by_foreign_key() {
    let pool = setup_test_db().await;
    let (user_id, product_id) = seed(&pool, 5).await;
    PgPurchaseLedger::new(pool.clone())
        .record_purchase(&NewPurchase {
            user_id,
            product_id,
            quantity: 1,
        })
        .await
        .expect("Failed to record purchase");

    let result = PgProductStore::new(pool.clone()).delete_product(product_id).await;

    assert!(matches!(result, Err(StoreError::ForeignKeyViolation)));
    assert_eq!(stock_of(&pool, product_id).await, 4);
}
