pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod purchases;
pub mod validation;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use auth::{
    require_bearer, sign_in_handler, sign_up_handler, Argon2PasswordService, AuthService,
    AuthServiceImpl, PasswordService, PgUserStore, TokenService, UserStore,
};
use catalog::{
    add_product_handler, delete_product_handler, get_product_handler, get_products_handler,
    update_product_handler, CatalogService, CatalogServiceImpl, PgProductStore, ProductStore,
};
use config::TokenConfig;
use purchases::{
    get_product_purchases_handler, get_user_purchases_handler, make_purchase_handler,
    PgPurchaseLedger, PurchaseLedger, PurchaseService, PurchaseServiceImpl,
};

/// Application state shared across handlers
///
/// Services are held behind their traits so tests can swap the stores.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub catalog: Arc<dyn CatalogService>,
    pub purchases: Arc<dyn PurchaseService>,
}

impl AppState {
    pub fn new(
        auth: Arc<dyn AuthService>,
        catalog: Arc<dyn CatalogService>,
        purchases: Arc<dyn PurchaseService>,
    ) -> Self {
        Self {
            auth,
            catalog,
            purchases,
        }
    }

    /// Wire the services over the given stores
    pub fn from_stores(
        users: Arc<dyn UserStore>,
        products: Arc<dyn ProductStore>,
        ledger: Arc<dyn PurchaseLedger>,
        passwords: Arc<dyn PasswordService>,
        token: &TokenConfig,
    ) -> Self {
        Self::new(
            Arc::new(AuthServiceImpl::new(
                users,
                passwords,
                TokenService::new(token),
            )),
            Arc::new(CatalogServiceImpl::new(products)),
            Arc::new(PurchaseServiceImpl::new(ledger)),
        )
    }

    /// Wire the services over PostgreSQL stores sharing one pool
    pub fn from_pool(pool: PgPool, token: &TokenConfig) -> Self {
        Self::from_stores(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgProductStore::new(pool.clone())),
            Arc::new(PgPurchaseLedger::new(pool)),
            Arc::new(Argon2PasswordService),
            token,
        )
    }
}

/// Handler for GET /health
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Creates and configures the application router
///
/// `/auth` is public; every `/api/v1` route requires a bearer token.
pub fn create_router(state: AppState) -> Router {
    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/sign-up", post(sign_up_handler))
        .route("/sign-in", post(sign_in_handler));

    let product_routes = Router::new()
        .route("/add-product", post(add_product_handler))
        .route("/get-products", get(get_products_handler))
        .route("/get-product/:id", get(get_product_handler))
        .route("/update-product/:id", put(update_product_handler))
        .route("/delete-product/:id", delete(delete_product_handler));

    let purchase_routes = Router::new()
        .route("/make-purchase", post(make_purchase_handler))
        .route("/get-user-purchase/:id", get(get_user_purchases_handler))
        .route("/get-product-purchase/:id", get(get_product_purchases_handler));

    let api_routes = Router::new()
        .nest("/products", product_routes)
        .nest("/purchase", purchase_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/auth", auth_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod testing;
