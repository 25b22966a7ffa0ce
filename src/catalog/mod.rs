// Product catalog module
// CRUD over products; stock is only decremented by the purchase ledger

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::CatalogError;
pub use handlers::*;
pub use models::{NewProduct, Product, ProductListResponse, ProductRequest, ProductResponse};
pub use repository::{PgProductStore, ProductStore};
pub use service::{CatalogService, CatalogServiceImpl};
