// Purchases module
// Atomic stock decrement plus purchase record, and purchase history queries

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::PurchaseError;
pub use handlers::*;
pub use models::{MakePurchaseRequest, NewPurchase, Purchase, PurchaseListResponse};
pub use repository::{PgPurchaseLedger, PurchaseLedger};
pub use service::{PurchaseService, PurchaseServiceImpl};
