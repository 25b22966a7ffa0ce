// Purchase data models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Purchase database model; immutable once recorded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Purchase {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub timestamp: DateTime<Utc>,
}

/// A purchase about to be recorded; id and timestamp are assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPurchase {
    pub user_id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

/// Request body for make-purchase
///
/// `user_id` defaults to the caller when omitted.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct MakePurchaseRequest {
    #[serde(default)]
    #[validate(range(min = 1))]
    pub user_id: Option<i32>,
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseListResponse {
    pub purchases: Vec<Purchase>,
}
