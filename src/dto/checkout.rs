use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{CartSnapshot, LineItem};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub user: String,
    pub total_price: f64,
    pub timestamp: DateTime<Utc>,
}

/// What the caller's cart looks like after checkout: always empty.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ClearedCart {
    pub items: Vec<LineItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResult {
    pub receipt: Receipt,
    pub cart: ClearedCart,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user: String,
    pub cart_id: Uuid,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub products: CartSnapshot,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct HistoryList {
    pub data: Vec<HistoryEntry>,
}
