use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::models::{Cart, LineItem};

/// Body of `POST /api/addCart`.
///
/// Every field is optional at the wire level so a missing field surfaces as
/// a validation error instead of a deserialization failure. `id` and
/// `quantity` accept either JSON strings or numbers.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddItemRequest {
    pub user: Option<String>,
    #[schema(value_type = Option<String>)]
    pub id: Option<Value>,
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Value>,
    #[schema(value_type = Option<i32>)]
    pub quantity: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub total_price: f64,
}

impl CartView {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_price: 0.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartUpdate {
    pub cart: Cart,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuantityUpdate {
    pub cart: CartView,
}
