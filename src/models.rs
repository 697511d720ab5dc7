use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One product entry inside a cart, keyed by the catalog product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

/// Sum of `price * quantity` over the given items.
///
/// Every path that persists a cart goes through this function, so the
/// stored `total_price` never drifts from the item list.
pub fn compute_total(items: &[LineItem]) -> f64 {
    items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Uuid,
    pub user: String,
    pub items: Vec<LineItem>,
    pub is_checkout: bool,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRecord {
    pub id: Uuid,
    pub user: String,
    pub cart_id: Uuid,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
}

/// The subset of a cart a history entry is populated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedCart {
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Cart reference attached to a checkout history entry.
///
/// Older entries carried the bare item list, current ones carry the
/// populated cart, and a reference to a cart that no longer exists
/// serializes as `null`. Use [`CartSnapshot::items`] instead of matching on
/// the shape at the call site.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CartSnapshot {
    Populated(PopulatedCart),
    Items(Vec<LineItem>),
    #[default]
    Missing,
}

impl CartSnapshot {
    pub fn items(&self) -> &[LineItem] {
        match self {
            CartSnapshot::Populated(cart) => &cart.items,
            CartSnapshot::Items(items) => items,
            CartSnapshot::Missing => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, quantity: i32) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: format!("item {id}"),
            price,
            quantity,
        }
    }

    #[test]
    fn total_of_empty_cart_is_zero() {
        assert_eq!(compute_total(&[]), 0.0);
    }

    #[test]
    fn total_multiplies_price_by_quantity() {
        let items = vec![item("1", 10.0, 2), item("2", 2.5, 4)];
        assert_eq!(compute_total(&items), 30.0);
    }

    #[test]
    fn snapshot_accepts_populated_cart() {
        let raw = serde_json::json!({
            "items": [{ "id": "1", "name": "Shoe", "price": 10.0, "quantity": 2 }],
            "totalPrice": 20.0,
            "createdAt": "2025-01-01T00:00:00Z"
        });
        let snapshot: CartSnapshot = serde_json::from_value(raw).unwrap();
        assert!(matches!(snapshot, CartSnapshot::Populated(_)));
        assert_eq!(snapshot.items(), &[item_named("1", "Shoe", 10.0, 2)]);
    }

    #[test]
    fn snapshot_accepts_bare_item_list() {
        let raw = serde_json::json!([{ "id": "7", "name": "Hat", "price": 3.0, "quantity": 1 }]);
        let snapshot: CartSnapshot = serde_json::from_value(raw).unwrap();
        assert!(matches!(snapshot, CartSnapshot::Items(_)));
        assert_eq!(snapshot.items().len(), 1);
        assert_eq!(snapshot.items()[0].id, "7");
    }

    #[test]
    fn snapshot_null_has_no_items() {
        let snapshot: CartSnapshot = serde_json::from_value(serde_json::Value::Null).unwrap();
        assert_eq!(snapshot, CartSnapshot::Missing);
        assert!(snapshot.items().is_empty());
    }

    fn item_named(id: &str, name: &str, price: f64, quantity: i32) -> LineItem {
        LineItem {
            id: id.to_string(),
            name: name.to_string(),
            price,
            quantity,
        }
    }
}
