use crate::{
    dto::checkout::{CheckoutResult, ClearedCart, HistoryEntry, HistoryList, Receipt},
    error::{AppError, AppResult},
    models::{CartSnapshot, PopulatedCart},
    response::ApiResponse,
    routes::params::required,
    state::AppState,
    store::{carts, checkouts},
};

/// Finalize the user's open cart.
///
/// The receipt total is the cart's persisted `total_price`. The record insert
/// and the `is_checkout` flip are two separate writes, so a quantity change
/// landing between them is not reflected in the snapshot.
pub async fn checkout(state: &AppState, user: &str) -> AppResult<ApiResponse<CheckoutResult>> {
    let user = required(Some(user))
        .ok_or_else(|| AppError::bad_request("Missing required parameters"))?;

    let cart = carts::find_open(&state.orm, user)
        .await?
        .filter(|cart| !cart.items.0.is_empty())
        .ok_or_else(|| AppError::not_found("Cart not found or empty"))?;

    let record = checkouts::create(&state.orm, user, cart.id, cart.total_price).await?;

    if !carts::mark_checked_out(&state.orm, cart.id).await? {
        tracing::warn!(user, cart_id = %cart.id, "cart was already checked out");
    }

    let record = checkouts::checkout_from_entity(record);
    tracing::info!(
        user,
        cart_id = %record.cart_id,
        checkout_id = %record.id,
        total = record.total_price,
        "checkout completed"
    );

    Ok(ApiResponse::success(
        "Checkout successful",
        CheckoutResult {
            receipt: Receipt {
                user: record.user,
                total_price: record.total_price,
                timestamp: record.created_at,
            },
            cart: ClearedCart::default(),
        },
    ))
}

/// Every checkout for the user, newest first, each populated with its cart.
pub async fn history(state: &AppState, user: &str) -> AppResult<ApiResponse<HistoryList>> {
    let user = required(Some(user))
        .ok_or_else(|| AppError::bad_request("Missing required parameters"))?;

    let records = checkouts::list_for_user(&state.orm, user).await?;
    if records.is_empty() {
        return Ok(ApiResponse::success(
            "No checkout history",
            HistoryList::default(),
        ));
    }

    let cart_ids = records.iter().map(|record| record.cart_id).collect();
    let carts_by_id = carts::find_by_ids(&state.orm, cart_ids).await?;

    let data = records
        .into_iter()
        .map(checkouts::checkout_from_entity)
        .map(|record| {
            let products = match carts_by_id.get(&record.cart_id) {
                Some(cart) => {
                    let cart = carts::cart_from_entity(cart.clone());
                    CartSnapshot::Populated(PopulatedCart {
                        items: cart.items,
                        total_price: Some(cart.total_price),
                        created_at: Some(cart.created_at),
                    })
                }
                None => CartSnapshot::Missing,
            };
            HistoryEntry {
                id: record.id,
                user: record.user,
                cart_id: record.cart_id,
                products,
                total_price: record.total_price,
                created_at: record.created_at,
            }
        })
        .collect();

    Ok(ApiResponse::success(
        "Checkout history retrieved successfully",
        HistoryList { data },
    ))
}
