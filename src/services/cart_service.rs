use crate::{
    dto::cart::{AddItemRequest, CartUpdate, CartView, QuantityUpdate},
    error::{AppError, AppResult},
    models::{Cart, LineItem, compute_total},
    response::ApiResponse,
    routes::params::{
        QuantityAction, id_from_value, price_from_value, quantity_from_value, required,
    },
    state::AppState,
    store::carts::{self, cart_from_entity},
};

fn missing_params() -> AppError {
    AppError::bad_request("Missing required parameters")
}

/// A cart whose total does not fit in an `f64` cannot be serialized as a number.
fn ensure_representable(items: &[LineItem]) -> AppResult<()> {
    if compute_total(items).is_finite() {
        Ok(())
    } else {
        Err(AppError::bad_request("Cart total is out of range"))
    }
}

#[derive(Debug)]
pub enum AddItemOutcome {
    /// The user had no open cart; one was created holding the item.
    CreatedCart(Cart),
    /// The item was merged into the user's open cart.
    UpdatedCart(Cart),
}

impl AddItemOutcome {
    pub fn cart(&self) -> &Cart {
        match self {
            AddItemOutcome::CreatedCart(cart) | AddItemOutcome::UpdatedCart(cart) => cart,
        }
    }
}

pub async fn add_item(state: &AppState, payload: AddItemRequest) -> AppResult<AddItemOutcome> {
    let user = required(payload.user.as_deref()).ok_or_else(missing_params)?;
    let id = id_from_value(payload.id.as_ref()).ok_or_else(missing_params)?;
    let name = required(payload.name.as_deref()).ok_or_else(missing_params)?;
    let price = price_from_value(payload.price.as_ref()).ok_or_else(missing_params)?;
    let quantity = quantity_from_value(payload.quantity.as_ref());

    let item = LineItem {
        id,
        name: name.to_string(),
        price,
        quantity,
    };

    let Some(cart) = carts::find_open(&state.orm, user).await? else {
        ensure_representable(std::slice::from_ref(&item))?;
        let created = carts::create(&state.orm, user, vec![item]).await?;
        tracing::debug!(user, cart_id = %created.id, "created cart");
        return Ok(AddItemOutcome::CreatedCart(cart_from_entity(created)));
    };

    let mut items = cart.items.0.clone();
    match items.iter_mut().find(|existing| existing.id == item.id) {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
        None => items.push(item),
    }
    ensure_representable(&items)?;

    let saved = carts::save_items(&state.orm, cart, items).await?;
    tracing::debug!(user, cart_id = %saved.id, total = saved.total_price, "updated cart");
    Ok(AddItemOutcome::UpdatedCart(cart_from_entity(saved)))
}

/// The open cart's items and total, or an empty view. Never creates a cart.
pub async fn get_cart(state: &AppState, user: &str) -> AppResult<ApiResponse<CartView>> {
    let user = required(Some(user)).ok_or_else(missing_params)?;

    let Some(cart) = carts::find_open(&state.orm, user).await? else {
        return Ok(ApiResponse::success("No item in cart", CartView::empty()));
    };

    let items = cart.items.0;
    let total_price = compute_total(&items);
    Ok(ApiResponse::success(
        "Cart data retrieved successfully",
        CartView { items, total_price },
    ))
}

/// Take `quantity` units of item `id` out of the open cart, dropping the line
/// once nothing would remain.
pub async fn remove_or_decrement(
    state: &AppState,
    user: &str,
    id: &str,
    quantity: i32,
) -> AppResult<ApiResponse<CartUpdate>> {
    let (user, id) = match (required(Some(user)), required(Some(id))) {
        (Some(user), Some(id)) => (user, id),
        _ => return Err(missing_params()),
    };
    let quantity = quantity.max(1);

    let cart = carts::find_open(&state.orm, user)
        .await?
        .ok_or_else(|| AppError::not_found("Cart not found"))?;

    let mut items = cart.items.0.clone();
    let index = items
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| AppError::not_found("Item not found in cart"))?;

    if items[index].quantity > quantity {
        items[index].quantity -= quantity;
    } else {
        items.remove(index);
    }

    let saved = carts::save_items(&state.orm, cart, items).await?;
    tracing::debug!(user, item_id = id, quantity, "removed from cart");
    Ok(ApiResponse::success(
        "Item updated successfully",
        CartUpdate {
            cart: cart_from_entity(saved),
        },
    ))
}

/// Step an item's quantity by one. Decreasing a single unit removes the line.
pub async fn adjust_quantity(
    state: &AppState,
    user: &str,
    id: &str,
    action: &str,
) -> AppResult<ApiResponse<QuantityUpdate>> {
    let action: QuantityAction = action.parse()?;
    let (user, id) = match (required(Some(user)), required(Some(id))) {
        (Some(user), Some(id)) => (user, id),
        _ => return Err(AppError::bad_request("Missing or invalid parameters")),
    };

    let cart = carts::find_open(&state.orm, user)
        .await?
        .ok_or_else(|| AppError::not_found("Cart not found"))?;

    let mut items = cart.items.0.clone();
    let index = items
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| AppError::not_found("Item not found in cart"))?;

    match action {
        QuantityAction::Increase => {
            items[index].quantity = items[index].quantity.saturating_add(1);
        }
        QuantityAction::Decrease if items[index].quantity > 1 => {
            items[index].quantity -= 1;
        }
        QuantityAction::Decrease => {
            items.remove(index);
        }
    }
    ensure_representable(&items)?;

    let total_price = compute_total(&items);
    let saved = carts::save_items(&state.orm, cart, items).await?;
    tracing::debug!(user, item_id = id, %action, total = total_price, "adjusted quantity");

    Ok(ApiResponse::success(
        format!("Quantity {action}d successfully"),
        QuantityUpdate {
            cart: CartView {
                items: saved.items.0,
                total_price,
            },
        },
    ))
}
