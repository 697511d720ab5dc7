use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{delete, get, post},
};

use crate::{
    dto::cart::{AddItemRequest, CartUpdate, CartView, QuantityUpdate},
    error::AppResult,
    response::{ApiResponse, Empty},
    routes::params::parse_quantity,
    services::cart_service::{self, AddItemOutcome},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/addCart", post(add_item))
        .route("/getAll/{user}", get(get_cart))
        .route("/removeItem/{user}/{id}/{quantity}", delete(remove_item))
        .route("/updateQuantity/{user}/{id}/{action}", post(update_quantity))
}

#[utoipa::path(
    post,
    path = "/api/addCart",
    request_body = AddItemRequest,
    responses(
        (status = 201, description = "Item added to a new cart", body = ApiResponse<Empty>),
        (status = 200, description = "Item added to the open cart", body = ApiResponse<Empty>),
        (status = 400, description = "Missing required parameters"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Cart"
)]
pub async fn add_item(
    State(state): State<AppState>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Empty>>)> {
    let Json(payload) = payload?;
    let (status, message) = match cart_service::add_item(&state, payload).await? {
        AddItemOutcome::CreatedCart(_) => (StatusCode::CREATED, "Item added to new cart"),
        AddItemOutcome::UpdatedCart(_) => (StatusCode::OK, "Item added to existing cart"),
    };
    Ok((status, Json(ApiResponse::message(message))))
}

#[utoipa::path(
    get,
    path = "/api/getAll/{user}",
    params(
        ("user" = String, Path, description = "User identifier")
    ),
    responses(
        (status = 200, description = "Open cart items and total", body = ApiResponse<CartView>),
        (status = 400, description = "Missing user"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Cart"
)]
pub async fn get_cart(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> AppResult<Json<ApiResponse<CartView>>> {
    let resp = cart_service::get_cart(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/removeItem/{user}/{id}/{quantity}",
    params(
        ("user" = String, Path, description = "User identifier"),
        ("id" = String, Path, description = "Product ID"),
        ("quantity" = String, Path, description = "Units to remove, defaults to 1 when not numeric")
    ),
    responses(
        (status = 200, description = "Item decremented or removed", body = ApiResponse<CartUpdate>),
        (status = 400, description = "Missing required parameters"),
        (status = 404, description = "Cart or item not found"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Path((user, id, quantity)): Path<(String, String, String)>,
) -> AppResult<Json<ApiResponse<CartUpdate>>> {
    let quantity = parse_quantity(&quantity);
    let resp = cart_service::remove_or_decrement(&state, &user, &id, quantity).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/updateQuantity/{user}/{id}/{action}",
    params(
        ("user" = String, Path, description = "User identifier"),
        ("id" = String, Path, description = "Product ID"),
        ("action" = String, Path, description = "increase or decrease")
    ),
    responses(
        (status = 200, description = "Quantity adjusted", body = ApiResponse<QuantityUpdate>),
        (status = 400, description = "Invalid action"),
        (status = 404, description = "Cart or item not found"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Path((user, id, action)): Path<(String, String, String)>,
) -> AppResult<Json<ApiResponse<QuantityUpdate>>> {
    let resp = cart_service::adjust_quantity(&state, &user, &id, &action).await?;
    Ok(Json(resp))
}
