use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::checkout::{CheckoutResult, HistoryList},
    error::AppResult,
    response::ApiResponse,
    services::checkout_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/checkOut/{user}", post(checkout))
        .route("/checkoutHistory/{user}", get(checkout_history))
}

#[utoipa::path(
    post,
    path = "/api/checkOut/{user}",
    params(
        ("user" = String, Path, description = "User identifier")
    ),
    responses(
        (status = 201, description = "Cart finalized", body = ApiResponse<CheckoutResult>),
        (status = 400, description = "Missing user"),
        (status = 404, description = "Cart not found or empty"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Checkout"
)]
pub async fn checkout(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> AppResult<(StatusCode, Json<ApiResponse<CheckoutResult>>)> {
    let resp = checkout_service::checkout(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/checkoutHistory/{user}",
    params(
        ("user" = String, Path, description = "User identifier")
    ),
    responses(
        (
            status = 200,
            description = "Checkout history, newest first",
            body = ApiResponse<HistoryList>
        ),
        (status = 400, description = "Missing user"),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Checkout"
)]
pub async fn checkout_history(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> AppResult<Json<ApiResponse<HistoryList>>> {
    let resp = checkout_service::history(&state, &user).await?;
    Ok(Json(resp))
}
