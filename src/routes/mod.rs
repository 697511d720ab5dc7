use axum::Router;

use crate::state::AppState;

pub mod cart;
pub mod checkout;
pub mod doc;
pub mod health;
pub mod params;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(cart::router())
        .merge(checkout::router())
}
