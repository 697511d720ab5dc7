use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddItemRequest, CartUpdate, CartView, QuantityUpdate},
        checkout::{CheckoutResult, ClearedCart, HistoryEntry, HistoryList, Receipt},
    },
    error::ErrorData,
    models::{Cart, CheckoutRecord, LineItem, PopulatedCart},
    response::Empty,
    routes::{cart, checkout, health, params},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        cart::add_item,
        cart::get_cart,
        cart::remove_item,
        cart::update_quantity,
        checkout::checkout,
        checkout::checkout_history
    ),
    components(
        schemas(
            LineItem,
            Cart,
            CheckoutRecord,
            PopulatedCart,
            AddItemRequest,
            CartView,
            CartUpdate,
            QuantityUpdate,
            Receipt,
            ClearedCart,
            CheckoutResult,
            HistoryEntry,
            HistoryList,
            ErrorData,
            Empty,
            params::QuantityAction
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Checkout", description = "Checkout and history endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
