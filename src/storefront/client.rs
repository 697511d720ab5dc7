use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

use super::{Product, StorefrontError, StorefrontResult};
use crate::{
    dto::{
        cart::{AddItemRequest, CartUpdate, CartView, QuantityUpdate},
        checkout::{CheckoutResult, HistoryEntry, HistoryList, Receipt},
    },
    error::ErrorData,
    models::Cart,
    response::{ApiResponse, Empty},
    routes::params::QuantityAction,
};

/// Typed client for the cart HTTP API.
#[derive(Debug, Clone)]
pub struct CartApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CartApiClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> StorefrontResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| StorefrontError::InvalidUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StorefrontError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// `{base}/api/{segments...}` with every segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> StorefrontResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StorefrontError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// Add a catalog product to the user's cart. Returns the server's message.
    pub async fn add_to_cart(
        &self,
        user: &str,
        product: &Product,
        quantity: i32,
    ) -> StorefrontResult<String> {
        let payload = AddItemRequest {
            user: Some(user.to_string()),
            id: Some(product.id.into()),
            name: Some(product.title.clone()),
            price: Some(product.price.into()),
            quantity: Some(quantity.into()),
        };
        let url = self.endpoint(&["addCart"])?;
        let request = self.client.post(url).json(&payload);
        let resp: ApiResponse<Empty> = send(request).await?;
        Ok(resp.message)
    }

    pub async fn get_cart(&self, user: &str) -> StorefrontResult<CartView> {
        let resp: ApiResponse<CartView> = self.call(Method::GET, &["getAll", user]).await?;
        Ok(resp.data)
    }

    pub async fn update_quantity(
        &self,
        user: &str,
        id: &str,
        action: QuantityAction,
    ) -> StorefrontResult<CartView> {
        let resp: ApiResponse<QuantityUpdate> = self
            .call(Method::POST, &["updateQuantity", user, id, action.as_str()])
            .await?;
        Ok(resp.data.cart)
    }

    pub async fn remove_item(&self, user: &str, id: &str, quantity: i32) -> StorefrontResult<Cart> {
        let quantity = quantity.to_string();
        let resp: ApiResponse<CartUpdate> = self
            .call(Method::DELETE, &["removeItem", user, id, &quantity])
            .await?;
        Ok(resp.data.cart)
    }

    pub async fn checkout(&self, user: &str) -> StorefrontResult<Receipt> {
        let resp: ApiResponse<CheckoutResult> =
            self.call(Method::POST, &["checkOut", user]).await?;
        Ok(resp.data.receipt)
    }

    pub async fn history(&self, user: &str) -> StorefrontResult<Vec<HistoryEntry>> {
        let resp: ApiResponse<HistoryList> =
            self.call(Method::GET, &["checkoutHistory", user]).await?;
        Ok(resp.data.data)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
    ) -> StorefrontResult<T> {
        let url = self.endpoint(segments)?;
        send(self.client.request(method, url)).await
    }
}

async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> StorefrontResult<T> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ApiResponse<ErrorData>>().await {
        Ok(body) => body.data.error,
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    tracing::debug!(%status, %message, "cart API call failed");
    Err(StorefrontError::Api { status, message })
}
