use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response envelope: a human-readable `message` next to the payload fields.
///
/// The payload is flattened, so `ApiResponse<CartView>` serializes as
/// `{ "message": ..., "items": [...], "totalPrice": ... }`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Empty {}

impl ApiResponse<Empty> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(message, Empty::default())
    }
}
