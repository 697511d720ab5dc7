//! Client side of the shop: the external product catalog and a typed client
//! for the cart HTTP API.

use reqwest::StatusCode;
use thiserror::Error;

pub mod catalog;
pub mod client;

pub use catalog::{CatalogClient, Product};
pub use client::CartApiClient;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;
