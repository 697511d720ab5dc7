use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::{StorefrontError, StorefrontResult};

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";

/// A product as served by the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
}

/// Read-only client for the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> StorefrontResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| StorefrontError::InvalidUrl(err.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub async fn list_products(&self) -> StorefrontResult<Vec<Product>> {
        let products = self
            .client
            .get(self.base_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Product>>()
            .await?;
        tracing::debug!(count = products.len(), "fetched catalog");
        Ok(products)
    }

    pub async fn get_product(&self, id: u64) -> StorefrontResult<Product> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StorefrontError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());

        let product = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Product>()
            .await?;
        Ok(product)
    }
}

/// Distinct categories in first-seen order.
pub fn categories(products: &[Product]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products {
        if !product.category.is_empty() && !seen.contains(&product.category.as_str()) {
            seen.push(&product.category);
        }
    }
    seen
}

/// Products in `category`; `None` or `"all"` keeps everything.
pub fn filter_by_category<'a>(products: &'a [Product], category: Option<&str>) -> Vec<&'a Product> {
    match category {
        None | Some("all") => products.iter().collect(),
        Some(category) => products
            .iter()
            .filter(|product| product.category.eq_ignore_ascii_case(category))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Product> {
        let raw = serde_json::json!([
            {
                "id": 1,
                "title": "Backpack",
                "price": 109.95,
                "description": "Fits a laptop",
                "category": "men's clothing",
                "image": "https://example.com/1.jpg",
                "rating": { "rate": 3.9, "count": 120 }
            },
            {
                "id": 5,
                "title": "Bracelet",
                "price": 695,
                "description": "Gold",
                "category": "jewelery",
                "image": "https://example.com/5.jpg"
            },
            {
                "id": 6,
                "title": "Ring",
                "price": 168,
                "category": "jewelery"
            }
        ]);
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn decodes_catalog_payload() {
        let products = sample();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].title, "Backpack");
        assert_eq!(products[1].price, 695.0);
        assert!(products[2].image.is_empty());
    }

    #[test]
    fn lists_categories_once_in_order() {
        let products = sample();
        assert_eq!(categories(&products), vec!["men's clothing", "jewelery"]);
    }

    #[test]
    fn filters_by_category() {
        let products = sample();
        assert_eq!(filter_by_category(&products, None).len(), 3);
        assert_eq!(filter_by_category(&products, Some("all")).len(), 3);
        let jewelery = filter_by_category(&products, Some("Jewelery"));
        assert_eq!(jewelery.iter().map(|p| p.id).collect::<Vec<_>>(), vec![5, 6]);
        assert!(filter_by_category(&products, Some("electronics")).is_empty());
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = CatalogClient::new(reqwest::Client::new(), "not a url").unwrap_err();
        assert!(matches!(err, StorefrontError::InvalidUrl(_)));
    }
}
