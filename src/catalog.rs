//! Client for the remote stock/product endpoints.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::domain::{Product, Stock};
use crate::error::CatalogError;

/// Read-only view of the remote catalog.
///
/// The cart actor talks to the storefront API through this trait so tests
/// can substitute a scripted catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync + 'static {
    /// `GET /stock/{product_id}` — maximum sellable quantity right now.
    async fn fetch_stock(&self, product_id: u32) -> Result<Stock, CatalogError>;

    /// `GET /products/{product_id}` — display fields for a product.
    async fn fetch_product(&self, product_id: u32) -> Result<Product, CatalogError>;
}

/// HTTP implementation against the storefront API.
pub struct HttpCatalog {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, CatalogError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "Fetching from catalog");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        resp.json().await.map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    #[instrument(skip(self))]
    async fn fetch_stock(&self, product_id: u32) -> Result<Stock, CatalogError> {
        self.get_json(&format!("stock/{product_id}")).await
    }

    #[instrument(skip(self))]
    async fn fetch_product(&self, product_id: u32) -> Result<Product, CatalogError> {
        self.get_json(&format!("products/{product_id}")).await
    }
}
