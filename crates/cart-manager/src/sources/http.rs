//! # REST Sources
//!
//! [`HttpApi`] serves both lookups from the storefront API:
//!
//! - `GET {base}/stock/{id}` → `{ "amount": 3 }`
//! - `GET {base}/products/{id}` → `{ "id": 1, "name": "...", "price": 179.9, "image": "..." }`
use super::{CatalogSource, SourceError, StockSource};
use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: ProductId,
    ) -> Result<T, SourceError> {
        let url = format!("{}/{}/{}", self.base_url, resource, id.0);
        debug!(%url, "Making API request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(%status, "API response status");

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound { resource, id });
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                SourceError::Decode(e.to_string())
            } else {
                SourceError::Transport(e.to_string())
            }
        })
    }
}

#[async_trait]
impl StockSource for HttpApi {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn stock(&self, id: ProductId) -> Result<Stock, SourceError> {
        self.get_json("stock", id).await
    }
}

#[async_trait]
impl CatalogSource for HttpApi {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, SourceError> {
        self.get_json("products", id).await
    }
}
