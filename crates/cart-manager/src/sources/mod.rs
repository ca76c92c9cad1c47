//! Read-only remote collaborators: where stock levels and product metadata come from.
//!
//! The cart never talks to the network directly. It is handed an
//! `Arc<dyn StockSource>` and an `Arc<dyn CatalogSource>` through its actor context, so
//! the REST client ([`HttpApi`]) and the in-process fake ([`InMemorySource`]) are
//! interchangeable.

pub mod http;
pub mod memory;

pub use http::HttpApi;
pub use memory::InMemorySource;

use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised while looking up stock or catalog data.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    /// The source does not know the product.
    #[error("{resource} not found for {id}")]
    NotFound {
        resource: &'static str,
        id: ProductId,
    },

    /// The source answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The request never got an answer (connection refused, reset, DNS, ...).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Lookup of the available quantity for a product.
#[async_trait]
pub trait StockSource: Send + Sync {
    async fn stock(&self, id: ProductId) -> Result<Stock, SourceError>;
}

/// Lookup of product metadata.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn product(&self, id: ProductId) -> Result<Product, SourceError>;
}
