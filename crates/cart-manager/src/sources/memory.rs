//! In-process catalog and stock, for demos and tests.
use super::{CatalogSource, SourceError, StockSource};
use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// A catalog and a stock table held in memory.
///
/// Stock is owned by the source: carts read it, only [`InMemorySource::set_stock`] changes
/// it. [`InMemorySource::fail_lookups`] makes every lookup fail with a transport error.
#[derive(Debug, Default)]
pub struct InMemorySource {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, u32>>,
    failing: AtomicBool,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product with its available amount.
    pub fn insert(&self, product: Product, amount: u32) {
        let id = product.id;
        self.products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, product);
        self.set_stock(id, amount);
    }

    pub fn set_stock(&self, id: ProductId, amount: u32) {
        self.stock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, amount);
    }

    pub fn fail_lookups(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<(), SourceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::Transport("source unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StockSource for InMemorySource {
    async fn stock(&self, id: ProductId) -> Result<Stock, SourceError> {
        self.check_reachable()?;
        self.stock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .map(|&amount| Stock { amount })
            .ok_or(SourceError::NotFound {
                resource: "stock",
                id,
            })
    }
}

#[async_trait]
impl CatalogSource for InMemorySource {
    async fn product(&self, id: ProductId) -> Result<Product, SourceError> {
        self.check_reachable()?;
        self.products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(SourceError::NotFound {
                resource: "products",
                id,
            })
    }
}
