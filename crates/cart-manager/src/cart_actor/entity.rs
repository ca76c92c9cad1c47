//! ActorEntity trait implementation for the Cart.
//!
//! This is where the cart's consistency rules live:
//!
//! - a product appears on at most one line;
//! - a line's amount is at least 1 and never more than the stock the stock source reports
//!   at the time of the change (requests are rejected, never clamped);
//! - after every successful action the stored cart equals the live one
//!   (`on_commit` runs before the actor makes the staged cart live).

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::model::{AmountUpdate, Cart, CartId, CartItem, ProductId};
use crate::sources::{CatalogSource, StockSource};
use crate::storage::{DurableStore, StoreError};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Collaborators injected into the cart actor at `run()`.
#[derive(Clone)]
pub struct CartContext {
    pub stock: Arc<dyn StockSource>,
    pub catalog: Arc<dyn CatalogSource>,
    pub store: Arc<dyn DurableStore>,
}

impl CartContext {
    pub fn new(
        stock: Arc<dyn StockSource>,
        catalog: Arc<dyn CatalogSource>,
        store: Arc<dyn DurableStore>,
    ) -> Self {
        Self {
            stock,
            catalog,
            store,
        }
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CartContext;
    type Error = CartError;

    /// Reads the stored cart. Absent means empty. Content that does not parse, or that
    /// breaks the line invariants, also means empty and is replaced by the next
    /// successful commit.
    async fn load(id: &CartId, ctx: &CartContext) -> Result<Self, Self::Error> {
        let Some(json) = ctx.store.read(id.as_str()).await? else {
            debug!(cart_id = %id, "No stored cart");
            return Ok(Cart::empty(id.clone()));
        };

        let checked = Cart::items_from_json(&json)
            .map_err(|e| e.to_string())
            .and_then(|items| check_lines(&items).map(|()| items));
        match checked {
            Ok(items) => Ok(Cart::new(id.clone(), items)),
            Err(reason) => {
                warn!(cart_id = %id, %reason, "Stored cart is unreadable, starting empty");
                Ok(Cart::empty(id.clone()))
            }
        }
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartActionResult, Self::Error> {
        match action {
            CartAction::AddProduct(product_id) => self
                .add_product(product_id, ctx)
                .await
                .map(CartActionResult::AddProduct),
            CartAction::RemoveProduct(product_id) => self
                .remove_product(product_id)
                .map(CartActionResult::RemoveProduct),
            CartAction::UpdateProductAmount(update) => self
                .update_product_amount(update, ctx)
                .await
                .map(CartActionResult::UpdateProductAmount),
        }
    }

    /// Overwrites the stored cart with this one.
    async fn on_commit(&self, id: &CartId, ctx: &CartContext) -> Result<(), Self::Error> {
        let json = self.to_json().map_err(|e| StoreError::Encode {
            key: id.to_string(),
            message: e.to_string(),
        })?;
        ctx.store.write(id.as_str(), &json).await?;
        debug!(cart_id = %id, items = self.len(), "Committed");
        Ok(())
    }
}

/// One line per product, every amount at least 1.
fn check_lines(items: &[CartItem]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.amount == 0 {
            return Err(format!("zero amount for {}", item.id()));
        }
        if !seen.insert(item.id()) {
            return Err(format!("duplicate line for {}", item.id()));
        }
    }
    Ok(())
}

impl Cart {
    async fn add_product(
        &mut self,
        product_id: ProductId,
        ctx: &CartContext,
    ) -> Result<CartItem, CartError> {
        let stock = ctx.stock.stock(product_id).await?;

        if let Some(item) = self.item_mut(product_id) {
            if item.amount >= stock.amount {
                return Err(CartError::OutOfStock {
                    product_id,
                    requested: item.amount + 1,
                    available: stock.amount,
                });
            }
            item.amount += 1;
            info!(%product_id, amount = item.amount, "Incremented");
            return Ok(item.clone());
        }

        if stock.amount == 0 {
            return Err(CartError::OutOfStock {
                product_id,
                requested: 1,
                available: 0,
            });
        }

        let product = ctx.catalog.product(product_id).await?;
        let item = CartItem::new(product, 1);
        self.items.push(item.clone());
        info!(%product_id, size = self.len(), "Added");
        Ok(item)
    }

    fn remove_product(&mut self, product_id: ProductId) -> Result<CartItem, CartError> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id() == product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        let removed = self.items.remove(pos);
        info!(%product_id, size = self.len(), "Removed");
        Ok(removed)
    }

    async fn update_product_amount(
        &mut self,
        update: AmountUpdate,
        ctx: &CartContext,
    ) -> Result<CartItem, CartError> {
        let AmountUpdate { product_id, amount } = update;
        let stock = ctx.stock.stock(product_id).await?;

        if amount == 0 {
            return Err(CartError::InvalidAmount { product_id, amount });
        }
        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let item = self
            .item_mut(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        item.amount = amount;
        info!(%product_id, amount, "Amount set");
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use crate::sources::InMemorySource;
    use crate::storage::MemoryStore;

    const KEY: &str = "@test:cart";

    fn context(source: Arc<InMemorySource>, store: Arc<MemoryStore>) -> CartContext {
        CartContext::new(source.clone(), source, store)
    }

    fn shoe() -> Product {
        Product::new(ProductId(1), "Shoe", 100.0, "shoe.jpg")
    }

    #[tokio::test]
    async fn test_load_absent_is_empty() {
        let ctx = context(Arc::new(InMemorySource::new()), Arc::new(MemoryStore::new()));
        let cart = Cart::load(&CartId(KEY.into()), &ctx).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupted_is_empty() {
        let store = Arc::new(MemoryStore::with_entry(KEY, "{not json"));
        let ctx = context(Arc::new(InMemorySource::new()), store);
        let cart = Cart::load(&CartId(KEY.into()), &ctx).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_load_stored_items() {
        let store = Arc::new(MemoryStore::with_entry(
            KEY,
            r#"[{"id":1,"name":"Shoe","price":100.0,"image":"shoe.jpg","amount":2}]"#,
        ));
        let ctx = context(Arc::new(InMemorySource::new()), store);
        let cart = Cart::load(&CartId(KEY.into()), &ctx).await.unwrap();
        assert_eq!(cart.items(), &[CartItem::new(shoe(), 2)]);
    }

    #[tokio::test]
    async fn test_add_new_product_with_no_stock_is_rejected() {
        let source = Arc::new(InMemorySource::new());
        source.insert(shoe(), 0);
        let ctx = context(source, Arc::new(MemoryStore::new()));

        let mut cart = Cart::empty(CartId(KEY.into()));
        let err = cart
            .handle_action(CartAction::AddProduct(ProductId(1)), &ctx)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: ProductId(1),
                requested: 1,
                available: 0
            }
        );
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_load_duplicate_lines_is_empty() {
        let store = Arc::new(MemoryStore::with_entry(
            KEY,
            r#"[{"id":1,"name":"Shoe","price":100.0,"amount":2},
                {"id":1,"name":"Shoe","price":100.0,"amount":3}]"#,
        ));
        let ctx = context(Arc::new(InMemorySource::new()), store);
        let cart = Cart::load(&CartId(KEY.into()), &ctx).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_load_zero_amount_is_empty() {
        let store = Arc::new(MemoryStore::with_entry(
            KEY,
            r#"[{"id":1,"name":"Shoe","price":100.0,"amount":0}]"#,
        ));
        let ctx = context(Arc::new(InMemorySource::new()), store);
        let cart = Cart::load(&CartId(KEY.into()), &ctx).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_update_looks_up_stock_before_checking_amount() {
        let source = Arc::new(InMemorySource::new());
        source.fail_lookups(true);
        let ctx = context(source, Arc::new(MemoryStore::new()));

        let mut cart = Cart::new(CartId(KEY.into()), vec![CartItem::new(shoe(), 1)]);
        let err = cart
            .handle_action(
                CartAction::UpdateProductAmount(AmountUpdate {
                    product_id: ProductId(1),
                    amount: 0,
                }),
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CartError::LookupFailed(_)));
        assert_eq!(cart.items(), &[CartItem::new(shoe(), 1)]);
    }

    #[tokio::test]
    async fn test_commit_writes_items_under_cart_key() {
        let store = Arc::new(MemoryStore::new());
        let ctx = context(Arc::new(InMemorySource::new()), store.clone());

        let cart = Cart::new(CartId(KEY.into()), vec![CartItem::new(shoe(), 3)]);
        cart.on_commit(&cart.id, &ctx).await.unwrap();

        let stored = Cart::items_from_json(&store.get(KEY).unwrap()).unwrap();
        assert_eq!(stored, cart.items());
    }
}
