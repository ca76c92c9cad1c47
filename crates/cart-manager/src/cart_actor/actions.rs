//! Custom actions for the Cart actor.
//!
//! The three cart mutations. Each runs inside the cart's actor, against a staged copy,
//! and is committed to durable storage before the caller hears back.

use crate::model::{AmountUpdate, CartItem, ProductId};

/// Mutations of a [`Cart`](crate::model::Cart).
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit of a product: a new line with amount 1, or the existing line plus one.
    ///
    /// # Errors
    /// Fails with `OutOfStock` when the resulting amount would exceed the stock.
    AddProduct(ProductId),
    /// Removes the whole line for a product.
    RemoveProduct(ProductId),
    /// Sets the amount of an existing line to a literal value.
    UpdateProductAmount(AmountUpdate),
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// The line as it is after the add
    AddProduct(CartItem),
    /// The line that was removed
    RemoveProduct(CartItem),
    /// The line with its new amount
    UpdateProductAmount(CartItem),
}
