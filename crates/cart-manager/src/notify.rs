//! User-facing notices for rejected cart operations.
//!
//! The caller always gets a [`CartError`] back. Notices are the presentation side of the
//! same failure: a short message meant for a toast or a status line, derived from which
//! operation failed and why, and pushed through a [`Notifier`] without waiting for
//! anyone to read it.

use crate::cart_actor::CartError;
use std::fmt::Display;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

pub const OUT_OF_STOCK: &str = "Requested quantity out of stock";
pub const ADD_FAILED: &str = "Error adding product";
pub const REMOVE_FAILED: &str = "Error removing product";
pub const UPDATE_FAILED: &str = "Error changing product quantity";

/// The caller-facing cart operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CartOperation::AddProduct => "add_product",
            CartOperation::RemoveProduct => "remove_product",
            CartOperation::UpdateProductAmount => "update_product_amount",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub operation: CartOperation,
    pub message: &'static str,
}

impl Notice {
    /// The notice shown when `operation` fails with `error`.
    pub fn for_failure(operation: CartOperation, error: &CartError) -> Self {
        let message = match (operation, error) {
            (CartOperation::AddProduct, CartError::OutOfStock { .. }) => OUT_OF_STOCK,
            (CartOperation::AddProduct, _) => ADD_FAILED,
            (CartOperation::RemoveProduct, _) => REMOVE_FAILED,
            (
                CartOperation::UpdateProductAmount,
                CartError::OutOfStock { .. } | CartError::InvalidAmount { .. },
            ) => OUT_OF_STOCK,
            (CartOperation::UpdateProductAmount, _) => UPDATE_FAILED,
        };
        Self { operation, message }
    }
}

/// Fire-and-forget delivery of notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Emits notices as `warn!` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(operation = %notice.operation, "{}", notice.message);
    }
}

/// Keeps every notice, oldest first.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.notices().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use crate::sources::SourceError;

    fn out_of_stock() -> CartError {
        CartError::OutOfStock {
            product_id: ProductId(1),
            requested: 3,
            available: 2,
        }
    }

    #[test]
    fn test_add_messages() {
        let lookup = CartError::LookupFailed(SourceError::Transport("down".into()));
        assert_eq!(
            Notice::for_failure(CartOperation::AddProduct, &out_of_stock()).message,
            OUT_OF_STOCK
        );
        assert_eq!(
            Notice::for_failure(CartOperation::AddProduct, &lookup).message,
            ADD_FAILED
        );
        assert_eq!(
            Notice::for_failure(CartOperation::AddProduct, &CartError::UnknownProduct(ProductId(1)))
                .message,
            ADD_FAILED
        );
    }

    #[test]
    fn test_remove_and_update_messages() {
        assert_eq!(
            Notice::for_failure(CartOperation::RemoveProduct, &CartError::NotInCart(ProductId(1)))
                .message,
            REMOVE_FAILED
        );
        let zero = CartError::InvalidAmount {
            product_id: ProductId(1),
            amount: 0,
        };
        assert_eq!(
            Notice::for_failure(CartOperation::UpdateProductAmount, &zero).message,
            OUT_OF_STOCK
        );
        assert_eq!(
            Notice::for_failure(CartOperation::UpdateProductAmount, &out_of_stock()).message,
            OUT_OF_STOCK
        );
        assert_eq!(
            Notice::for_failure(
                CartOperation::UpdateProductAmount,
                &CartError::NotInCart(ProductId(1))
            )
            .message,
            UPDATE_FAILED
        );
    }

    #[test]
    fn test_memory_notifier_keeps_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notice::for_failure(
            CartOperation::RemoveProduct,
            &CartError::NotInCart(ProductId(1)),
        ));
        notifier.notify(Notice::for_failure(CartOperation::AddProduct, &out_of_stock()));
        assert_eq!(notifier.messages(), vec![REMOVE_FAILED, OUT_OF_STOCK]);
    }
}
