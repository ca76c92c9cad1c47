//! Error types for the Cart actor.

use crate::model::ProductId;
use crate::sources::SourceError;
use crate::storage::StoreError;
use thiserror::Error;

/// Why a cart operation was rejected.
///
/// Every variant leaves the cart exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The product has no line in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// The catalog or stock service does not know the product.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// The requested amount exceeds the available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The requested amount is not a valid cart quantity (zero).
    #[error("Invalid amount for {product_id}: {amount}")]
    InvalidAmount { product_id: ProductId, amount: u32 },

    /// A stock or catalog lookup failed for a reason other than an unknown product.
    #[error("Lookup failed: {0}")]
    LookupFailed(SourceError),

    /// The new cart could not be persisted.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<SourceError> for CartError {
    fn from(e: SourceError) -> Self {
        match e {
            SourceError::NotFound { id, .. } => CartError::UnknownProduct(id),
            other => CartError::LookupFailed(other),
        }
    }
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunication(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_becomes_unknown_product() {
        let err: CartError = SourceError::NotFound {
            resource: "stock",
            id: ProductId(4),
        }
        .into();
        assert_eq!(err, CartError::UnknownProduct(ProductId(4)));

        let err: CartError = SourceError::Transport("refused".into()).into();
        assert!(matches!(err, CartError::LookupFailed(SourceError::Transport(_))));
    }
}
