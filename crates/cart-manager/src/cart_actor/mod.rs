//! # Cart Actor
//!
//! The single writer for carts. Every mutation of a cart is a [`CartAction`] processed by
//! one [`ResourceActor<Cart>`](actor_framework::ResourceActor), so concurrent callers are
//! queued instead of racing on a read-modify-write.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Cart`]
//!   and the [`CartContext`] it runs with
//! - [`error`] - [`CartError`], the tagged outcome of a rejected operation
//! - [`actions`] - [`CartAction`] and [`CartActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Rules
//!
//! | Action | Looks up | Rejected when |
//! |--------|----------|---------------|
//! | `AddProduct` | stock, then catalog for a new line | current amount ≥ stock (`OutOfStock`) |
//! | `RemoveProduct` | nothing | no line for the product (`NotInCart`) |
//! | `UpdateProductAmount` | stock, always first | amount is 0 (`InvalidAmount`), amount > stock (`OutOfStock`), no line (`NotInCart`) |
//!
//! Lookup failures surface as `UnknownProduct` (the source answered 404) or `LookupFailed`.
//!
//! ## Usage
//!
//! ```rust
//! use cart_manager::cart_actor::{self, CartAction, CartContext};
//! use cart_manager::model::{CartId, Product, ProductId};
//! use cart_manager::sources::InMemorySource;
//! use cart_manager::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(InMemorySource::new());
//!     source.insert(Product::new(ProductId(1), "Shoe", 100.0, ""), 5);
//!     let ctx = CartContext::new(source.clone(), source, Arc::new(MemoryStore::new()));
//!
//!     let (actor, client) = cart_actor::new();
//!     tokio::spawn(actor.run(ctx));
//!
//!     let id = CartId::namespaced("@demo");
//!     client.open(id.clone()).await?;
//!     client.perform_action(id, CartAction::AddProduct(ProductId(1))).await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::CartContext;
pub use error::*;

use crate::model::Cart;
use actor_framework::{ResourceActor, ResourceClient};

/// Channel capacity used by [`new()`].
pub const DEFAULT_BUFFER_SIZE: usize = 32;

/// Creates a new Cart actor and its client.
pub fn new() -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    with_buffer(DEFAULT_BUFFER_SIZE)
}

/// Creates a new Cart actor whose request channel holds `buffer_size` pending requests.
///
/// # Panics
/// Panics if `buffer_size` is 0. [`CartSystem::with_parts`](crate::lifecycle::CartSystem::with_parts)
/// rejects that value before getting here.
pub fn with_buffer(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
