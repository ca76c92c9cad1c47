//! # Actor Framework
//!
//! Building blocks for single-writer resource actors on Tokio.
//!
//! A resource (a shopping cart, a session, a document) is owned by exactly one
//! [`ResourceActor`] task. Callers never touch the state directly: they hold a cloneable
//! [`ResourceClient`] and send it typed requests over an mpsc channel, getting the answer
//! back on a oneshot channel. Because the actor handles one request at a time, every
//! read-modify-write on a resource is serialized without a lock.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - how a resource is loaded, mutated and committed
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing, staging and commit
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//!
//! ## Commit-or-nothing actions
//!
//! Actions run against a staged clone of the resource. The staged clone is committed
//! through [`ActorEntity::on_commit`] (typically a write to durable storage) and only then
//! replaces the live copy. If either the action or the commit fails, the live copy is left
//! untouched and the caller receives the entity's error inside
//! [`FrameworkError::EntityError`].
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Wallet { balance: u32 }
//!
//! #[derive(Debug)]
//! enum WalletAction { Spend(u32) }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("insufficient funds")]
//! struct WalletError;
//!
//! #[async_trait]
//! impl ActorEntity for Wallet {
//!     type Id = String;
//!     type Action = WalletAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = WalletError;
//!
//!     async fn load(_: &String, _: &()) -> Result<Self, Self::Error> {
//!         Ok(Self { balance: 10 })
//!     }
//!
//!     async fn handle_action(&mut self, action: WalletAction, _: &()) -> Result<u32, Self::Error> {
//!         let WalletAction::Spend(amount) = action;
//!         self.balance = self.balance.checked_sub(amount).ok_or(WalletError)?;
//!         Ok(self.balance)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Wallet>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = "alice".to_string();
//!     client.open(id.clone()).await.unwrap();
//!     assert_eq!(client.perform_action(id.clone(), WalletAction::Spend(4)).await.unwrap(), 6);
//!     assert!(client.perform_action(id.clone(), WalletAction::Spend(50)).await.is_err());
//!
//!     // The failed spend left the balance alone
//!     assert_eq!(client.get(id).await.unwrap().unwrap().balance, 6);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected at **runtime** via [`ResourceActor::run`], not at construction
//! time. The actor hands its `Context` to every hook, so an entity can reach remote
//! services or a storage backend without owning them.
//!
//! ## Testing
//!
//! The [`mock`] module provides a [`MockClient`](mock::MockClient) and channel helpers for
//! testing client wrappers without spawning an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
