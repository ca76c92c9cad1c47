//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a stateful resource implements to be owned by a
//! [`ResourceActor`](crate::ResourceActor). A resource is *opened* by id (hydrated from
//! wherever it lives durably), mutated only through typed actions, and *committed* after
//! every successful action.
//!
//! # Commit-or-nothing
//! The actor never lets `handle_action` touch the live copy. It stages a clone, runs the
//! action on it, then calls [`ActorEntity::on_commit`]. Only when both succeed does the
//! staged copy replace the live one. A failing action or a failing commit leaves the
//! resource exactly as it was.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_commit`] defaults to `Ok(())` for purely in-memory resources.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may await external collaborators. The `Context`
/// type is injected into every hook by [`ResourceActor::run`](crate::ResourceActor::run),
/// which lets dependencies be bound late (passed to `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The identity of a resource (a storage key, a session id, ...).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Enum representing resource-specific mutations.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per actor rather than per action: callers match on a single type,
    /// at the cost of some variants being unreachable from some actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Hydrate the resource identified by `id`.
    ///
    /// Called once, the first time the id is opened. Later opens return the live copy.
    async fn load(id: &Self::Id, ctx: &Self::Context) -> Result<Self, Self::Error>;

    /// Apply an action to a staged copy of the resource.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Make the staged copy durable. Called after a successful action, before the staged
    /// copy becomes live.
    async fn on_commit(&self, _id: &Self::Id, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
