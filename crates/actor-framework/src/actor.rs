//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the single writer for every resource of one
//! entity type. It processes messages sequentially and owns the live copies exclusively,
//! so a read-modify-write on a resource can never interleave with another one.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection of resources.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the live resources (`store`) and
/// the receiver end of the channel. Each message is handled to completion, including any
/// awaits inside entity hooks, before the next one is received. That is what serializes
/// concurrent callers: two clients racing to mutate the same resource are queued, not
/// interleaved.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { hits: u32 }
/// #[derive(Debug)] enum CounterAction { Hit }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = String;
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     async fn load(_: &String, _: &()) -> Result<Self, Self::Error> { Ok(Self { hits: 0 }) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     client.open("home".to_string()).await.unwrap();
///     let hits = client.perform_action("home".to_string(), CounterAction::Hit).await.unwrap();
///     assert_eq!(hits, 1);
/// }
/// ```
///
/// ## Operations
///
/// * **Open**: returns the live copy if present, otherwise calls `T::load` and stores the result.
/// * **Get**: returns a clone of the live copy, or `None`.
/// * **Action**:
///     1. Clones the live copy into a staged copy.
///     2. Calls `handle_action` on the staged copy.
///     3. Calls `on_commit` on the staged copy.
///     4. Replaces the live copy with the staged one.
///
///   A failure at step 2 or 3 drops the staged copy.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. When the channel is full, client
    /// calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// # Context Injection
    /// The `context` argument is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Cart" instead of "cart_manager::model::cart::Cart")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Open { id, respond_to } => {
                    if let Some(item) = self.store.get(&id) {
                        debug!(entity_type, %id, "Open (live)");
                        let _ = respond_to.send(Ok(item.clone()));
                        continue;
                    }
                    match T::load(&id, &context).await {
                        Ok(item) => {
                            self.store.insert(id.clone(), item.clone());
                            info!(entity_type, %id, size = self.store.len(), "Opened");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Open failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(live) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };

                    let mut staged = live.clone();
                    let outcome = match staged.handle_action(action, &context).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };

                    if let Err(e) = staged.on_commit(&id, &context).await {
                        warn!(entity_type, %id, error = %e, "Commit failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }

                    self.store.insert(id.clone(), staged);
                    info!(entity_type, %id, "Action ok");
                    let _ = respond_to.send(Ok(outcome));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
