//! # Generic Messages
//!
//! The requests a [`ResourceClient`](crate::ResourceClient) sends to its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// - **Open**: hydrate the resource through [`ActorEntity::load`] if it is not live yet,
///   and return a snapshot of it.
/// - **Get**: snapshot of a live resource, `None` if it was never opened.
/// - **Action**: run an [`ActorEntity::Action`] against a staged copy and commit it.
///
/// Every variant is generic over `T: ActorEntity`, so a cart action can never be sent to
/// an actor that owns some other resource type.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Open {
        id: T::Id,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
