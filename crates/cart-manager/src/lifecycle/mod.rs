//! # System Lifecycle
//!
//! [`CartSystem`] wires the cart actor to its collaborators, starts it, opens the session
//! cart and hands out a [`CartClient`]. Dropping the client closes the actor's channel;
//! [`CartSystem::shutdown`] does that and then waits for the actor task to finish.
//!
//! Collaborators are injected through the actor's context at `run()`, so tests can start
//! the same system over in-memory sources and storage with [`CartSystem::with_parts`].

use crate::cart_actor::{self, CartContext, CartError};
use crate::clients::CartClient;
use crate::config::{CartConfig, ConfigError};
use crate::model::CartId;
use crate::notify::{Notifier, TracingNotifier};
use crate::sources::HttpApi;
use crate::storage::FileStore;
use actor_framework::ActorClient;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot open cart: {0}")]
    Cart(#[from] CartError),

    #[error("Actor buffer size must be at least 1")]
    ZeroBufferSize,
}

pub struct CartSystem {
    /// Client bound to the session cart
    pub cart_client: CartClient,

    /// Task handle for the cart actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl CartSystem {
    /// Starts a system talking to the REST API and storing the cart on disk, as described
    /// by `config`. Notices go to the log.
    pub async fn start(config: &CartConfig) -> Result<Self, StartupError> {
        config.validate()?;

        let api = Arc::new(HttpApi::new(config.api.base_url.clone()));
        let store = Arc::new(FileStore::new(config.storage.directory.clone()));
        info!(
            base_url = %config.api.base_url,
            directory = %config.storage.directory.display(),
            "Starting cart system"
        );

        let system = Self::with_parts(
            CartContext::new(api.clone(), api, store),
            Arc::new(TracingNotifier),
            config.cart_key(),
            config.actor.buffer_size,
        )
        .await?;
        Ok(system)
    }

    /// Starts the cart actor over the given collaborators and opens `cart_id`.
    pub async fn with_parts(
        context: CartContext,
        notifier: Arc<dyn Notifier>,
        cart_id: CartId,
        buffer_size: usize,
    ) -> Result<Self, StartupError> {
        if buffer_size == 0 {
            return Err(StartupError::ZeroBufferSize);
        }

        let (actor, client) = cart_actor::with_buffer(buffer_size);
        let handle = tokio::spawn(actor.run(context));

        let cart_client = CartClient::new(client, cart_id.clone(), notifier);
        let system = Self {
            cart_client,
            handle,
        };

        let opened = system.cart_client.open(cart_id).await;
        match opened {
            Ok(cart) => {
                info!(cart_id = %cart.id, size = cart.size(), "Cart ready");
                Ok(system)
            }
            Err(e) => {
                // Stop the actor before reporting; nobody else holds its client.
                let _ = system.shutdown().await;
                Err(e.into())
            }
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops the client, which closes the actor's channel, then waits for the actor task.
    /// Clones of the client handed out earlier keep the actor alive until they are dropped
    /// too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system...");
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
