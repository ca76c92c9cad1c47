//! Durable key-value storage for serialized carts.
//!
//! A cart is read once when it is opened and overwritten wholesale after every successful
//! mutation. There are no partial or field-level writes.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("storage I/O error on {key}: {message}")]
    Io { key: String, message: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("could not encode value for {key}: {message}")]
    Encode { key: String, message: String },
}

#[async_trait]
pub trait DurableStore: Send + Sync {
    /// The value stored under `key`, `None` if nothing was ever written.
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
