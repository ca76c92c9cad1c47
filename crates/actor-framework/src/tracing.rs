//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the whole process.
//!
//! The actor emits one event per request with structured fields (`entity_type`, `id`).
//! Clients open a span per call through `#[tracing::instrument]`; the actor runs in its
//! own task, so its events stand outside those spans:
//!
//! ```text
//! INFO Actor started entity_type="Cart"
//! INFO Opened entity_type="Cart" id=@RocketShoes:cart size=1
//! INFO Incremented product_id=product_1 amount=2
//! INFO Action ok entity_type="Cart" id=@RocketShoes:cart
//! ```
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run                          # lifecycle and commits
//! RUST_LOG=debug cargo run                         # every request with its payload
//! RUST_LOG=actor_framework=debug,info cargo run    # only the actor internals at debug
//! ```

/// Installs a global `tracing` subscriber filtered by `RUST_LOG`.
///
/// Module paths are hidden (`with_target(false)`): the actor already tags every event with
/// `entity_type`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
