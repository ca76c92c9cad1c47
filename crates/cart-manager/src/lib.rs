//! # Cart Manager
//!
//! Shopping-cart state for a storefront session. The cart is owned by a single actor, so
//! adds, removes and amount changes from any number of callers are applied one at a time,
//! each checked against the remote stock and written to durable storage before it becomes
//! visible.
//!
//! - [`model`]: [`Cart`](model::Cart), [`CartItem`](model::CartItem), products and stock
//! - [`cart_actor`]: the cart's mutation rules and [`CartError`](cart_actor::CartError)
//! - [`clients`]: [`CartClient`](clients::CartClient), the caller-facing API
//! - [`sources`]: stock and catalog lookups (REST or in-memory)
//! - [`storage`]: durable key-value storage (files or in-memory)
//! - [`notify`]: user-facing notices for rejected operations
//! - [`config`]: TOML configuration
//! - [`lifecycle`]: [`CartSystem`](lifecycle::CartSystem), which starts and stops it all

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod sources;
pub mod storage;
