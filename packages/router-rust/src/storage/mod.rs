//! Constrained key-value storage.
//!
//! Two layers:
//!
//! - **Layer 1** ([`StorageEngine`]): Low-level in-memory key-value storage
//! - **Layer 2** ([`ConstrainedStore`]): Typed facade that fixes the value
//!   domain, validates keys and dynamic writes, and enforces [`StoreConfig`]

pub mod config;
pub mod engine;
pub mod engines;
pub mod store;

pub use config::StoreConfig;
pub use engine::StorageEngine;
pub use engines::HashMapStorage;
pub use store::{ConstrainedStore, StoreError};
