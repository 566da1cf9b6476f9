//! trivia-store — Catalog store backends.
//!
//! Implements the `CatalogStore` trait for an in-memory catalog and a
//! TOML-file catalog, and loads the service configuration that picks between
//! them.

pub mod config;
pub mod drifting;
pub mod error;
pub mod file;
pub mod memory;

pub use config::{create_store, load_config, StoreConfig, TriviaConfig};
pub use drifting::DriftingStore;
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
