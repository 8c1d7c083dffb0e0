//! PlayIt catalog server library
//!
//! Loads an artists/albums/tracks YAML document into SQLite and serves
//! browse and search views over HTTP as JSON.

pub mod catalog;
pub mod catalog_store;
pub mod config;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, prepare_catalog, LoadError, LoadSummary};
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
