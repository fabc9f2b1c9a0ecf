//! SQLite backend for the TDLB target store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. One `SqliteStore` owns one
//! session; its operations execute serially against that session.

mod encode;
mod registry;
mod schema;
mod store;
mod write;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
