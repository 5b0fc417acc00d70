//! SQLite backend for the Stance sheet store.
//!
//! Each partition is a run of rows in one table. Queries run through
//! [`tokio_rusqlite`] on its own thread.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
