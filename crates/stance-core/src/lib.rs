//! Core types, validation and aggregation for the Stance classroom tool.
//!
//! No HTTP or SQL lives here. Backends implement [`store::SheetStore`] and
//! the service layer is [`classroom::Classroom`].

// Store impls are written with `async fn`; the trait spells out `Send`.
#![allow(async_fn_in_trait)]

pub mod board;
pub mod classroom;
pub mod error;
pub mod memory;
pub mod row;
pub mod store;
pub mod submission;
pub mod tally;
pub mod topic;

pub use error::{Error, Result};
