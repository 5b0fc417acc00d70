//! JSON REST API for Stance.
//!
//! Exposes an axum [`Router`] backed by a [`Classroom`] over any
//! [`stance_core::store::SheetStore`]. TLS and transport concerns are the
//! caller's responsibility; there is no authentication.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", stance_api::api_router(classroom.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod results;
pub mod submissions;
pub mod topics;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use stance_core::{classroom::Classroom, store::SheetStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `classroom`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(classroom: Arc<Classroom<S>>) -> Router<()>
where
  S: SheetStore + 'static,
{
  Router::new()
    .route("/topics", get(topics::list::<S>))
    .route("/topics/{topic}/submissions", post(submissions::create::<S>))
    .route("/topics/{topic}/rows", get(results::rows::<S>))
    .route("/topics/{topic}/tally", get(results::tally::<S>))
    .route("/topics/{topic}/board", get(results::board::<S>))
    .route("/topics/{topic}/results", get(results::results::<S>))
    .with_state(classroom)
}
