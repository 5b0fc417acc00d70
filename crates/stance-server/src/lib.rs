//! HTTP server wiring for Stance.
//!
//! Turns a [`ServerConfig`] and any [`SheetStore`] into the application
//! [`Router`]: the JSON API under `/api`, a liveness check, and request
//! tracing.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use serde::Deserialize;
use stance_core::{
  classroom::Classroom,
  store::{SheetStore, StoreLayout},
  topic::TopicCatalog,
};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/stance/stance.db") }

/// Runtime server configuration, deserialised from `config.toml` and
/// `STANCE_*` environment variables.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// Keep all rows in process memory instead of `store_path`.
  #[serde(default)]
  pub in_memory:  bool,
  #[serde(default)]
  pub topics:     TopicCatalog,
  #[serde(default)]
  pub layout:     StoreLayout,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       default_host(),
      port:       default_port(),
      store_path: default_store_path(),
      in_memory:  false,
      topics:     TopicCatalog::default(),
      layout:     StoreLayout::default(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// Build the classroom this configuration describes over `store`.
  pub fn classroom<S: SheetStore>(&self, store: S) -> Classroom<S> {
    Classroom::new(store, self.topics.clone(), self.layout.clone())
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(classroom: Arc<Classroom<S>>) -> Router
where
  S: SheetStore + 'static,
{
  Router::new()
    .route("/healthz", get(healthz))
    .nest("/api", stance_api::api_router(classroom))
    .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str { "ok" }

// ─── Integration tests ────────────────────────────────────────────────────────
