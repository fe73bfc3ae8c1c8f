//! HTTP server assembly for snip.
//!
//! Owns the runtime configuration shape and builds the full application
//! router (JSON API under `/api`, request tracing). The `snipd` binary in
//! `main.rs` wires this to a [`SqliteStore`](snip_store_sqlite::SqliteStore).

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use serde::Deserialize;
use snip_core::store::SnippetStore;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from three sources, weakest first: built-in defaults, an optional
/// TOML file, and `SNIP_*` environment variables — so `SNIP_PORT=8080`
/// overrides the default port 3000 with no file present.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Load configuration; `path` is read only if it exists.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("store_path", "snip.sqlite")?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("SNIP"))
      .build()
      .context("failed to read configuration")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router: the JSON API nested under `/api`, with
/// request-level tracing spans.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: SnippetStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", snip_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
