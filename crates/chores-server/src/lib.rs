//! HTTP server wiring for the chores tracker.
//!
//! Mounts the JSON API under `/api` and serves the static client from a
//! directory for every other path.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use chores_core::store::ChoreStore;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CHORES_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Directory holding `index.html` and the client assets.
  pub static_dir: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "0.0.0.0".to_string(),
      port:       3000,
      store_path: PathBuf::from("database.db"),
      static_dir: PathBuf::from("public"),
    }
  }
}

impl ServerConfig {
  /// Layer the (optional) file at `path` and the environment over the
  /// defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CHORES"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: API, static client, request tracing.
pub fn router<S>(store: Arc<S>, static_dir: impl AsRef<Path>) -> Router
where
  S: ChoreStore + 'static,
{
  Router::new()
    .nest("/api", chores_api::api_router(store))
    .fallback_service(ServeDir::new(static_dir))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chores_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  const INDEX: &str = "<!doctype html><title>Chores</title>";

  async fn app(static_dir: &Path) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store), static_dir)
  }

  async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
      .headers()
      .get(header::CONTENT_TYPE)
      .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, content_type, bytes.to_vec())
  }

  #[tokio::test]
  async fn root_serves_index_html() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX).unwrap();

    let (status, content_type, body) = get(app(dir.path()).await, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert_eq!(body, INDEX.as_bytes());
  }

  #[tokio::test]
  async fn api_is_nested() {
    let dir = tempfile::tempdir().unwrap();

    let (status, content_type, body) = get(app(dir.path()).await, "/api/tasks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(serde_json::from_slice::<serde_json::Value>(&body).unwrap(), serde_json::json!([]));
  }

  #[tokio::test]
  async fn unknown_static_path_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, _) = get(app(dir.path()).await, "/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[test]
  fn missing_config_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.port, ServerConfig::default().port);
    assert_eq!(cfg.static_dir, PathBuf::from("public"));
  }

  #[test]
  fn config_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 8080\nstore_path = \"/tmp/chores.db\"\n").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/chores.db"));
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.address(), "0.0.0.0:8080");
  }
}
