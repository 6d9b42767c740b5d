//! JSON REST API for the chores tracker.
//!
//! Exposes an axum [`Router`] backed by any [`chores_core::store::ChoreStore`].
//! Static files, tracing, and the listener are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", chores_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod logs;
pub mod members;
pub mod tasks;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use chores_core::store::ChoreStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ChoreStore + 'static,
{
  Router::new()
    // Tasks
    .route("/tasks", get(tasks::list::<S>).post(tasks::create::<S>))
    .route("/tasks/{id}/done", post(tasks::complete::<S>))
    // Members
    .route("/members", get(members::list::<S>).post(members::create::<S>))
    // Logs
    .route("/logs", get(logs::list::<S>))
    .with_state(store)
}

// ─── Router tests ─────────────────────────────────────────────────────────────
