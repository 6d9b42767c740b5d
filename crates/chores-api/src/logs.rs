//! Handler for `GET /logs` — completion history, newest first.

use std::sync::Arc;

use axum::{Json, extract::State};
use chores_core::{log::LogView, store::ChoreStore};

use crate::error::ApiError;

/// `GET /logs`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<LogView>>, ApiError>
where
  S: ChoreStore,
{
  let logs = store.list_logs().await.map_err(ApiError::store)?;
  Ok(Json(logs))
}
