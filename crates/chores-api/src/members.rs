//! Handlers for `/members` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/members` | All members with their scores |
//! | `POST` | `/members` | Body: `{"name":"Alice","avatarUrl":"..."}`; returns 201 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use chores_core::{
  member::{Member, NewMember},
  store::ChoreStore,
};

use crate::error::ApiError;

/// `GET /members`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Member>>, ApiError>
where
  S: ChoreStore,
{
  let members = store.list_members().await.map_err(ApiError::store)?;
  Ok(Json(members))
}

/// `POST /members` — returns 201 + the stored [`Member`].
///
/// Names must be non-empty; a duplicate name is rejected by the store.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewMember>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ChoreStore,
{
  let Json(body) = body?;
  if body.name.is_empty() {
    return Err(ApiError::BadRequest("member name is empty".to_string()));
  }

  let member = store.add_member(body).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(member)))
}
