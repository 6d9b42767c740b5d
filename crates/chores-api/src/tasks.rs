//! Handlers for `/tasks` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tasks` | Tasks with `AssignedName` / `AssignedAvatar` |
//! | `POST` | `/tasks` | Body: [`CreateBody`]; assignee by id or by name |
//! | `POST` | `/tasks/:id/done` | Body (optional): `{"userId": 3}` |

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
};
use chores_core::{
  store::ChoreStore,
  task::{Assignee, NewTask, Task, TaskView},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /tasks`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<TaskView>>, ApiError>
where
  S: ChoreStore,
{
  let tasks = store.list_tasks().await.map_err(ApiError::store)?;
  Ok(Json(tasks))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /tasks`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub title:         Option<String>,
  pub category:      Option<String>,
  /// Defaults to 0.
  pub points:        Option<i64>,
  /// Used as-is when present and non-zero, without checking that the
  /// member exists.
  pub assigned_id:   Option<i64>,
  /// Looked up by exact name; a new member is created when unknown.
  pub assigned_name: Option<String>,
}

impl From<CreateBody> for NewTask {
  fn from(b: CreateBody) -> Self {
    NewTask {
      title:    b.title,
      category: b.category,
      points:   b.points.unwrap_or(0),
      assignee: Assignee::from_request(b.assigned_id, b.assigned_name),
    }
  }
}

/// `POST /tasks` — returns the stored [`Task`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<Json<Task>, ApiError>
where
  S: ChoreStore,
{
  let Json(body) = body?;
  let task = store
    .create_task(NewTask::from(body))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(task))
}

// ─── Complete ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoneBody {
  /// Member credited when the task has no assignee; `0` means nobody.
  pub user_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoneResponse {
  pub success:   bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub member_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub score:     Option<i64>,
}

/// `POST /tasks/:id/done` — the body may be empty.
pub async fn complete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
  body: Bytes,
) -> Result<Json<DoneResponse>, ApiError>
where
  S: ChoreStore,
{
  let Path(id) = id?;
  let body: DoneBody = if body.iter().all(u8::is_ascii_whitespace) {
    DoneBody::default()
  } else {
    serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
  };

  let completion = store
    .complete_task(id, body.user_id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

  Ok(Json(DoneResponse {
    success:   true,
    member_id: completion.member_id,
    score:     completion.score,
  }))
}
