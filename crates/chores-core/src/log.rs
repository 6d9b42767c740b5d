//! Completion log records.
//!
//! Logs are append-only. The task they point at is deleted on completion, so
//! each entry keeps a snapshot of the task title.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completion event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
  pub id:           i64,
  /// `None` when the completion credited nobody.
  pub member_id:    Option<i64>,
  pub task_id:      i64,
  pub task_title:   Option<String>,
  /// Server time, second precision.
  pub completed_at: DateTime<Utc>,
}

/// A log entry with the credited member's name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogView {
  #[serde(flatten)]
  pub entry:       LogEntry,
  pub member_name: Option<String>,
}
