//! Conversions between SQLite rows and the domain types in `chores-core`.
//!
//! Timestamps are stored as RFC 3339 UTC strings truncated to whole seconds.

use chores_core::{
  log::{LogEntry, LogView},
  member::Member,
  task::{Task, TaskView},
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

/// Columns: `id, name, avatar_url, score`.
pub fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
  Ok(Member {
    id:         row.get(0)?,
    name:       row.get(1)?,
    avatar_url: row.get(2)?,
    score:      row.get(3)?,
  })
}

/// Columns: `id, title, category, points, assigned_to, name, avatar_url`.
pub fn task_view_from_row(row: &Row<'_>) -> rusqlite::Result<TaskView> {
  Ok(TaskView {
    task:            Task {
      id:          row.get(0)?,
      title:       row.get(1)?,
      category:    row.get(2)?,
      points:      row.get(3)?,
      assigned_to: row.get(4)?,
    },
    assigned_name:   row.get(5)?,
    assigned_avatar: row.get(6)?,
  })
}

// ─── Logs ────────────────────────────────────────────────────────────────────

/// A log row whose timestamp has not been parsed yet.
pub struct RawLog {
  pub id:           i64,
  pub member_id:    Option<i64>,
  pub task_id:      i64,
  pub task_title:   Option<String>,
  pub completed_at: String,
  pub member_name:  Option<String>,
}

impl RawLog {
  /// Columns: `id, member_id, task_id, task_title, completed_at, name`.
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      member_id:    row.get(1)?,
      task_id:      row.get(2)?,
      task_title:   row.get(3)?,
      completed_at: row.get(4)?,
      member_name:  row.get(5)?,
    })
  }

  pub fn into_view(self) -> Result<LogView> {
    Ok(LogView {
      entry:       LogEntry {
        id:           self.id,
        member_id:    self.member_id,
        task_id:      self.task_id,
        task_title:   self.task_title,
        completed_at: decode_dt(&self.completed_at)?,
      },
      member_name: self.member_name,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  #[test]
  fn timestamps_are_whole_seconds() {
    let dt = Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 5).unwrap()
      + chrono::Duration::milliseconds(750);
    assert_eq!(encode_dt(dt), "2024-03-01T18:30:05Z");
  }

  #[test]
  fn bad_timestamp_is_an_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
