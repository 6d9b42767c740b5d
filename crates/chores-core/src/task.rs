//! Tasks, assignee resolution input, and completion results.
//!
//! A task has no "done" state. Completing it deletes the row and leaves a
//! [`LogEntry`](crate::log::LogEntry) behind as the only durable trace.

use serde::{Deserialize, Serialize};

use crate::member::member_ref;

// ─── Stored task ─────────────────────────────────────────────────────────────

/// A task row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
  pub id:          i64,
  pub title:       Option<String>,
  pub category:    Option<String>,
  pub points:      i64,
  /// Member id the task is assigned to. Not checked for existence when set
  /// by id, so it may dangle.
  pub assigned_to: Option<i64>,
}

/// A task enriched with its assignee's display fields.
///
/// Both enrichment fields are `null` when the task is unassigned or the
/// assignee id does not resolve to a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
  #[serde(flatten)]
  pub task:            Task,
  #[serde(rename = "AssignedName")]
  pub assigned_name:   Option<String>,
  #[serde(rename = "AssignedAvatar")]
  pub assigned_avatar: Option<String>,
}

// ─── Creation input ──────────────────────────────────────────────────────────

/// Who a new task should be assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignee {
  /// An existing member id, used as-is.
  Id(i64),
  /// A display name; the member is created if no member has this name.
  Name(String),
}

impl Assignee {
  /// Pick the assignee from the two optional request fields.
  ///
  /// An explicit id wins over a name. An id of `0` or an empty name counts
  /// as absent.
  pub fn from_request(id: Option<i64>, name: Option<String>) -> Option<Self> {
    match (member_ref(id), name) {
      (Some(id), _) => Some(Self::Id(id)),
      (None, Some(name)) if !name.is_empty() => Some(Self::Name(name)),
      _ => None,
    }
  }
}

/// Input for [`ChoreStore::create_task`](crate::store::ChoreStore::create_task).
#[derive(Debug, Clone, Default)]
pub struct NewTask {
  pub title:    Option<String>,
  pub category: Option<String>,
  pub points:   i64,
  pub assignee: Option<Assignee>,
}

// ─── Completion ──────────────────────────────────────────────────────────────

/// Outcome of completing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
  pub task_id:   i64,
  /// The member credited: the task's assignee, else the caller's fallback.
  pub member_id: Option<i64>,
  /// The credited member's score after the increment.
  pub score:     Option<i64>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn assignee_id_wins_over_name() {
    let a = Assignee::from_request(Some(3), Some("Alice".into()));
    assert_eq!(a, Some(Assignee::Id(3)));
  }

  #[test]
  fn assignee_from_name() {
    let a = Assignee::from_request(None, Some("Alice".into()));
    assert_eq!(a, Some(Assignee::Name("Alice".into())));
  }

  #[test]
  fn empty_name_is_unassigned() {
    assert_eq!(Assignee::from_request(None, Some(String::new())), None);
    assert_eq!(Assignee::from_request(None, None), None);
  }

  #[test]
  fn zero_id_falls_back_to_name() {
    let a = Assignee::from_request(Some(0), Some("Alice".into()));
    assert_eq!(a, Some(Assignee::Name("Alice".into())));
    assert_eq!(Assignee::from_request(Some(0), None), None);
  }

  #[test]
  fn task_view_serializes_enrichment_fields() {
    let view = TaskView {
      task:            Task {
        id:          1,
        title:       Some("Dishes".into()),
        category:    Some("Chores".into()),
        points:      10,
        assigned_to: None,
      },
      assigned_name:   None,
      assigned_avatar: None,
    };

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["assignedTo"], serde_json::Value::Null);
    assert_eq!(json["AssignedName"], serde_json::Value::Null);
    assert_eq!(json["AssignedAvatar"], serde_json::Value::Null);
  }
}
