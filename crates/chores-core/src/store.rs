//! The `ChoreStore` trait.
//!
//! Implemented by storage backends (e.g. `chores-store-sqlite`). The API layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  log::LogView,
  member::{Member, NewMember},
  task::{Completion, NewTask, Task, TaskView},
};

/// Abstraction over a chores store backend.
///
/// Every call reads from storage; implementations keep no derived state.
/// Multi-step mutations must be all-or-nothing.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ChoreStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Tasks ─────────────────────────────────────────────────────────────

  /// All tasks, left-joined with their assignee's name and avatar.
  fn list_tasks(
    &self,
  ) -> impl Future<Output = Result<Vec<TaskView>, Self::Error>> + Send + '_;

  /// Insert a task, resolving the assignee first.
  ///
  /// A [`Assignee::Name`](crate::task::Assignee::Name) that matches no member
  /// creates exactly one new member with that name.
  fn create_task(
    &self,
    input: NewTask,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  /// Complete a task: delete it, write a log entry, and credit the task's
  /// assignee (or `fallback_member` when unassigned) with its points.
  ///
  /// Returns `None` if no task has this id; nothing is changed in that case.
  fn complete_task(
    &self,
    task_id: i64,
    fallback_member: Option<i64>,
  ) -> impl Future<Output = Result<Option<Completion>, Self::Error>> + Send + '_;

  // ── Members ───────────────────────────────────────────────────────────

  /// All members, ordered by id.
  fn list_members(
    &self,
  ) -> impl Future<Output = Result<Vec<Member>, Self::Error>> + Send + '_;

  /// Create a member with a zero score.
  fn add_member(
    &self,
    input: NewMember,
  ) -> impl Future<Output = Result<Member, Self::Error>> + Send + '_;

  // ── Logs ──────────────────────────────────────────────────────────────

  /// All completion logs, newest first.
  fn list_logs(
    &self,
  ) -> impl Future<Output = Result<Vec<LogView>, Self::Error>> + Send + '_;
}
