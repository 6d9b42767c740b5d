//! [`SqliteStore`] — the SQLite implementation of [`ChoreStore`].

use std::path::Path;

use chores_core::{
  log::LogView,
  member::{Member, NewMember, member_ref},
  store::ChoreStore,
  task::{Assignee, Completion, NewTask, Task, TaskView},
};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension as _, TransactionBehavior};

use crate::{
  encode::{encode_dt, member_from_row, task_view_from_row, RawLog},
  schema::{self, PRAGMAS, SCHEMA_VERSION},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A chores store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and bring its schema up to date.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let found = self
      .conn
      .call(|conn| {
        conn.execute_batch(PRAGMAS)?;
        Ok(schema::schema_version(conn)?)
      })
      .await?;

    if found > SCHEMA_VERSION {
      return Err(Error::UnsupportedSchema {
        found,
        supported: SCHEMA_VERSION,
      });
    }

    let version = self
      .conn
      .call(|conn| Ok(schema::migrate(conn)?))
      .await?;

    if version < SCHEMA_VERSION {
      tracing::warn!(
        version,
        expected = SCHEMA_VERSION,
        "schema is behind; requests using missing columns will fail"
      );
    }
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── Transaction helpers ─────────────────────────────────────────────────────

/// Return the id of the member called `name`, creating it if needed.
fn find_or_create_member(conn: &Connection, name: &str) -> rusqlite::Result<i64> {
  let inserted = conn.execute(
    "INSERT INTO members (name) VALUES (?1) ON CONFLICT (name) DO NOTHING",
    rusqlite::params![name],
  )?;
  let id: i64 = conn.query_row(
    "SELECT id FROM members WHERE name = ?1",
    rusqlite::params![name],
    |row| row.get(0),
  )?;

  if inserted > 0 {
    tracing::info!(member_id = id, member = name, "created member from task assignment");
  }
  Ok(id)
}

/// Add `points` to a member's score and return the new score.
///
/// A member id that matches no row credits nobody and reports a score of 0.
fn credit_member(conn: &Connection, member_id: i64, points: i64) -> rusqlite::Result<i64> {
  conn.execute(
    "UPDATE members SET score = COALESCE(score, 0) + ?1 WHERE id = ?2",
    rusqlite::params![points, member_id],
  )?;
  let score: Option<i64> = conn
    .query_row(
      "SELECT score FROM members WHERE id = ?1",
      rusqlite::params![member_id],
      |row| row.get(0),
    )
    .optional()?;

  Ok(score.unwrap_or_else(|| {
    tracing::warn!(member_id, "credited member does not exist");
    0
  }))
}

// ─── ChoreStore impl ─────────────────────────────────────────────────────────

impl ChoreStore for SqliteStore {
  type Error = Error;

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn list_tasks(&self) -> Result<Vec<TaskView>> {
    let tasks = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT t.id, t.title, t.category, t.points, t.assigned_to,
                  m.name, m.avatar_url
           FROM tasks t
           LEFT JOIN members m ON t.assigned_to = m.id
           ORDER BY t.id",
        )?;
        let rows = stmt
          .query_map([], task_view_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(tasks)
  }

  async fn create_task(&self, input: NewTask) -> Result<Task> {
    let task = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let assigned_to = match input.assignee {
          Some(Assignee::Id(id)) => Some(id),
          Some(Assignee::Name(name)) => Some(find_or_create_member(&tx, &name)?),
          None => None,
        };

        tx.execute(
          "INSERT INTO tasks (title, category, points, assigned_to)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![input.title, input.category, input.points, assigned_to],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Task {
          id,
          title: input.title,
          category: input.category,
          points: input.points,
          assigned_to,
        })
      })
      .await?;

    tracing::debug!(task_id = task.id, assigned_to = ?task.assigned_to, "created task");
    Ok(task)
  }

  async fn complete_task(
    &self,
    task_id:         i64,
    fallback_member: Option<i64>,
  ) -> Result<Option<Completion>> {
    let completed_at = encode_dt(Utc::now());

    let completion = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let task: Option<(Option<String>, i64, Option<i64>)> = tx
          .query_row(
            "SELECT title, points, assigned_to FROM tasks WHERE id = ?1",
            rusqlite::params![task_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
          )
          .optional()?;
        let Some((title, points, assigned_to)) = task else {
          return Ok(None);
        };

        // Whoever deletes the row completes the task; nobody is credited twice.
        let deleted = tx.execute(
          "DELETE FROM tasks WHERE id = ?1",
          rusqlite::params![task_id],
        )?;
        if deleted == 0 {
          return Ok(None);
        }

        let member_id = member_ref(assigned_to).or(member_ref(fallback_member));

        tx.execute(
          "INSERT INTO logs (member_id, task_id, completed_at, task_title)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![member_id, task_id, completed_at, title],
        )?;

        let score = member_id
          .map(|id| credit_member(&tx, id, points.max(0)))
          .transpose()?;

        tx.commit()?;
        Ok(Some(Completion {
          task_id,
          member_id,
          score,
        }))
      })
      .await?;

    match &completion {
      Some(c) => tracing::info!(
        task_id,
        member_id = ?c.member_id,
        score = ?c.score,
        "completed task"
      ),
      None => tracing::debug!(task_id, "completion for unknown task"),
    }
    Ok(completion)
  }

  // ── Members ───────────────────────────────────────────────────────────────

  async fn list_members(&self) -> Result<Vec<Member>> {
    let members = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare("SELECT id, name, avatar_url, score FROM members ORDER BY id")?;
        let rows = stmt
          .query_map([], member_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(members)
  }

  async fn add_member(&self, input: NewMember) -> Result<Member> {
    let member = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO members (name, avatar_url) VALUES (?1, ?2)",
          rusqlite::params![input.name, input.avatar_url],
        )?;
        let id = conn.last_insert_rowid();
        Ok(conn.query_row(
          "SELECT id, name, avatar_url, score FROM members WHERE id = ?1",
          rusqlite::params![id],
          member_from_row,
        )?)
      })
      .await?;

    tracing::info!(member_id = member.id, member = %member.name, "added member");
    Ok(member)
  }

  // ── Logs ──────────────────────────────────────────────────────────────────

  async fn list_logs(&self) -> Result<Vec<LogView>> {
    let raws: Vec<RawLog> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT l.id, l.member_id, l.task_id, l.task_title, l.completed_at,
                  m.name
           FROM logs l
           LEFT JOIN members m ON l.member_id = m.id
           ORDER BY l.id DESC",
        )?;
        let rows = stmt
          .query_map([], RawLog::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLog::into_view).collect()
  }
}
