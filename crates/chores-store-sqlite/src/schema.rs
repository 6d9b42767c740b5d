//! SQL schema and migrations for the chores SQLite store.
//!
//! The applied version is kept in `PRAGMA user_version`. Migrations run once
//! each, in order, every step in its own transaction that also bumps the
//! version.

use rusqlite::{Connection, OptionalExtension as _};

/// Version reached once every migration has been applied.
pub const SCHEMA_VERSION: i64 = 4;

/// Connection-level settings, applied on every open.
pub const PRAGMAS: &str = "
PRAGMA journal_mode = WAL;
PRAGMA busy_timeout = 5000;
";

/// Base tables; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
const BASE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS members (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    avatar_url  TEXT
);

CREATE TABLE IF NOT EXISTS tasks (
    id          INTEGER PRIMARY KEY,
    title       TEXT,
    category    TEXT,
    points      INTEGER NOT NULL DEFAULT 0
);

-- No foreign keys: the task row is deleted on completion, the log stays.
CREATE TABLE IF NOT EXISTS logs (
    id            INTEGER PRIMARY KEY,
    member_id     INTEGER,         -- NULL when nobody was credited
    task_id       INTEGER NOT NULL,
    completed_at  TEXT NOT NULL    -- RFC 3339 UTC, second precision
);
";

/// A column added to an existing table.
struct AddColumn {
  table:      &'static str,
  column:     &'static str,
  definition: &'static str,
}

enum Step {
  /// DDL that must succeed for the store to be usable.
  Create(&'static str),
  /// Additive columns. Failure is logged and leaves the version where it was.
  AddColumns(&'static [AddColumn]),
  /// An index over a table that may predate the version; failure is logged
  /// like [`Step::AddColumns`].
  Index(&'static str),
}

struct Migration {
  version:     i64,
  description: &'static str,
  step:        Step,
}

const MIGRATIONS: &[Migration] = &[
  Migration {
    version:     1,
    description: "base tables",
    step:        Step::Create(BASE_TABLES),
  },
  Migration {
    version:     2,
    description: "task assignee and member score",
    step:        Step::AddColumns(&[
      AddColumn {
        table:      "tasks",
        column:     "assigned_to",
        definition: "assigned_to INTEGER",
      },
      AddColumn {
        table:      "members",
        column:     "score",
        definition: "score INTEGER NOT NULL DEFAULT 0",
      },
    ]),
  },
  Migration {
    version:     3,
    description: "task title snapshot on logs",
    step:        Step::AddColumns(&[AddColumn {
      table:      "logs",
      column:     "task_title",
      definition: "task_title TEXT",
    }]),
  },
  Migration {
    version:     4,
    description: "unique member names",
    // `members` tables created before the version was tracked may lack the
    // UNIQUE constraint that member upserts conflict on.
    step:        Step::Index(
      "CREATE UNIQUE INDEX IF NOT EXISTS members_name_idx ON members (name)",
    ),
  },
];

pub fn schema_version(conn: &Connection) -> rusqlite::Result<i64> {
  conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

/// Apply every migration newer than the database's current version and
/// return the version the database ends up at.
///
/// A failing [`Step::Create`] is an error. Any other failing step is logged
/// and stops the sequence there; it is retried on the next open.
pub fn migrate(conn: &mut Connection) -> rusqlite::Result<i64> {
  let found = schema_version(conn)?;
  let mut current = found;

  for migration in MIGRATIONS.iter().filter(|m| m.version > found) {
    let tx = conn.transaction()?;

    let applied = match migration.step {
      Step::Create(sql) => {
        tx.execute_batch(sql)?;
        Ok(())
      }
      Step::AddColumns(columns) => add_missing_columns(&tx, columns),
      Step::Index(sql) => tx.execute_batch(sql),
    };

    if let Err(e) = applied {
      tracing::warn!(
        version = migration.version,
        error = %e,
        "migration '{}' failed; staying at schema version {current}",
        migration.description,
      );
      return Ok(current);
    }

    tx.pragma_update(None, "user_version", migration.version)?;
    tx.commit()?;
    current = migration.version;
    tracing::info!(version = current, "applied migration '{}'", migration.description);
  }

  Ok(current)
}

/// Add each column unless the live table already has it. Databases created
/// before the version was tracked may carry some of them already.
fn add_missing_columns(
  conn:    &Connection,
  columns: &[AddColumn],
) -> rusqlite::Result<()> {
  for col in columns {
    if has_column(conn, col.table, col.column)? {
      continue;
    }
    conn.execute_batch(&format!(
      "ALTER TABLE {} ADD COLUMN {}",
      col.table, col.definition
    ))?;
  }
  Ok(())
}

/// Whether `table` has `column`, compared case-insensitively like SQLite
/// identifiers.
pub fn has_column(
  conn:   &Connection,
  table:  &str,
  column: &str,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2 COLLATE NOCASE",
        rusqlite::params![table, column],
        |_| Ok(()),
      )
      .optional()?
      .is_some(),
  )
}
