//! SQLite implementation of [`AssignmentStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use studyflow_core::{
  account::AccountId,
  assignment::{Assignment, AssignmentFilter, AssignmentPatch, AssignmentStatus, NewAssignment},
  store::AssignmentStore,
};

use crate::{
  Error, Result,
  encode::{
    ASSIGNMENT_COLUMNS, RawAssignment, encode_dt, encode_priority, encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An assignment store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── AssignmentStore impl ────────────────────────────────────────────────────

impl AssignmentStore for SqliteStore {
  type Error = Error;

  async fn create(&self, account_id: AccountId, input: NewAssignment) -> Result<Assignment> {
    let assignment = Assignment {
      id:              Uuid::new_v4(),
      account_id,
      title:           input.title,
      description:     input.description.unwrap_or_default(),
      course_code:     input.course_code,
      due_date:        input.due_date,
      priority:        input.priority,
      status:          AssignmentStatus::Pending,
      estimated_hours: input.estimated_hours,
      created_at:      Utc::now(),
    };

    let id_str      = encode_uuid(assignment.id);
    let account_str = encode_uuid(account_id);
    let title       = assignment.title.clone();
    let description = assignment.description.clone();
    let course_code = assignment.course_code.clone();
    let due_str     = encode_dt(assignment.due_date);
    let priority    = encode_priority(assignment.priority);
    let status      = encode_status(assignment.status);
    let hours       = assignment.estimated_hours;
    let created_str = encode_dt(assignment.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO assignments (
             assignment_id, account_id, title, description, course_code,
             due_date, priority, status, estimated_hours, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            account_str,
            title,
            description,
            course_code,
            due_str,
            priority,
            status,
            hours,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(assignment)
  }

  async fn get(&self, account_id: AccountId, id: Uuid) -> Result<Option<Assignment>> {
    let id_str      = encode_uuid(id);
    let account_str = encode_uuid(account_id);

    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
               WHERE assignment_id = ?1 AND account_id = ?2"
            ),
            rusqlite::params![id_str, account_str],
            RawAssignment::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn list(
    &self,
    account_id: AccountId,
    filter: AssignmentFilter,
  ) -> Result<Vec<Assignment>> {
    let account_str = encode_uuid(account_id);
    let status      = filter.status.map(encode_status);
    let course_code = filter.course_code;
    let priority    = filter.priority.map(encode_priority);

    let raws: Vec<RawAssignment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
           WHERE account_id = ?1
             AND (?2 IS NULL OR status = ?2)
             AND (?3 IS NULL OR course_code = ?3)
             AND (?4 IS NULL OR priority = ?4)
           ORDER BY created_at, rowid"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![account_str, status, course_code, priority],
            RawAssignment::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssignment::into_assignment).collect()
  }

  async fn update(
    &self,
    account_id: AccountId,
    id: Uuid,
    patch: AssignmentPatch,
  ) -> Result<Option<Assignment>> {
    let id_str      = encode_uuid(id);
    let account_str = encode_uuid(account_id);
    let status      = patch.status.map(encode_status);
    let priority    = patch.priority.map(encode_priority);

    // Absent fields bind as NULL and COALESCE keeps the stored value.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE assignments SET
             title           = COALESCE(?3, title),
             description     = COALESCE(?4, description),
             status          = COALESCE(?5, status),
             priority        = COALESCE(?6, priority),
             estimated_hours = COALESCE(?7, estimated_hours)
           WHERE assignment_id = ?1 AND account_id = ?2",
          rusqlite::params![
            id_str,
            account_str,
            patch.title,
            patch.description,
            status,
            priority,
            patch.estimated_hours,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Ok(None);
    }
    self.get(account_id, id).await
  }

  async fn delete(&self, account_id: AccountId, id: Uuid) -> Result<bool> {
    let id_str      = encode_uuid(id);
    let account_str = encode_uuid(account_id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM assignments WHERE assignment_id = ?1 AND account_id = ?2",
          rusqlite::params![id_str, account_str],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }
}
