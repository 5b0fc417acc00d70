//! [`SqliteStore`]: the SQLite implementation of [`SheetStore`].

use std::path::Path;

use chrono::Utc;
use stance_core::{
  row::SubmissionRow,
  store::{Partition, SheetStore},
};

use crate::{
  Result,
  encode::{RawRow, encode_dt},
  schema::SCHEMA,
};

/// A sheet store backed by a single SQLite file.
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

  /// Open a store that lives only in memory.
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

  /// Names of every partition written so far, sorted.
  pub async fn partitions(&self) -> Result<Vec<Partition>> {
    let names: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT name FROM sheets ORDER BY name")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(names.into_iter().map(Partition::new).collect())
  }
}

// ─── SheetStore impl ─────────────────────────────────────────────────────────

impl SheetStore for SqliteStore {
  type Error = crate::Error;

  async fn read(&self, partition: &Partition) -> Result<Vec<SubmissionRow>> {
    let name = partition.as_str().to_owned();

    let raws: Vec<RawRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             topic, student_name, student_id, pre_position, post_position,
             question_type, question_text, question_target,
             submission_id, submitted_at
           FROM sheet_rows
           WHERE partition = ?1
           ORDER BY position",
        )?;

        let rows = stmt
          .query_map(rusqlite::params![name], |row| {
            Ok(RawRow {
              topic:           row.get(0)?,
              student_name:    row.get(1)?,
              student_id:      row.get(2)?,
              pre_position:    row.get(3)?,
              post_position:   row.get(4)?,
              question_type:   row.get(5)?,
              question_text:   row.get(6)?,
              question_target: row.get(7)?,
              submission_id:   row.get(8)?,
              submitted_at:    row.get(9)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRow::into_row).collect()
  }

  async fn write(&self, partition: &Partition, rows: Vec<SubmissionRow>) -> Result<()> {
    let name   = partition.as_str().to_owned();
    let at_str = encode_dt(Utc::now());
    let raws: Vec<RawRow> = rows.iter().map(RawRow::from_row).collect();
    let count  = raws.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        tx.execute(
          "INSERT INTO sheets (name, updated_at) VALUES (?1, ?2)
           ON CONFLICT(name) DO UPDATE SET updated_at = excluded.updated_at",
          rusqlite::params![name, at_str],
        )?;
        tx.execute(
          "DELETE FROM sheet_rows WHERE partition = ?1",
          rusqlite::params![name],
        )?;

        {
          let mut stmt = tx.prepare(
            "INSERT INTO sheet_rows (
               partition, position, topic, student_name, student_id,
               pre_position, post_position, question_type, question_text,
               question_target, submission_id, submitted_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          )?;
          for (position, raw) in raws.iter().enumerate() {
            stmt.execute(rusqlite::params![
              name,
              position as i64,
              raw.topic,
              raw.student_name,
              raw.student_id,
              raw.pre_position,
              raw.post_position,
              raw.question_type,
              raw.question_text,
              raw.question_target,
              raw.submission_id,
              raw.submitted_at,
            ])?;
          }
        }

        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(%partition, rows = count, "partition overwritten");
    Ok(())
  }
}
