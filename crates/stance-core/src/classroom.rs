//! [`Classroom`]: the submission handler and results loader.
//!
//! Wraps a [`SheetStore`] together with the topic catalogue and partition
//! layout. Callers pass every piece of per-session state (the filled-in form,
//! the selected topic) explicitly; the classroom holds none.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
  Error, Result,
  board::QuestionBoard,
  row::SubmissionRow,
  store::{Partition, SheetStore, StoreLayout},
  submission::SubmissionForm,
  tally::VoteTally,
  topic::{Topic, TopicCatalog},
};

/// What a successful submission wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
  pub submission_id: Uuid,
  pub topic:         Topic,
  /// Rows appended to each partition (one per non-blank question).
  pub rows_written:  usize,
  /// Partitions appended to, in write order.
  pub partitions:    Vec<Partition>,
  pub submitted_at:  DateTime<Utc>,
}

/// Both aggregation views for one topic, computed from a single read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicResults {
  pub topic:     Topic,
  /// Number of stored rows (questions) the views were computed from.
  pub row_count: usize,
  pub tally:     VoteTally,
  pub board:     QuestionBoard,
}

impl TopicResults {
  pub fn from_rows(topic: Topic, rows: &[SubmissionRow]) -> Self {
    Self {
      topic,
      row_count: rows.len(),
      tally: VoteTally::from_rows(rows),
      board: QuestionBoard::from_rows(rows),
    }
  }
}

pub struct Classroom<S> {
  store:   S,
  catalog: TopicCatalog,
  layout:  StoreLayout,
  /// One lock per partition, held across each append's read and write.
  locks:   Mutex<HashMap<Partition, Arc<Mutex<()>>>>,
}

impl<S: SheetStore> Classroom<S> {
  pub fn new(store: S, catalog: TopicCatalog, layout: StoreLayout) -> Self {
    Self { store, catalog, layout, locks: Mutex::default() }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn catalog(&self) -> &TopicCatalog { &self.catalog }

  // ── Submissions ───────────────────────────────────────────────────────────

  /// Validate `form` and append one row per question to every partition the
  /// layout names for its topic.
  ///
  /// Nothing is written when validation fails. Partitions are written one
  /// after another; if a later write fails, earlier partitions keep the new
  /// rows and the error names the partition that failed.
  pub async fn submit(&self, form: SubmissionForm) -> Result<SubmissionReceipt> {
    let topic = form.topic.clone();
    let submission_id = Uuid::new_v4();
    let submitted_at = Utc::now();

    let rows = form
      .into_rows(&self.catalog, submission_id, submitted_at)
      .inspect_err(|e| tracing::warn!(%topic, error = %e, "submission rejected"))?;

    let partitions = self.layout.write_partitions(&topic);
    for partition in &partitions {
      self.append(partition, &rows).await?;
    }

    tracing::info!(
      %topic,
      %submission_id,
      rows = rows.len(),
      partitions = partitions.len(),
      "submission recorded"
    );

    Ok(SubmissionReceipt {
      submission_id,
      topic,
      rows_written: rows.len(),
      partitions,
      submitted_at,
    })
  }

  /// Read-modify-write `rows` onto the end of `partition`.
  ///
  /// Appends to the same partition are serialised; a concurrent submission
  /// waits until the previous write has landed. A read failure aborts the
  /// append: overwriting a partition whose current contents are unknown
  /// would drop them.
  async fn append(&self, partition: &Partition, rows: &[SubmissionRow]) -> Result<()> {
    let lock = self.partition_lock(partition).await;
    let _guard = lock.lock().await;

    let mut sheet = self.store.read(partition).await.map_err(|e| {
      tracing::error!(%partition, error = %e, "failed to read partition before append");
      Error::StoreRead {
        partition: partition.to_string(),
        source:    Box::new(e),
      }
    })?;

    sheet.extend_from_slice(rows);

    self.store.write(partition, sheet).await.map_err(|e| {
      tracing::error!(%partition, error = %e, "failed to write partition");
      Error::StoreWrite {
        partition: partition.to_string(),
        source:    Box::new(e),
      }
    })
  }

  async fn partition_lock(&self, partition: &Partition) -> Arc<Mutex<()>> {
    self
      .locks
      .lock()
      .await
      .entry(partition.clone())
      .or_default()
      .clone()
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// All stored rows for `topic`, in insertion order.
  ///
  /// An unreadable partition is logged and reported as empty, the same as a
  /// partition that does not exist yet.
  pub async fn rows(&self, topic: &Topic) -> Result<Vec<SubmissionRow>> {
    if !self.catalog.contains(topic) {
      return Err(Error::UnknownTopic(topic.to_string()));
    }

    let partition = self.layout.read_partition(topic);
    let rows = match self.store.read(&partition).await {
      Ok(rows) => rows,
      Err(e) => {
        tracing::warn!(%topic, %partition, error = %e, "partition unreadable; showing no data");
        Vec::new()
      }
    };

    Ok(rows.into_iter().filter(|r| &r.topic == topic).collect())
  }

  /// Read `topic` once and compute the tally and the question board.
  pub async fn results(&self, topic: &Topic) -> Result<TopicResults> {
    let rows = self.rows(topic).await?;
    Ok(TopicResults::from_rows(topic.clone(), &rows))
  }
}
