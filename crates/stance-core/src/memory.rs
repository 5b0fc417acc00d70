//! [`MemoryStore`], a process-local [`SheetStore`].
//!
//! Nothing survives a restart. Used by tests and by the server's
//! `in_memory` mode.

use std::{collections::HashMap, convert::Infallible, sync::Arc};

use tokio::sync::RwLock;

use crate::{
  row::SubmissionRow,
  store::{Partition, SheetStore},
};

/// Sheets held in a shared map.
///
/// Clones share the same sheets.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  sheets: Arc<RwLock<HashMap<Partition, Vec<SubmissionRow>>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Names of every partition written so far, sorted.
  pub async fn partitions(&self) -> Vec<Partition> {
    let mut names: Vec<Partition> = self.sheets.read().await.keys().cloned().collect();
    names.sort();
    names
  }
}

impl SheetStore for MemoryStore {
  type Error = Infallible;

  async fn read(&self, partition: &Partition) -> Result<Vec<SubmissionRow>, Infallible> {
    Ok(
      self
        .sheets
        .read()
        .await
        .get(partition)
        .cloned()
        .unwrap_or_default(),
    )
  }

  async fn write(
    &self,
    partition: &Partition,
    rows: Vec<SubmissionRow>,
  ) -> Result<(), Infallible> {
    self.sheets.write().await.insert(partition.clone(), rows);
    Ok(())
  }
}
