//! The `SheetStore` trait and the partition layout built on top of it.
//!
//! A store is a set of named partitions ("sheets"), each an ordered list of
//! rows. The trait mirrors a spreadsheet API: whole-partition reads and
//! whole-partition overwrites, nothing finer. Appending is therefore a
//! read-modify-write performed by [`crate::classroom::Classroom`].

use std::{fmt, future::Future};

use serde::{Deserialize, Serialize};

use crate::{row::SubmissionRow, topic::Topic};

// ─── Partition ───────────────────────────────────────────────────────────────

/// The name of one row collection in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(String);

impl Partition {
  pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Partition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&Topic> for Partition {
  fn from(topic: &Topic) -> Self { Self::new(topic.as_str()) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a partitioned tabular backend.
///
/// Reading a partition that was never written yields an empty vector, not an
/// error. Writing replaces the partition's contents wholesale.
/// Futures are `Send` so a store can sit behind an axum router.
pub trait SheetStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return every row of `partition` in insertion order.
  fn read<'a>(
    &'a self,
    partition: &'a Partition,
  ) -> impl Future<Output = Result<Vec<SubmissionRow>, Self::Error>> + Send + 'a;

  /// Overwrite `partition` with `rows`.
  fn write<'a>(
    &'a self,
    partition: &'a Partition,
    rows: Vec<SubmissionRow>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Name of the shared sheet in the [`StoreLayout::Single`] layout.
pub const DEFAULT_SHEET: &str = "Sheet1";

fn default_sheet() -> String { DEFAULT_SHEET.to_owned() }

/// Where a topic's rows are written and read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreLayout {
  /// All topics share one sheet; reads filter it by topic.
  Single {
    #[serde(default = "default_sheet")]
    sheet: String,
  },
  /// One sheet per topic, named after the topic. When `aggregate` is set,
  /// every submission is also appended to that all-topics sheet.
  PerTopic {
    #[serde(default)]
    aggregate: Option<String>,
  },
}

impl Default for StoreLayout {
  fn default() -> Self { Self::PerTopic { aggregate: None } }
}

impl StoreLayout {
  /// The partition a topic's rows are read from.
  pub fn read_partition(&self, topic: &Topic) -> Partition {
    match self {
      Self::Single { sheet } => Partition::new(sheet.as_str()),
      Self::PerTopic { .. } => Partition::from(topic),
    }
  }

  /// The partitions a submission for `topic` is appended to, in write order.
  /// The topic's own partition always comes first.
  pub fn write_partitions(&self, topic: &Topic) -> Vec<Partition> {
    let primary = self.read_partition(topic);
    match self {
      Self::PerTopic { aggregate: Some(all) } if all.as_str() != primary.as_str() => {
        vec![primary, Partition::new(all.as_str())]
      }
      _ => vec![primary],
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_layout_uses_one_sheet_for_everything() {
    let layout = StoreLayout::Single { sheet: default_sheet() };
    let topic = Topic::from("issue-2");
    assert_eq!(layout.read_partition(&topic).as_str(), "Sheet1");
    assert_eq!(layout.write_partitions(&topic), [Partition::new("Sheet1")]);
  }

  #[test]
  fn per_topic_with_aggregate_writes_topic_first() {
    let layout = StoreLayout::PerTopic { aggregate: Some("all".into()) };
    let topic = Topic::from("issue-2");
    assert_eq!(
      layout.write_partitions(&topic),
      [Partition::new("issue-2"), Partition::new("all")]
    );
    assert_eq!(layout.read_partition(&topic).as_str(), "issue-2");
  }

  #[test]
  fn aggregate_named_like_the_topic_is_written_once() {
    let layout = StoreLayout::PerTopic { aggregate: Some("issue-2".into()) };
    assert_eq!(layout.write_partitions(&Topic::from("issue-2")).len(), 1);
  }

  #[test]
  fn layout_deserialises_from_tagged_form() {
    let layout: StoreLayout =
      serde_json::from_str(r#"{"kind":"single"}"#).unwrap();
    assert_eq!(layout, StoreLayout::Single { sheet: "Sheet1".into() });

    let layout: StoreLayout =
      serde_json::from_str(r#"{"kind":"per_topic","aggregate":"all"}"#).unwrap();
    assert_eq!(layout, StoreLayout::PerTopic { aggregate: Some("all".into()) });
  }
}
