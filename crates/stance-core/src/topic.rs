//! Topics, the fixed set of discussion units a class votes on.
//!
//! A topic doubles as the partition key for stored rows. The set of valid
//! topics is fixed at startup by a [`TopicCatalog`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// An opaque topic identifier, e.g. `"issue-3"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Topic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for Topic {
  fn from(s: &str) -> Self { Self::new(s) }
}

// ─── Catalogue ───────────────────────────────────────────────────────────────

/// The ordered set of topics a deployment accepts.
///
/// The first entry is the default selection for a fresh session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopicCatalog {
  topics: Vec<Topic>,
}

/// Number of weekly issues offered when no catalogue is configured.
pub const DEFAULT_TOPIC_COUNT: usize = 5;

impl Default for TopicCatalog {
  fn default() -> Self {
    Self {
      topics: (1..=DEFAULT_TOPIC_COUNT)
        .map(|n| Topic::new(format!("issue-{n}")))
        .collect(),
    }
  }
}

impl TopicCatalog {
  /// Build a catalogue from `topics`, dropping blank and repeated entries
  /// while keeping the first-seen order. Falls back to the default catalogue
  /// when nothing usable remains.
  pub fn new<I, T>(topics: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<String>,
  {
    let mut kept: Vec<Topic> = Vec::new();
    for raw in topics {
      let raw = raw.into();
      let trimmed = raw.trim();
      if trimmed.is_empty() || kept.iter().any(|t| t.as_str() == trimmed) {
        continue;
      }
      kept.push(Topic::new(trimmed));
    }

    if kept.is_empty() {
      Self::default()
    } else {
      Self { topics: kept }
    }
  }

  pub fn topics(&self) -> &[Topic] { &self.topics }

  pub fn contains(&self, topic: &Topic) -> bool { self.topics.contains(topic) }

  /// The default selection; a catalogue is never empty.
  pub fn first(&self) -> &Topic { &self.topics[0] }

  /// Look up a raw identifier, failing with [`Error::UnknownTopic`].
  pub fn resolve(&self, raw: &str) -> Result<Topic> {
    self
      .topics
      .iter()
      .find(|t| t.as_str() == raw.trim())
      .cloned()
      .ok_or_else(|| Error::UnknownTopic(raw.to_owned()))
  }

  /// The topic after `current`, wrapping around. Unknown topics map to the
  /// first entry.
  pub fn next_after(&self, current: &Topic) -> &Topic {
    match self.topics.iter().position(|t| t == current) {
      Some(i) => &self.topics[(i + 1) % self.topics.len()],
      None => self.first(),
    }
  }

  /// The topic before `current`, wrapping around.
  pub fn prev_before(&self, current: &Topic) -> &Topic {
    let len = self.topics.len();
    match self.topics.iter().position(|t| t == current) {
      Some(i) => &self.topics[(i + len - 1) % len],
      None => self.first(),
    }
  }
}

// Deserialising goes through `new` so a configured list is normalised the same
// way and can never produce an empty catalogue.
impl<'de> Deserialize<'de> for TopicCatalog {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(Self::new(raw))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_catalogue_has_five_issues() {
    let catalog = TopicCatalog::default();
    assert_eq!(catalog.topics().len(), 5);
    assert_eq!(catalog.first().as_str(), "issue-1");
    assert_eq!(catalog.topics()[4].as_str(), "issue-5");
  }

  #[test]
  fn new_drops_blanks_and_duplicates() {
    let catalog = TopicCatalog::new(["week-1", " ", "week-2", "week-1 "]);
    let ids: Vec<&str> = catalog.topics().iter().map(Topic::as_str).collect();
    assert_eq!(ids, ["week-1", "week-2"]);
  }

  #[test]
  fn new_with_nothing_usable_falls_back_to_default() {
    let catalog = TopicCatalog::new(Vec::<String>::new());
    assert_eq!(catalog, TopicCatalog::default());
  }

  #[test]
  fn resolve_rejects_unknown_topic() {
    let catalog = TopicCatalog::default();
    assert_eq!(catalog.resolve("issue-2").unwrap().as_str(), "issue-2");
    assert!(matches!(
      catalog.resolve("issue-9"),
      Err(Error::UnknownTopic(t)) if t == "issue-9"
    ));
  }

  #[test]
  fn deserialises_through_normalisation() {
    let catalog: TopicCatalog =
      serde_json::from_str(r#"["unit-a", "", "unit-b", "unit-a"]"#).unwrap();
    let ids: Vec<&str> = catalog.topics().iter().map(Topic::as_str).collect();
    assert_eq!(ids, ["unit-a", "unit-b"]);
  }

  #[test]
  fn cycling_wraps_in_both_directions() {
    let catalog = TopicCatalog::new(["a", "b", "c"]);
    assert_eq!(catalog.next_after(&Topic::from("c")).as_str(), "a");
    assert_eq!(catalog.prev_before(&Topic::from("a")).as_str(), "c");
    assert_eq!(catalog.next_after(&Topic::from("zzz")).as_str(), "a");
  }
}
