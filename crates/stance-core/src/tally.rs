//! Vote tally: one vote per student, however many questions they asked.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::row::{Stance, SubmissionRow};

/// A student's counted vote: the pre/post positions of their first row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
  pub student_name:  String,
  pub student_id:    String,
  pub pre_position:  Stance,
  pub post_position: Stance,
  /// `true` when `pre_position != post_position`; presenters highlight these.
  pub changed:       bool,
}

/// Names grouped under each stance, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StanceRoster {
  #[serde(rename = "A")]
  pub a: Vec<String>,
  #[serde(rename = "B")]
  pub b: Vec<String>,
}

impl StanceRoster {
  pub fn names(&self, stance: Stance) -> &[String] {
    match stance {
      Stance::A => &self.a,
      Stance::B => &self.b,
    }
  }

  pub fn count(&self, stance: Stance) -> usize { self.names(stance).len() }

  fn push(&mut self, stance: Stance, name: &str) {
    match stance {
      Stance::A => self.a.push(name.to_owned()),
      Stance::B => self.b.push(name.to_owned()),
    }
  }
}

/// The deduplicated vote view for one topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
  /// Every counted student, in first-seen order.
  pub voters:  Vec<Voter>,
  pub pre:     StanceRoster,
  pub post:    StanceRoster,
  /// Students whose stance changed; a subset of `voters`, possibly empty.
  pub changed: Vec<Voter>,
}

impl VoteTally {
  /// Tally `rows`, keeping only the first row per `(student_name,
  /// student_id)`.
  pub fn from_rows(rows: &[SubmissionRow]) -> Self {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut tally = Self::default();

    for row in rows {
      if !seen.insert(row.student_key()) {
        continue;
      }

      let voter = Voter {
        student_name:  row.student_name.clone(),
        student_id:    row.student_id.clone(),
        pre_position:  row.pre_position,
        post_position: row.post_position,
        changed:       row.changed_stance(),
      };

      tally.pre.push(voter.pre_position, &voter.student_name);
      tally.post.push(voter.post_position, &voter.student_name);
      if voter.changed {
        tally.changed.push(voter.clone());
      }
      tally.voters.push(voter);
    }

    tally
  }

  /// Number of distinct students counted.
  pub fn total(&self) -> usize { self.voters.len() }
}
