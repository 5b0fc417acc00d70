//! Submission rows, the only entity the store holds.
//!
//! A row is one question from one form submission. Rows are append-only: once
//! written, no field is ever updated and no row is ever deleted.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, topic::Topic};

// ─── Stance ──────────────────────────────────────────────────────────────────

/// The binary position a student holds on a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
  A,
  B,
}

impl Stance {
  pub const ALL: [Stance; 2] = [Stance::A, Stance::B];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::A => "A",
      Self::B => "B",
    }
  }
}

impl fmt::Display for Stance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Stance {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim() {
      "A" | "a" => Ok(Self::A),
      "B" | "b" => Ok(Self::B),
      other => Err(Error::InvalidStance(other.to_owned())),
    }
  }
}

// ─── QuestionType ────────────────────────────────────────────────────────────

/// What kind of question a student is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
  /// Asks for a fact or a source.
  Fact,
  /// Asks how a conclusion follows from the evidence.
  Inference,
  /// Challenges the position itself.
  Critique,
}

impl QuestionType {
  pub const ALL: [QuestionType; 3] =
    [QuestionType::Fact, QuestionType::Inference, QuestionType::Critique];

  /// The discriminant stored in the `question_type` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Fact => "fact",
      Self::Inference => "inference",
      Self::Critique => "critique",
    }
  }
}

impl fmt::Display for QuestionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for QuestionType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "fact" => Ok(Self::Fact),
      "inference" => Ok(Self::Inference),
      "critique" => Ok(Self::Critique),
      _ => Err(Error::InvalidQuestionType(s.to_owned())),
    }
  }
}

// ─── SubmissionRow ───────────────────────────────────────────────────────────

/// One stored question together with the identity and votes of the student
/// who asked it.
///
/// Every row of a single form submission shares `topic`, the identity and
/// vote fields, `submission_id` and `submitted_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRow {
  pub topic:           Topic,
  pub student_name:    String,
  pub student_id:      String,
  /// Stance before the presentation.
  pub pre_position:    Stance,
  /// Stance after the presentation.
  pub post_position:   Stance,
  pub question_type:   QuestionType,
  pub question_text:   String,
  /// The stance the question is addressed to.
  pub question_target: Stance,
  pub submission_id:   Uuid,
  /// Server-assigned; never changes after creation.
  pub submitted_at:    DateTime<Utc>,
}

impl SubmissionRow {
  /// The `(student_name, student_id)` pair used to count each student's vote
  /// once per topic.
  pub fn student_key(&self) -> (&str, &str) {
    (&self.student_name, &self.student_id)
  }

  pub fn changed_stance(&self) -> bool {
    self.pre_position != self.post_position
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stance_parses_either_case() {
    assert_eq!("a".parse::<Stance>().unwrap(), Stance::A);
    assert_eq!(" B ".parse::<Stance>().unwrap(), Stance::B);
    assert!(matches!("C".parse::<Stance>(), Err(Error::InvalidStance(_))));
  }

  #[test]
  fn question_type_parse_matches_serde_names() {
    for qt in QuestionType::ALL {
      let json = serde_json::to_string(&qt).unwrap();
      assert_eq!(json, format!("\"{}\"", qt.as_str()));
      assert_eq!(qt.as_str().parse::<QuestionType>().unwrap(), qt);
    }
    assert_eq!("Critique".parse::<QuestionType>().unwrap(), QuestionType::Critique);
    assert!("opinion".parse::<QuestionType>().is_err());
  }

  #[test]
  fn stance_serialises_as_bare_letter() {
    assert_eq!(serde_json::to_string(&Stance::B).unwrap(), "\"B\"");
  }
}
