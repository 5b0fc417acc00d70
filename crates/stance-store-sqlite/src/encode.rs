//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase strings, and
//! enums their serde names.

use chrono::{DateTime, Utc};
use stance_core::{
  row::{QuestionType, Stance, SubmissionRow},
  topic::Topic,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Stance ──────────────────────────────────────────────────────────────────

pub fn decode_stance(column: &'static str, s: &str) -> Result<Stance> {
  match s {
    "A" => Ok(Stance::A),
    "B" => Ok(Stance::B),
    other => Err(Error::UnknownValue { column, value: other.to_owned() }),
  }
}

// ─── QuestionType ────────────────────────────────────────────────────────────

pub fn decode_question_type(s: &str) -> Result<QuestionType> {
  match s {
    "fact" => Ok(QuestionType::Fact),
    "inference" => Ok(QuestionType::Inference),
    "critique" => Ok(QuestionType::Critique),
    other => Err(Error::UnknownValue {
      column: "question_type",
      value:  other.to_owned(),
    }),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from, or about to be written to, a `sheet_rows` row.
pub struct RawRow {
  pub topic:           String,
  pub student_name:    String,
  pub student_id:      String,
  pub pre_position:    String,
  pub post_position:   String,
  pub question_type:   String,
  pub question_text:   String,
  pub question_target: String,
  pub submission_id:   String,
  pub submitted_at:    String,
}

impl RawRow {
  pub fn from_row(row: &SubmissionRow) -> Self {
    Self {
      topic:           row.topic.as_str().to_owned(),
      student_name:    row.student_name.clone(),
      student_id:      row.student_id.clone(),
      pre_position:    row.pre_position.as_str().to_owned(),
      post_position:   row.post_position.as_str().to_owned(),
      question_type:   row.question_type.as_str().to_owned(),
      question_text:   row.question_text.clone(),
      question_target: row.question_target.as_str().to_owned(),
      submission_id:   encode_uuid(row.submission_id),
      submitted_at:    encode_dt(row.submitted_at),
    }
  }

  pub fn into_row(self) -> Result<SubmissionRow> {
    Ok(SubmissionRow {
      topic:           Topic::new(self.topic),
      student_name:    self.student_name,
      student_id:      self.student_id,
      pre_position:    decode_stance("pre_position", &self.pre_position)?,
      post_position:   decode_stance("post_position", &self.post_position)?,
      question_type:   decode_question_type(&self.question_type)?,
      question_text:   self.question_text,
      question_target: decode_stance("question_target", &self.question_target)?,
      submission_id:   decode_uuid(&self.submission_id)?,
      submitted_at:    decode_dt(&self.submitted_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn enum_columns_use_serde_names() {
    for qt in QuestionType::ALL {
      assert_eq!(decode_question_type(qt.as_str()).unwrap(), qt);
    }
    for stance in Stance::ALL {
      assert_eq!(decode_stance("pre_position", stance.as_str()).unwrap(), stance);
    }
  }

  #[test]
  fn unknown_stance_names_the_column() {
    let err = decode_stance("question_target", "C").unwrap_err();
    assert!(matches!(
      err,
      Error::UnknownValue { column: "question_target", ref value } if value == "C"
    ));
  }

  #[test]
  fn bad_timestamp_is_a_date_parse_error() {
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
