//! The submission form and its validation.
//!
//! Validation is pure: [`SubmissionForm::into_rows`] either rejects the form
//! or produces the rows to append. No store is touched here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  row::{QuestionType, Stance, SubmissionRow},
  topic::{Topic, TopicCatalog},
};

/// Number of question slots on the form.
pub const MAX_QUESTIONS: usize = 3;

/// One question slot as the student filled it in. Slots left blank are
/// dropped during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
  pub question_type: QuestionType,
  pub target:        Stance,
  #[serde(default)]
  pub text:          String,
}

impl QuestionDraft {
  pub fn new(
    question_type: QuestionType,
    target: Stance,
    text: impl Into<String>,
  ) -> Self {
    Self { question_type, target, text: text.into() }
  }

  pub fn is_blank(&self) -> bool { self.text.trim().is_empty() }
}

/// Everything a student enters in one go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
  pub topic:         Topic,
  pub student_name:  String,
  pub student_id:    String,
  pub pre_position:  Stance,
  pub post_position: Stance,
  #[serde(default)]
  pub questions:     Vec<QuestionDraft>,
}

impl SubmissionForm {
  /// Validate the form against `catalog` and expand it into one row per
  /// non-blank question.
  ///
  /// Checks, in order: slot count, topic, identity, questions. Identity and
  /// question text are stored trimmed.
  pub fn into_rows(
    self,
    catalog: &TopicCatalog,
    submission_id: Uuid,
    submitted_at: DateTime<Utc>,
  ) -> Result<Vec<SubmissionRow>> {
    if self.questions.len() > MAX_QUESTIONS {
      return Err(Error::TooManyQuestions(self.questions.len()));
    }
    if !catalog.contains(&self.topic) {
      return Err(Error::UnknownTopic(self.topic.to_string()));
    }

    let student_name = self.student_name.trim();
    let student_id = self.student_id.trim();
    if student_name.is_empty() || student_id.is_empty() {
      return Err(Error::MissingIdentity);
    }

    let rows: Vec<SubmissionRow> = self
      .questions
      .iter()
      .filter(|q| !q.is_blank())
      .map(|q| SubmissionRow {
        topic:           self.topic.clone(),
        student_name:    student_name.to_owned(),
        student_id:      student_id.to_owned(),
        pre_position:    self.pre_position,
        post_position:   self.post_position,
        question_type:   q.question_type,
        question_text:   q.text.trim().to_owned(),
        question_target: q.target,
        submission_id,
        submitted_at,
      })
      .collect();

    if rows.is_empty() {
      return Err(Error::NoQuestions);
    }
    Ok(rows)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(questions: Vec<QuestionDraft>) -> SubmissionForm {
    SubmissionForm {
      topic: Topic::from("issue-1"),
      student_name: "Kim".into(),
      student_id: "1".into(),
      pre_position: Stance::A,
      post_position: Stance::B,
      questions,
    }
  }

  fn expand(form: SubmissionForm) -> Result<Vec<SubmissionRow>> {
    form.into_rows(&TopicCatalog::default(), Uuid::new_v4(), Utc::now())
  }

  #[test]
  fn one_row_per_non_blank_question() {
    let rows = expand(form(vec![
      QuestionDraft::new(QuestionType::Fact, Stance::A, "Why?"),
      QuestionDraft::new(QuestionType::Inference, Stance::B, "   "),
      QuestionDraft::new(QuestionType::Critique, Stance::B, "  Really?  "),
    ]))
    .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].question_text, "Why?");
    assert_eq!(rows[1].question_text, "Really?");
    assert_eq!(rows[1].question_type, QuestionType::Critique);
    assert!(rows.iter().all(|r| r.student_key() == ("Kim", "1")));
    assert!(
      rows
        .iter()
        .all(|r| r.pre_position == Stance::A && r.post_position == Stance::B)
    );
    assert_eq!(rows[0].submission_id, rows[1].submission_id);
  }

  #[test]
  fn blank_identity_is_rejected() {
    let mut f = form(vec![QuestionDraft::new(QuestionType::Fact, Stance::A, "q")]);
    f.student_name = "  ".into();
    assert!(matches!(expand(f), Err(Error::MissingIdentity)));

    let mut f = form(vec![QuestionDraft::new(QuestionType::Fact, Stance::A, "q")]);
    f.student_id = String::new();
    assert!(matches!(expand(f), Err(Error::MissingIdentity)));
  }

  #[test]
  fn identity_is_checked_before_questions() {
    let mut f = form(vec![]);
    f.student_name = String::new();
    assert!(matches!(expand(f), Err(Error::MissingIdentity)));
  }

  #[test]
  fn all_blank_questions_is_rejected() {
    let f = form(vec![
      QuestionDraft::new(QuestionType::Fact, Stance::A, ""),
      QuestionDraft::new(QuestionType::Fact, Stance::B, "\n\t"),
    ]);
    assert!(matches!(expand(f), Err(Error::NoQuestions)));
    assert!(matches!(expand(form(vec![])), Err(Error::NoQuestions)));
  }

  #[test]
  fn more_than_three_slots_is_rejected() {
    let q = QuestionDraft::new(QuestionType::Fact, Stance::A, "q");
    let f = form(vec![q.clone(), q.clone(), q.clone(), q]);
    assert!(matches!(expand(f), Err(Error::TooManyQuestions(4))));
  }

  #[test]
  fn unknown_topic_is_rejected() {
    let mut f = form(vec![QuestionDraft::new(QuestionType::Fact, Stance::A, "q")]);
    f.topic = Topic::from("issue-42");
    assert!(matches!(expand(f), Err(Error::UnknownTopic(_))));
  }
}
