//! Question board: every question grouped by target stance and type.
//!
//! Unlike the tally, nothing is deduplicated: a student who asked three
//! questions appears three times.

use serde::{Deserialize, Serialize};

use crate::row::{QuestionType, Stance, SubmissionRow};

/// A question as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntry {
  pub question_text: String,
  pub student_name:  String,
}

/// The questions addressed to one stance, split by type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionColumns {
  pub fact:      Vec<BoardEntry>,
  pub inference: Vec<BoardEntry>,
  pub critique:  Vec<BoardEntry>,
}

impl QuestionColumns {
  pub fn get(&self, question_type: QuestionType) -> &[BoardEntry] {
    match question_type {
      QuestionType::Fact => &self.fact,
      QuestionType::Inference => &self.inference,
      QuestionType::Critique => &self.critique,
    }
  }

  fn get_mut(&mut self, question_type: QuestionType) -> &mut Vec<BoardEntry> {
    match question_type {
      QuestionType::Fact => &mut self.fact,
      QuestionType::Inference => &mut self.inference,
      QuestionType::Critique => &mut self.critique,
    }
  }

  pub fn len(&self) -> usize {
    self.fact.len() + self.inference.len() + self.critique.len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// The grouped question view for one topic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBoard {
  #[serde(rename = "A")]
  pub a: QuestionColumns,
  #[serde(rename = "B")]
  pub b: QuestionColumns,
}

impl QuestionBoard {
  /// Group `rows` by `(question_target, question_type)`, preserving row
  /// order within each group.
  pub fn from_rows(rows: &[SubmissionRow]) -> Self {
    let mut board = Self::default();
    for row in rows {
      board
        .columns_mut(row.question_target)
        .get_mut(row.question_type)
        .push(BoardEntry {
          question_text: row.question_text.clone(),
          student_name:  row.student_name.clone(),
        });
    }
    board
  }

  pub fn columns(&self, target: Stance) -> &QuestionColumns {
    match target {
      Stance::A => &self.a,
      Stance::B => &self.b,
    }
  }

  fn columns_mut(&mut self, target: Stance) -> &mut QuestionColumns {
    match target {
      Stance::A => &mut self.a,
      Stance::B => &mut self.b,
    }
  }

  /// Entries for one cell of the board.
  pub fn entries(&self, target: Stance, question_type: QuestionType) -> &[BoardEntry] {
    self.columns(target).get(question_type)
  }

  pub fn is_empty(&self) -> bool { self.a.is_empty() && self.b.is_empty() }
}
