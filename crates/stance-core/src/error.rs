//! Error types for `stance-core`.

use thiserror::Error;

/// A boxed error coming out of a [`crate::store::SheetStore`] backend.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("student name and student id are both required")]
  MissingIdentity,

  #[error("at least one question with non-empty text is required")]
  NoQuestions,

  #[error("at most {max} questions may be submitted, got {0}", max = crate::submission::MAX_QUESTIONS)]
  TooManyQuestions(usize),

  #[error("unknown topic: {0:?}")]
  UnknownTopic(String),

  #[error("unknown stance: {0:?}")]
  InvalidStance(String),

  #[error("unknown question type: {0:?}")]
  InvalidQuestionType(String),

  #[error("failed to read partition {partition:?}: {source}")]
  StoreRead {
    partition: String,
    #[source]
    source:    StoreError,
  },

  #[error("failed to write partition {partition:?}: {source}")]
  StoreWrite {
    partition: String,
    #[source]
    source:    StoreError,
  },
}

impl Error {
  /// Whether the error is a rejected form the student can correct and
  /// resubmit, as opposed to a backend failure.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::MissingIdentity
        | Self::NoQuestions
        | Self::TooManyQuestions(_)
        | Self::InvalidStance(_)
        | Self::InvalidQuestionType(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
