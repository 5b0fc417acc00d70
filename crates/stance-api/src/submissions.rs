//! Handler for `POST /topics/{topic}/submissions`.
//!
//! The topic comes from the path; the body carries the rest of the form.
//! Blank question slots may be sent as-is and are dropped.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use stance_core::{
  classroom::Classroom,
  row::Stance,
  store::SheetStore,
  submission::{QuestionDraft, SubmissionForm},
};

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

/// JSON body accepted by `POST /topics/{topic}/submissions`.
#[derive(Debug, Deserialize)]
pub struct SubmissionBody {
  #[serde(default)]
  pub student_name:  String,
  #[serde(default)]
  pub student_id:    String,
  pub pre_position:  Stance,
  pub post_position: Stance,
  #[serde(default)]
  pub questions:     Vec<QuestionDraft>,
}

/// `POST /topics/{topic}/submissions`; returns 201 and the
/// [`SubmissionReceipt`](stance_core::classroom::SubmissionReceipt).
pub async fn create<S>(
  State(classroom): State<Arc<Classroom<S>>>,
  ApiPath(topic): ApiPath<String>,
  ApiJson(body): ApiJson<SubmissionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SheetStore,
{
  let topic = classroom.catalog().resolve(&topic)?;
  let form = SubmissionForm {
    topic,
    student_name:  body.student_name,
    student_id:    body.student_id,
    pre_position:  body.pre_position,
    post_position: body.post_position,
    questions:     body.questions,
  };

  let receipt = classroom.submit(form).await?;
  Ok((StatusCode::CREATED, Json(receipt)))
}
