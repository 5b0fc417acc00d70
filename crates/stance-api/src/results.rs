//! Read-only handlers for a topic's stored rows and derived views.
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | `GET`  | `/topics/{topic}/rows` | every stored row, insertion order |
//! | `GET`  | `/topics/{topic}/tally` | [`VoteTally`] |
//! | `GET`  | `/topics/{topic}/board` | [`QuestionBoard`] |
//! | `GET`  | `/topics/{topic}/results` | [`TopicResults`] (both views) |
//!
//! An unreadable store is reported as an empty topic, never as an error.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
};
use stance_core::{
  board::QuestionBoard,
  classroom::{Classroom, TopicResults},
  row::SubmissionRow,
  store::SheetStore,
  tally::VoteTally,
};

use crate::{error::ApiError, extract::ApiPath};

/// `GET /topics/{topic}/rows`
pub async fn rows<S>(
  State(classroom): State<Arc<Classroom<S>>>,
  ApiPath(topic): ApiPath<String>,
) -> Result<Json<Vec<SubmissionRow>>, ApiError>
where
  S: SheetStore,
{
  let topic = classroom.catalog().resolve(&topic)?;
  Ok(Json(classroom.rows(&topic).await?))
}

/// `GET /topics/{topic}/tally`
pub async fn tally<S>(
  State(classroom): State<Arc<Classroom<S>>>,
  ApiPath(topic): ApiPath<String>,
) -> Result<Json<VoteTally>, ApiError>
where
  S: SheetStore,
{
  let topic = classroom.catalog().resolve(&topic)?;
  let rows = classroom.rows(&topic).await?;
  Ok(Json(VoteTally::from_rows(&rows)))
}

/// `GET /topics/{topic}/board`
pub async fn board<S>(
  State(classroom): State<Arc<Classroom<S>>>,
  ApiPath(topic): ApiPath<String>,
) -> Result<Json<QuestionBoard>, ApiError>
where
  S: SheetStore,
{
  let topic = classroom.catalog().resolve(&topic)?;
  let rows = classroom.rows(&topic).await?;
  Ok(Json(QuestionBoard::from_rows(&rows)))
}

/// `GET /topics/{topic}/results`
pub async fn results<S>(
  State(classroom): State<Arc<Classroom<S>>>,
  ApiPath(topic): ApiPath<String>,
) -> Result<Json<TopicResults>, ApiError>
where
  S: SheetStore,
{
  let topic = classroom.catalog().resolve(&topic)?;
  Ok(Json(classroom.results(&topic).await?))
}
