//! Handler for `GET /topics`.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Serialize;
use stance_core::{classroom::Classroom, store::SheetStore, topic::Topic};

#[derive(Debug, Serialize)]
pub struct TopicList {
  /// Every accepted topic, in catalogue order.
  pub topics:  Vec<Topic>,
  /// The topic a fresh session starts on.
  pub default: Topic,
}

/// `GET /topics`
pub async fn list<S>(State(classroom): State<Arc<Classroom<S>>>) -> Json<TopicList>
where
  S: SheetStore,
{
  let catalog = classroom.catalog();
  Json(TopicList {
    topics:  catalog.topics().to_vec(),
    default: catalog.first().clone(),
  })
}
