//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use stance_core::{
  classroom::Classroom,
  row::{QuestionType, Stance, SubmissionRow},
  store::{Partition, SheetStore, StoreLayout},
  submission::{QuestionDraft, SubmissionForm},
  topic::{Topic, TopicCatalog},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn row(name: &str, text: &str) -> SubmissionRow {
  SubmissionRow {
    topic:           Topic::from("issue-1"),
    student_name:    name.into(),
    student_id:      "20240001".into(),
    pre_position:    Stance::A,
    post_position:   Stance::B,
    question_type:   QuestionType::Inference,
    question_text:   text.into(),
    question_target: Stance::B,
    submission_id:   Uuid::new_v4(),
    submitted_at:    Utc.with_ymd_and_hms(2025, 3, 4, 9, 30, 0).unwrap(),
  }
}

// ─── Raw partition access ────────────────────────────────────────────────────

#[tokio::test]
async fn missing_partition_reads_empty() {
  let s = store().await;
  let rows = s.read(&Partition::new("never-written")).await.unwrap();
  assert!(rows.is_empty());
}

#[tokio::test]
async fn write_then_read_preserves_fields_and_order() {
  let s = store().await;
  let p = Partition::new("issue-1");
  let written = vec![row("Kim", "first"), row("Lee", "second"), row("Kim", "third")];

  s.write(&p, written.clone()).await.unwrap();

  let read = s.read(&p).await.unwrap();
  assert_eq!(read, written);
}

#[tokio::test]
async fn write_replaces_previous_contents() {
  let s = store().await;
  let p = Partition::new("issue-1");

  s.write(&p, vec![row("Kim", "a"), row("Lee", "b")]).await.unwrap();
  s.write(&p, vec![row("Park", "c")]).await.unwrap();

  let read = s.read(&p).await.unwrap();
  assert_eq!(read.len(), 1);
  assert_eq!(read[0].student_name, "Park");
}

#[tokio::test]
async fn partitions_are_isolated() {
  let s = store().await;
  s.write(&Partition::new("issue-1"), vec![row("Kim", "a")]).await.unwrap();
  s.write(&Partition::new("all"), vec![row("Kim", "a"), row("Lee", "b")])
    .await
    .unwrap();

  assert_eq!(s.read(&Partition::new("issue-1")).await.unwrap().len(), 1);
  assert_eq!(s.read(&Partition::new("all")).await.unwrap().len(), 2);
  assert_eq!(
    s.partitions().await.unwrap(),
    [Partition::new("all"), Partition::new("issue-1")]
  );
}

#[tokio::test]
async fn writing_an_empty_partition_still_registers_it() {
  let s = store().await;
  s.write(&Partition::new("issue-4"), Vec::new()).await.unwrap();

  assert!(s.read(&Partition::new("issue-4")).await.unwrap().is_empty());
  assert_eq!(s.partitions().await.unwrap(), [Partition::new("issue-4")]);
}

// ─── Through the classroom ───────────────────────────────────────────────────

#[tokio::test]
async fn classroom_round_trip_with_aggregate_sheet() {
  let room = Classroom::new(
    store().await,
    TopicCatalog::default(),
    StoreLayout::PerTopic { aggregate: Some("all".into()) },
  );

  let receipt = room
    .submit(SubmissionForm {
      topic:         Topic::from("issue-2"),
      student_name:  "Kim".into(),
      student_id:    "1".into(),
      pre_position:  Stance::A,
      post_position: Stance::B,
      questions:     vec![
        QuestionDraft::new(QuestionType::Fact, Stance::A, "Why?"),
        QuestionDraft::new(QuestionType::Critique, Stance::B, "Says who?"),
      ],
    })
    .await
    .unwrap();
  assert_eq!(receipt.rows_written, 2);

  let results = room.results(&Topic::from("issue-2")).await.unwrap();
  assert_eq!(results.tally.total(), 1);
  assert_eq!(results.tally.changed.len(), 1);
  assert_eq!(results.board.entries(Stance::B, QuestionType::Critique)[0].question_text, "Says who?");

  let all = room.store().read(&Partition::new("all")).await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(all.iter().all(|r| r.submission_id == receipt.submission_id));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_to_one_topic_all_persist() {
  let room = std::sync::Arc::new(Classroom::new(
    store().await,
    TopicCatalog::default(),
    StoreLayout::default(),
  ));

  let mut tasks = tokio::task::JoinSet::new();
  for n in 0..20 {
    let room = room.clone();
    tasks.spawn(async move {
      room
        .submit(SubmissionForm {
          topic:         Topic::from("issue-1"),
          student_name:  format!("Student {n}"),
          student_id:    n.to_string(),
          pre_position:  Stance::A,
          post_position: Stance::A,
          questions:     vec![QuestionDraft::new(QuestionType::Fact, Stance::B, "How?")],
        })
        .await
    });
  }
  while let Some(joined) = tasks.join_next().await {
    joined.unwrap().unwrap();
  }

  let rows = room.store().read(&Partition::new("issue-1")).await.unwrap();
  assert_eq!(rows.len(), 20);
  assert_eq!(room.results(&Topic::from("issue-1")).await.unwrap().tally.total(), 20);
}
