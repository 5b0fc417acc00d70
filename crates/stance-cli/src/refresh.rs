//! Timer-driven results refresh for the dashboard.
//!
//! A single background task owns the fetch loop. The dashboard tells it which
//! topic is selected over a `watch` channel and receives finished loads over an
//! `mpsc` channel, so the draw loop never awaits the network.

use std::{future::Future, sync::Arc, time::Duration};

use stance_core::{classroom::TopicResults, topic::Topic};
use tokio::{
  sync::{Notify, mpsc, watch},
  task::JoinHandle,
  time::{self, MissedTickBehavior},
};

/// Outcome of one fetch, tagged with the topic it was made for.
#[derive(Debug)]
pub enum RefreshEvent {
  Loaded(TopicResults),
  Failed { topic: Topic, error: String },
}

impl RefreshEvent {
  pub fn topic(&self) -> &Topic {
    match self {
      Self::Loaded(results) => &results.topic,
      Self::Failed { topic, .. } => topic,
    }
  }
}

/// Handle to the refresh task. Dropping it aborts the task.
pub struct RefreshHandle {
  topic:  watch::Sender<Topic>,
  force:  Arc<Notify>,
  events: mpsc::UnboundedReceiver<RefreshEvent>,
  task:   JoinHandle<()>,
}

/// Start refreshing `topic` every `every`, fetching once immediately.
///
/// A topic change or a forced refresh fetches straight away and restarts the
/// interval from that point.
pub fn spawn<F, Fut>(fetch: F, topic: Topic, every: Duration) -> RefreshHandle
where
  F: Fn(Topic) -> Fut + Send + 'static,
  Fut: Future<Output = anyhow::Result<TopicResults>> + Send + 'static,
{
  let (topic_tx, mut topic_rx) = watch::channel(topic);
  let (event_tx, events) = mpsc::unbounded_channel();
  let force = Arc::new(Notify::new());
  let forced = force.clone();

  let task = tokio::spawn(async move {
    let mut ticker = time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
      tokio::select! {
        _ = ticker.tick() => {}
        changed = topic_rx.changed() => {
          if changed.is_err() {
            break;
          }
          ticker.reset();
        }
        _ = forced.notified() => ticker.reset(),
      }

      let topic = topic_rx.borrow_and_update().clone();
      let event = match fetch(topic.clone()).await {
        Ok(results) => RefreshEvent::Loaded(results),
        Err(e) => {
          tracing::debug!(%topic, error = %e, "refresh failed");
          RefreshEvent::Failed { topic, error: format!("{e:#}") }
        }
      };

      if event_tx.send(event).is_err() {
        break;
      }
    }
  });

  RefreshHandle { topic: topic_tx, force, events, task }
}

impl RefreshHandle {
  /// Switch the refresh loop to `topic` and fetch it now.
  pub fn select(&self, topic: Topic) { self.topic.send_replace(topic); }

  /// Fetch the current topic without waiting for the next tick.
  pub fn refresh_now(&self) { self.force.notify_one(); }

  /// The next finished load, if one is waiting.
  pub fn try_next(&mut self) -> Option<RefreshEvent> { self.events.try_recv().ok() }
}

impl Drop for RefreshHandle {
  fn drop(&mut self) { self.task.abort(); }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::{AtomicUsize, Ordering};

  use anyhow::anyhow;

  use super::*;

  const LONG: Duration = Duration::from_secs(600);

  async fn next(handle: &mut RefreshHandle) -> RefreshEvent {
    time::timeout(Duration::from_secs(2), handle.events.recv())
      .await
      .expect("no refresh event in time")
      .expect("refresh task ended")
  }

  fn counting(calls: Arc<AtomicUsize>) -> impl Fn(Topic) -> std::future::Ready<anyhow::Result<TopicResults>> {
    move |topic| {
      calls.fetch_add(1, Ordering::SeqCst);
      std::future::ready(Ok(TopicResults::from_rows(topic, &[])))
    }
  }

  #[tokio::test]
  async fn fetches_immediately_on_spawn() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handle = spawn(counting(calls.clone()), Topic::from("issue-1"), LONG);

    let event = next(&mut handle).await;
    assert!(matches!(&event, RefreshEvent::Loaded(r) if r.topic.as_str() == "issue-1"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn selecting_a_topic_fetches_it_right_away() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handle = spawn(counting(calls), Topic::from("issue-1"), LONG);
    next(&mut handle).await;

    handle.select(Topic::from("issue-2"));
    let event = next(&mut handle).await;
    assert_eq!(event.topic().as_str(), "issue-2");
  }

  #[tokio::test]
  async fn refresh_now_refetches_current_topic() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handle = spawn(counting(calls.clone()), Topic::from("issue-3"), LONG);
    next(&mut handle).await;

    handle.refresh_now();
    let event = next(&mut handle).await;
    assert_eq!(event.topic().as_str(), "issue-3");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn ticks_repeatedly() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handle =
      spawn(counting(calls.clone()), Topic::from("issue-1"), Duration::from_millis(10));

    for _ in 0..3 {
      next(&mut handle).await;
    }
    assert!(calls.load(Ordering::SeqCst) >= 3);
  }

  #[tokio::test]
  async fn failures_carry_the_topic() {
    let fetch = |_topic: Topic| async { Err::<TopicResults, _>(anyhow!("connection refused")) };
    let mut handle = spawn(fetch, Topic::from("issue-4"), LONG);

    match next(&mut handle).await {
      RefreshEvent::Failed { topic, error } => {
        assert_eq!(topic.as_str(), "issue-4");
        assert!(error.contains("connection refused"));
      }
      other => panic!("expected failure, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn dropping_the_handle_stops_fetching() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut handle =
      spawn(counting(calls.clone()), Topic::from("issue-1"), Duration::from_millis(10));
    next(&mut handle).await;
    drop(handle);

    time::sleep(Duration::from_millis(20)).await;
    let settled = calls.load(Ordering::SeqCst);
    time::sleep(Duration::from_millis(60)).await;
    assert_eq!(calls.load(Ordering::SeqCst), settled);
  }
}
