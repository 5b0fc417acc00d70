//! Dashboard state and key dispatch.

use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use stance_core::{
  classroom::TopicResults,
  topic::{Topic, TopicCatalog},
};

use crate::refresh::RefreshEvent;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
  Continue,
  Quit,
  /// The selection moved; the refresh task must follow it.
  SelectTopic(Topic),
  Refresh,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Per-session dashboard state.
pub struct App {
  pub catalog:      TopicCatalog,
  /// The topic being shown and refreshed.
  pub selected:     Topic,
  /// Latest results for `selected`; `None` until the first load lands.
  pub results:      Option<TopicResults>,
  pub last_refresh: Option<DateTime<Local>>,
  /// One-line status message shown in the status bar.
  pub status_msg:   String,
  /// Scroll offset of the voter list.
  pub scroll:       u16,
  pub interval:     Duration,
}

impl App {
  pub fn new(catalog: TopicCatalog, selected: Topic, interval: Duration) -> Self {
    Self {
      status_msg: format!("Loading {selected}…"),
      catalog,
      selected,
      results: None,
      last_refresh: None,
      scroll: 0,
      interval,
    }
  }

  /// Position of the selected topic in the catalogue, for the tab bar.
  pub fn selected_index(&self) -> usize {
    self
      .catalog
      .topics()
      .iter()
      .position(|t| t == &self.selected)
      .unwrap_or_default()
  }

  // ── Refresh events ────────────────────────────────────────────────────────

  /// Fold a finished load into the view. Loads for a topic the user has
  /// already moved away from are dropped.
  pub fn apply(&mut self, event: RefreshEvent) {
    if event.topic() != &self.selected {
      return;
    }
    match event {
      RefreshEvent::Loaded(results) => {
        self.results = Some(results);
        self.last_refresh = Some(Local::now());
        self.status_msg.clear();
      }
      // Keep showing the previous results; they are only stale.
      RefreshEvent::Failed { error, .. } => {
        self.status_msg = format!("Error: {error}");
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return KeyOutcome::Quit;
    }

    match key.code {
      KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Quit,

      KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
        let next = self.catalog.next_after(&self.selected).clone();
        self.select(next)
      }
      KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
        let prev = self.catalog.prev_before(&self.selected).clone();
        self.select(prev)
      }
      KeyCode::Char(c @ '1'..='9') => {
        let index = c as usize - '1' as usize;
        match self.catalog.topics().get(index) {
          Some(topic) => {
            let topic = topic.clone();
            self.select(topic)
          }
          None => KeyOutcome::Continue,
        }
      }

      KeyCode::Char('r') => {
        self.status_msg = "Refreshing…".into();
        KeyOutcome::Refresh
      }

      KeyCode::Down | KeyCode::Char('j') => {
        let voters = self.results.as_ref().map_or(0, |r| r.tally.voters.len());
        if usize::from(self.scroll) + 1 < voters {
          self.scroll += 1;
        }
        KeyOutcome::Continue
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.scroll = self.scroll.saturating_sub(1);
        KeyOutcome::Continue
      }

      _ => KeyOutcome::Continue,
    }
  }

  fn select(&mut self, topic: Topic) -> KeyOutcome {
    if topic == self.selected {
      return KeyOutcome::Continue;
    }
    self.status_msg = format!("Loading {topic}…");
    self.selected = topic.clone();
    self.results = None;
    self.last_refresh = None;
    self.scroll = 0;
    KeyOutcome::SelectTopic(topic)
  }
}
