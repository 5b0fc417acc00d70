//! `stance`, the terminal client for a stance server.
//!
//! # Usage
//!
//! ```text
//! stance topics
//! stance submit --topic issue-1 --name Kim --id 1 --pre A --post B \
//!   --question "fact:A:Why?"
//! stance results --topic issue-1
//! stance --url http://class.local:8080 watch --interval 3
//! ```

mod app;
mod client;
mod refresh;
mod report;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use app::{App, KeyOutcome};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use refresh::RefreshHandle;
use serde::Deserialize;
use stance_core::{
  row::{QuestionType, Stance},
  submission::{MAX_QUESTIONS, QuestionDraft, SubmissionForm},
  topic::{Topic, TopicCatalog},
};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

const DEFAULT_URL: &str = "http://localhost:8080";
const DEFAULT_INTERVAL_SECS: u64 = 5;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "stance", about = "Vote and ask questions on classroom debate topics")]
struct Args {
  /// Path to a TOML config file (url, interval).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Base URL of the stance server (default: http://localhost:8080).
  #[arg(long, env = "STANCE_URL", global = true)]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List the topics the server accepts.
  Topics,

  /// Submit a vote with up to three questions.
  Submit {
    #[arg(long)]
    topic:    String,
    #[arg(long)]
    name:     String,
    #[arg(long)]
    id:       String,
    /// Stance before the presentation (A or B).
    #[arg(long)]
    pre:      Stance,
    /// Stance after the presentation (A or B).
    #[arg(long)]
    post:     Stance,
    /// A question as `type:target:text`, e.g. `critique:B:Is the sample biased?`.
    #[arg(long = "question", short = 'q', value_name = "TYPE:TARGET:TEXT", value_parser = parse_question)]
    questions: Vec<QuestionDraft>,
  },

  /// Print a topic's vote tally and question board.
  Results {
    #[arg(long)]
    topic: String,
  },

  /// Live dashboard that re-fetches results on a timer.
  Watch {
    /// Topic to open on (default: the server's first topic).
    #[arg(long)]
    topic:    Option<String>,
    /// Seconds between refreshes.
    #[arg(long)]
    interval: Option<u64>,
  },
}

fn parse_question(raw: &str) -> Result<QuestionDraft, String> {
  let mut parts = raw.splitn(3, ':');
  let (Some(kind), Some(target), Some(text)) = (parts.next(), parts.next(), parts.next())
  else {
    return Err("expected TYPE:TARGET:TEXT".into());
  };
  let question_type: QuestionType = kind.parse().map_err(|e| format!("{e}"))?;
  let target: Stance = target.parse().map_err(|e| format!("{e}"))?;
  Ok(QuestionDraft::new(question_type, target, text))
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Optional `--config` file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  interval: Option<u64>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // The dashboard owns the terminal; everything else may log to stderr.
  if !matches!(args.command, Command::Watch { .. }) {
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::WARN.into())
          .from_env_lossy(),
      )
      .with_writer(io::stderr)
      .init();
  }

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // --url / STANCE_URL, then the config file, then the built-in default.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };
  let client = ApiClient::new(api_config)?;

  match args.command {
    Command::Topics => {
      let list = client.list_topics().await?;
      for topic in &list.topics {
        let marker = if *topic == list.default { " (default)" } else { "" };
        println!("{topic}{marker}");
      }
    }

    Command::Submit { topic, name, id, pre, post, questions } => {
      if questions.len() > MAX_QUESTIONS {
        bail!("at most {MAX_QUESTIONS} questions per submission, got {}", questions.len());
      }
      let form = SubmissionForm {
        topic: Topic::new(topic),
        student_name: name,
        student_id: id,
        pre_position: pre,
        post_position: post,
        questions,
      };
      let receipt = client.submit(&form).await?;
      println!(
        "Recorded {} question(s) for {} (submission {})",
        receipt.rows_written, receipt.topic, receipt.submission_id
      );
    }

    Command::Results { topic } => {
      let results = client.results(&Topic::new(topic)).await?;
      print!("{}", report::render(&results));
    }

    Command::Watch { topic, interval } => {
      let secs = interval
        .or(file_cfg.interval)
        .unwrap_or(DEFAULT_INTERVAL_SECS)
        .max(1);
      watch(client, topic, Duration::from_secs(secs)).await?;
    }
  }

  Ok(())
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

async fn watch(client: ApiClient, topic: Option<String>, every: Duration) -> Result<()> {
  let list = client.list_topics().await?;
  let catalog = TopicCatalog::new(list.topics.iter().map(Topic::as_str));
  let selected = match topic {
    Some(raw) => catalog.resolve(&raw)?,
    None => list.default,
  };

  let fetch = move |topic: Topic| {
    let client = client.clone();
    async move { client.results(&topic).await }
  };
  let mut refresh = refresh::spawn(fetch, selected.clone(), every);
  let mut app = App::new(catalog, selected, every);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app, &mut refresh).await;

  // Stop refreshing before handing the terminal back.
  drop(refresh);
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  refresh: &mut RefreshHandle,
) -> Result<()> {
  loop {
    while let Some(event) = refresh.try_next() {
      app.apply(event);
    }

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Crossterm polling blocks; keep the refresh task running meanwhile.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    let Some(Event::Key(key)) = maybe_event else {
      continue;
    };
    if key.kind != KeyEventKind::Press {
      continue;
    }

    match app.handle_key(key) {
      KeyOutcome::Quit => break,
      KeyOutcome::SelectTopic(topic) => refresh.select(topic),
      KeyOutcome::Refresh => refresh.refresh_now(),
      KeyOutcome::Continue => {}
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_question_triples() {
    let q = parse_question("critique:b:Is the sample biased? Yes: maybe").unwrap();
    assert_eq!(q.question_type, QuestionType::Critique);
    assert_eq!(q.target, Stance::B);
    assert_eq!(q.text, "Is the sample biased? Yes: maybe");
  }

  #[test]
  fn rejects_malformed_questions() {
    assert!(parse_question("fact:A").is_err());
    assert!(parse_question("opinion:A:Why?").is_err());
    assert!(parse_question("fact:C:Why?").is_err());
  }

  #[test]
  fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Args::command().debug_assert();
  }

  #[test]
  fn submit_collects_repeated_questions() {
    let args = Args::try_parse_from([
      "stance", "submit", "--topic", "issue-1", "--name", "Kim", "--id", "1", "--pre", "A",
      "--post", "B", "-q", "fact:A:Why?", "-q", "inference:B:How?",
    ])
    .unwrap();
    match args.command {
      Command::Submit { questions, pre, post, .. } => {
        assert_eq!(questions.len(), 2);
        assert_eq!((pre, post), (Stance::A, Stance::B));
      }
      other => panic!("unexpected command {other:?}"),
    }
  }
}
