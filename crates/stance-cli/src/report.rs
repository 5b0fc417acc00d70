//! Plain-text rendering of a topic's results for `stance results`.

use stance_core::{
  classroom::TopicResults,
  row::{QuestionType, Stance},
  tally::StanceRoster,
};

/// Human-readable label for a question type column.
pub fn question_type_label(question_type: QuestionType) -> &'static str {
  match question_type {
    QuestionType::Fact => "Fact",
    QuestionType::Inference => "Inference",
    QuestionType::Critique => "Critique",
  }
}

fn roster_line(label: &str, roster: &StanceRoster) -> String {
  let counts: Vec<String> = Stance::ALL
    .into_iter()
    .map(|stance| {
      let names = roster.names(stance);
      format!("{stance} ({}): {}", names.len(), names.join(", "))
    })
    .collect();
  format!("{label:<7}  {}", counts.join("  "))
}

/// Render `results` the way a presenter reads them aloud: votes, stance
/// changes, then the question board.
pub fn render(results: &TopicResults) -> String {
  let tally = &results.tally;
  let mut lines = vec![format!(
    "[{}] {} student(s), {} question(s)",
    results.topic,
    tally.total(),
    results.row_count
  )];

  if results.row_count == 0 {
    lines.push("No submissions yet.".into());
  } else {
    lines.push(String::new());
    lines.push(roster_line("Before", &tally.pre));
    lines.push(roster_line("After", &tally.post));
    lines.push(String::new());

    if tally.changed.is_empty() {
      lines.push("Nobody has changed stance yet.".into());
    } else {
      lines.push(format!("Changed stance ({}):", tally.changed.len()));
      lines.extend(tally.changed.iter().map(|voter| {
        format!(
          "  * {} ({}): {} -> {}",
          voter.student_name, voter.student_id, voter.pre_position, voter.post_position
        )
      }));
    }

    for stance in Stance::ALL {
      let columns = results.board.columns(stance);
      lines.push(String::new());
      lines.push(format!("Questions for stance {stance} ({})", columns.len()));
      for question_type in QuestionType::ALL {
        let entries = columns.get(question_type);
        if entries.is_empty() {
          continue;
        }
        lines.push(format!("  {}:", question_type_label(question_type)));
        lines.extend(
          entries
            .iter()
            .map(|entry| format!("    - {} ({})", entry.question_text, entry.student_name)),
        );
      }
    }
  }

  let mut out = lines.join("\n");
  out.push('\n');
  out
}

#[cfg(test)]
mod tests {
  use stance_core::{row::SubmissionRow, topic::Topic};

  use super::*;

  // Built through serde so the CLI needs no uuid dependency of its own.
  fn row(name: &str, pre: Stance, post: Stance, text: &str) -> SubmissionRow {
    serde_json::from_value(serde_json::json!({
      "topic": "issue-1",
      "student_name": name,
      "student_id": "1",
      "pre_position": pre,
      "post_position": post,
      "question_type": "fact",
      "question_text": text,
      "question_target": "A",
      "submission_id": "6f1f3c4e-8b0e-4c53-9a49-7c1de4c3b0a1",
      "submitted_at": "2024-05-01T09:00:00Z",
    }))
    .unwrap()
  }

  #[test]
  fn renders_kim_example() {
    let rows = vec![row("Kim", Stance::A, Stance::B, "Why?")];
    let text = render(&TopicResults::from_rows(Topic::from("issue-1"), &rows));

    assert!(text.starts_with("[issue-1] 1 student(s), 1 question(s)"));
    assert!(text.contains("Before   A (1): Kim  B (0): \n"));
    assert!(text.contains("After    A (0):   B (1): Kim\n"));
    assert!(text.contains("* Kim (1): A -> B"));
    assert!(text.contains("  Fact:\n    - Why? (Kim)"));
  }

  #[test]
  fn renders_empty_topic() {
    let text = render(&TopicResults::from_rows(Topic::from("issue-2"), &[]));
    assert_eq!(text, "[issue-2] 0 student(s), 0 question(s)\nNo submissions yet.\n");
  }

  #[test]
  fn notes_when_nobody_changed() {
    let rows = vec![row("Lee", Stance::B, Stance::B, "How?")];
    let text = render(&TopicResults::from_rows(Topic::from("issue-1"), &rows));
    assert!(text.contains("Nobody has changed stance yet."));
    assert!(!text.contains("Questions for stance B (1)"));
  }
}
