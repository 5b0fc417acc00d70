//! Vote tally pane: counts, then one line per student.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use stance_core::{
  row::Stance,
  tally::{StanceRoster, VoteTally},
};

fn count_line(label: &str, roster: &StanceRoster) -> Line<'static> {
  let mut spans = vec![Span::styled(
    format!("{label:<8}"),
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
  )];
  for stance in Stance::ALL {
    spans.push(Span::raw(format!("{stance} {:<4}", roster.count(stance))));
  }
  Line::from(spans)
}

/// Render `tally` into `area`, skipping the first `scroll` lines of the
/// student list.
pub fn draw(f: &mut Frame, area: Rect, tally: &VoteTally, scroll: u16) {
  let block = Block::default()
    .title(format!(
      " Votes ({} students, {} changed) ",
      tally.total(),
      tally.changed.len()
    ))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = vec![
    count_line("Before", &tally.pre),
    count_line("After", &tally.post),
    Line::from(""),
  ];

  if tally.voters.is_empty() {
    lines.push(Line::from(Span::styled(
      "No submissions yet.",
      Style::default().fg(Color::DarkGray),
    )));
  }

  for voter in tally.voters.iter().skip(usize::from(scroll)) {
    let movement = format!("{} → {}", voter.pre_position, voter.post_position);
    let (marker, style) = if voter.changed {
      ("* ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    } else {
      ("  ", Style::default())
    };
    lines.push(Line::from(vec![
      Span::styled(marker, style),
      Span::styled(format!("{:<6}", movement), style),
      Span::styled(voter.student_name.clone(), style),
      Span::styled(
        format!(" ({})", voter.student_id),
        Style::default().fg(Color::DarkGray),
      ),
    ]));
  }

  f.render_widget(Paragraph::new(lines), inner);
}
