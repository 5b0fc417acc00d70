//! Question board pane. One block per target stance, one column per
//! question type.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use stance_core::{
  board::{QuestionBoard, QuestionColumns},
  row::{QuestionType, Stance},
};

use crate::report::question_type_label;

pub fn draw(f: &mut Frame, area: Rect, board: &QuestionBoard) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area);

  for (stance, row) in Stance::ALL.into_iter().zip(rows.iter()) {
    draw_stance(f, *row, stance, board.columns(stance));
  }
}

fn draw_stance(f: &mut Frame, area: Rect, stance: Stance, columns: &QuestionColumns) {
  let block = Block::default()
    .title(format!(" Questions for {stance} ({}) ", columns.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 3); 3])
    .split(inner);

  for (question_type, col) in QuestionType::ALL.into_iter().zip(cols.iter()) {
    let entries = columns.get(question_type);

    let mut lines = vec![Line::from(Span::styled(
      format!("{} ({})", question_type_label(question_type), entries.len()),
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))];
    for entry in entries {
      lines.push(Line::from(vec![
        Span::raw(format!("• {} ", entry.question_text)),
        Span::styled(
          format!("— {}", entry.student_name),
          Style::default().fg(Color::DarkGray),
        ),
      ]));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), *col);
  }
}
