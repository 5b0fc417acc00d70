//! Dashboard rendering: header tabs, tally and board panes, status bar.

pub mod board;
pub mod tally;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Draw one frame of the dashboard.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let refreshed = match app.last_refresh {
    Some(at) => format!("refreshed {} ", at.format("%H:%M:%S")),
    None => "not loaded ".to_string(),
  };
  let right_width = refreshed.chars().count() as u16;

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Length(8),
      Constraint::Min(0),
      Constraint::Length(right_width),
    ])
    .split(area);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  f.render_widget(block, area);

  f.render_widget(
    Paragraph::new(Span::styled(
      " stance",
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )),
    cols[0],
  );

  let titles = app.catalog.topics().iter().map(|t| t.to_string());
  let tabs = Tabs::new(titles)
    .select(app.selected_index())
    .style(Style::default().fg(Color::Gray))
    .highlight_style(
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )
    .divider("│");
  f.render_widget(tabs, cols[1]);

  f.render_widget(
    Paragraph::new(Span::styled(refreshed, Style::default().fg(Color::Gray))),
    cols[2],
  );
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let Some(results) = &app.results else {
    draw_placeholder(f, area, app);
    return;
  };

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
    .split(area);

  tally::draw(f, cols[0], &results.tally, app.scroll);
  board::draw(f, cols[1], &results.board);
}

fn draw_placeholder(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" {} ", app.selected))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      "Waiting for results…",
      Style::default().fg(Color::DarkGray),
    ))),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let hints = format!(
    "Tab/←→ topic  1-9 jump  r refresh  ↑↓ scroll  q quit  (every {}s)",
    app.interval.as_secs()
  );
  let status = if app.status_msg.is_empty() {
    hints
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    " WATCH ",
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
