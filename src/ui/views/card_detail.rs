use crate::deck::topic::TopicAxis;
use crate::deck::types::{Card, DropdownOption};
use crate::ui::renderfns::{flag_color, percent, truncate};
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// View for a single card: metadata, topic flags, and similar cards
pub struct CardDetailView {
  card: Card,
  options: Vec<DropdownOption>,
  similar: Vec<(Card, f64)>,
  scroll: u16,
  /// Furthest scroll that still fills the last rendered viewport
  max_scroll: u16,
}

impl CardDetailView {
  pub fn new(card: Card, options: Vec<DropdownOption>, similar: Vec<(Card, f64)>) -> Self {
    Self {
      card,
      options,
      similar,
      scroll: 0,
      max_scroll: 0,
    }
  }

  /// Rows of the topic table: every dropdown topic, then axes only the card knows
  fn topic_rows(&self) -> Vec<(String, &TopicAxis, Option<bool>)> {
    let mut rows: Vec<(String, &TopicAxis, Option<bool>)> = self
      .options
      .iter()
      .filter_map(|o| {
        o.axis
          .as_ref()
          .map(|axis| (o.text.clone(), axis, self.card.topics.get(axis)))
      })
      .collect();

    for (axis, member) in self.card.topics.iter() {
      if !rows.iter().any(|(_, listed, _)| *listed == axis) {
        rows.push((axis.to_string(), axis, Some(member)));
      }
    }
    rows
  }

  fn lines(&self) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::Yellow);
    let mut lines = vec![
      Line::from(vec![
        Span::styled(self.card.comedian.as_str(), Style::default().fg(Color::Cyan).bold()),
        Span::raw(": "),
        Span::styled(self.card.title.as_str(), Style::default().bold()),
      ]),
      Line::from(vec![
        Span::styled("Year:  ", label),
        Span::raw(self.card.year.to_string()),
      ]),
      Line::from(vec![
        Span::styled("Id:    ", label),
        Span::raw(self.card.id.as_str()),
      ]),
    ];
    if let Some(url) = &self.card.image_url {
      lines.push(Line::from(vec![
        Span::styled("Image: ", label),
        Span::raw(url.as_str()),
      ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Topics", label.bold())));
    for (name, axis, flag) in self.topic_rows() {
      let mark = match flag {
        Some(true) => "●",
        Some(false) => "○",
        None => "?",
      };
      let weight = self
        .card
        .weights
        .get(axis)
        .map(|w| format!("  {:.2}", w))
        .unwrap_or_default();
      lines.push(Line::from(vec![
        Span::styled(format!("  {} ", mark), Style::default().fg(flag_color(flag))),
        Span::raw(format!("{:<28}", truncate(&name, 28))),
        Span::styled(weight, Style::default().fg(Color::DarkGray)),
      ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("More like this", label.bold())));
    if self.similar.is_empty() {
      lines.push(Line::from(Span::styled(
        "  Nothing to compare with.",
        Style::default().fg(Color::DarkGray),
      )));
    }
    for (card, score) in &self.similar {
      lines.push(Line::from(vec![
        Span::styled(format!("  {} ", percent(*score)), Style::default().fg(Color::Green)),
        Span::raw(truncate(&card.heading(), 70)),
      ]));
    }
    lines
  }
}

impl View for CardDetailView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    match key.code {
      KeyCode::Char('j') | KeyCode::Down => {
        self.scroll = self.scroll.saturating_add(1).min(self.max_scroll)
      }
      KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let block = Block::default()
      .title(format!(" {} ", self.card.title))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    let visible = block.inner(area).height;
    self.max_scroll = u16::try_from(self.lines().len())
      .unwrap_or(u16::MAX)
      .saturating_sub(visible);
    self.scroll = self.scroll.min(self.max_scroll);

    let paragraph = Paragraph::new(self.lines())
      .block(block)
      .wrap(Wrap { trim: false })
      .scroll((self.scroll, 0));
    frame.render_widget(paragraph, area);
  }

  fn breadcrumb_label(&self) -> String {
    self.card.comedian.clone()
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    vec![
      ShortcutInfo::new("j/k", "scroll").with_priority(10),
      ShortcutInfo::new("q", "back").with_priority(30),
    ]
  }
}
