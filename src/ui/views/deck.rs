use crate::deck::filter::{DropdownFilter, FilterOutcome, MissingTopicPolicy};
use crate::deck::similarity::{most_similar, SIMILAR_LIMIT};
use crate::deck::topic::TopicAxis;
use crate::deck::types::{Card, Page};
use crate::ui::components::{KeyResult, SearchEvent, SearchInput, TopicPicker, TopicPickerEvent};
use crate::ui::ensure_valid_selection;
use crate::ui::renderfns::truncate;
use crate::ui::view::{ShortcutInfo, View, ViewAction};
use crate::ui::views::CardDetailView;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use tracing::debug;

/// Root view: the topic dropdown above the list of visible cards
pub struct DeckView {
  page: Page,
  filter: DropdownFilter,
  /// Index of the most recently chosen option
  current: Option<usize>,
  last_outcome: Option<FilterOutcome>,

  list_state: ListState,
  picker: TopicPicker,
  search: SearchInput,
}

impl DeckView {
  pub fn new(page: Page, policy: MissingTopicPolicy) -> Self {
    let filter = DropdownFilter::init(&page, policy);
    Self {
      page,
      filter,
      current: None,
      last_outcome: None,
      list_state: ListState::default(),
      picker: TopicPicker::new(),
      search: SearchInput::new(),
    }
  }

  /// Apply the dropdown option at `index`
  pub fn select_option(&mut self, index: usize) {
    let outcome = self.filter.select(&mut self.page, index);
    if index < self.page.dropdown.options.len() {
      self.current = Some(index);
      self.last_outcome = Some(outcome);
    }
    self.list_state.select_first();
  }

  /// Apply the first option bound to `axis`; false if no option has it
  pub fn select_topic(&mut self, axis: &TopicAxis) -> bool {
    let index = self
      .page
      .dropdown
      .options
      .iter()
      .position(|o| o.axis.as_ref() == Some(axis));
    match index {
      Some(index) => {
        self.select_option(index);
        true
      }
      None => false,
    }
  }

  fn reset(&mut self) {
    debug!("deck reset");
    self.page.reset();
    self.current = None;
    self.last_outcome = None;
    self.search.clear();
    self.list_state.select_first();
  }

  /// Indexes of cards to list: visible and matching the search query
  fn shown(&self) -> Vec<usize> {
    self
      .page
      .visible_cards()
      .filter(|(_, card)| self.search.matches(&[card.comedian.as_str(), card.title.as_str()]))
      .map(|(i, _)| i)
      .collect()
  }

  fn open_detail(&self) -> ViewAction {
    let shown = self.shown();
    let Some(&index) = self.list_state.selected().and_then(|i| shown.get(i)) else {
      return ViewAction::None;
    };

    let similar: Vec<(Card, f64)> = most_similar(&self.page.cards, index, SIMILAR_LIMIT)
      .into_iter()
      .map(|(i, score)| (self.page.cards[i].clone(), score))
      .collect();

    ViewAction::Push(Box::new(CardDetailView::new(
      self.page.cards[index].clone(),
      self.page.dropdown.options.clone(),
      similar,
    )))
  }

  fn render_dropdown(&self, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
      Span::raw(" "),
      Span::styled(
        format!("[ {} ▾ ]", self.page.dropdown.label),
        Style::default().fg(Color::Black).bg(Color::Cyan),
      ),
    ];

    if let Some(outcome) = self.last_outcome {
      spans.push(Span::styled(
        format!(
          "  {} shown · {} hidden · {} unchanged",
          outcome.shown, outcome.hidden, outcome.untouched
        ),
        Style::default().fg(Color::DarkGray),
      ));
    }

    if !self.search.is_active() && !self.search.query().is_empty() {
      spans.push(Span::styled(
        format!("  /{}", self.search.query()),
        Style::default().fg(Color::Yellow),
      ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
  }

  fn render_cards(&mut self, frame: &mut Frame, area: Rect) {
    let shown = self.shown();
    ensure_valid_selection(&mut self.list_state, shown.len());

    let block = Block::default()
      .title(format!(" Cards ({}/{}) ", shown.len(), self.page.cards.len()))
      .title_alignment(Alignment::Center)
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Blue));

    if shown.is_empty() {
      let content = if self.page.cards.is_empty() {
        "The catalog has no cards."
      } else {
        "No cards match. Press 't' to pick another topic or 'r' to reset."
      };
      let paragraph = Paragraph::new(content)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
      frame.render_widget(paragraph, area);
      return;
    }

    let items: Vec<ListItem> = shown
      .iter()
      .map(|&i| {
        let card = &self.page.cards[i];
        let topics: Vec<&str> = card
          .topics
          .iter()
          .filter(|(_, member)| *member)
          .map(|(axis, _)| axis.as_str())
          .collect();

        ListItem::new(Line::from(vec![
          Span::styled(
            format!("{:<22}", truncate(&card.comedian, 22)),
            Style::default().fg(Color::Cyan),
          ),
          Span::raw(" "),
          Span::raw(format!("{:<40}", truncate(&card.title, 40))),
          Span::styled(format!(" {} ", card.year), Style::default().fg(Color::DarkGray)),
          if card.topics.is_empty() {
            Span::styled("untagged", Style::default().fg(Color::Red))
          } else {
            Span::styled(truncate(&topics.join(", "), 40), Style::default().fg(Color::Green))
          },
        ]))
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::DarkGray)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut self.list_state);
  }
}

impl View for DeckView {
  fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
    // Open dropdown menu takes every key
    match self.picker.handle_key(key) {
      KeyResult::Event(TopicPickerEvent::Selected(index)) => {
        self.select_option(index);
        return ViewAction::None;
      }
      KeyResult::Event(TopicPickerEvent::Cancelled) | KeyResult::Handled => {
        return ViewAction::None;
      }
      KeyResult::NotHandled => {}
    }

    match self.search.handle_key(key) {
      KeyResult::Event(SearchEvent::Changed(query)) => {
        debug!(%query, "search query changed");
        self.list_state.select_first();
        return ViewAction::None;
      }
      KeyResult::Event(SearchEvent::Submitted) => return ViewAction::None,
      KeyResult::Handled => return ViewAction::None,
      KeyResult::NotHandled => {}
    }

    match key.code {
      KeyCode::Char('j') | KeyCode::Down => self.list_state.select_next(),
      KeyCode::Char('k') | KeyCode::Up => self.list_state.select_previous(),
      KeyCode::Char('t') => self.picker.show(self.filter.bound_options(), self.current),
      KeyCode::Char(c @ '1'..='9') => {
        let index = c as usize - '1' as usize;
        if index < self.page.dropdown.options.len() {
          self.select_option(index);
        }
      }
      KeyCode::Char('r') => self.reset(),
      KeyCode::Enter => return self.open_detail(),
      KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Pop,
      _ => {}
    }
    ViewAction::None
  }

  fn render(&mut self, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
      .direction(Direction::Vertical)
      .constraints([
        Constraint::Length(1), // Dropdown button
        Constraint::Min(1),    // Cards
      ])
      .split(area);

    self.render_dropdown(frame, chunks[0]);
    self.render_cards(frame, chunks[1]);

    self
      .picker
      .render_overlay(frame, chunks[0], area, &self.page.dropdown.options);
    self.search.render_overlay(frame, chunks[1]);
  }

  fn breadcrumb_label(&self) -> String {
    match self.current {
      Some(_) => format!("Cards [{}]", self.page.dropdown.label),
      None => "Cards".to_string(),
    }
  }

  fn context(&self) -> Option<String> {
    Some(self.page.dropdown.label.clone())
  }

  fn shortcuts(&self) -> Vec<ShortcutInfo> {
    if self.picker.is_active() {
      return vec![
        ShortcutInfo::new("j/k", "move").with_priority(5),
        ShortcutInfo::new("Enter", "apply").with_priority(10),
        ShortcutInfo::new("Esc", "close").with_priority(20),
      ];
    }
    vec![
      ShortcutInfo::new("t", "topic").with_priority(5),
      ShortcutInfo::new("1-9", "quick topic").with_priority(6),
      ShortcutInfo::new("/", "search").with_priority(10),
      ShortcutInfo::new("r", "reset").with_priority(20),
      ShortcutInfo::new("q", "quit").with_priority(30),
    ]
  }
}
