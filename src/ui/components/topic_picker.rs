use super::KeyResult;
use crate::deck::types::DropdownOption;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

/// Events emitted by the topic picker that parent needs to handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicPickerEvent {
  /// Option at this index was chosen
  Selected(usize),
  /// Picker closed without a choice
  Cancelled,
}

/// Dropdown menu overlay listing the topic options
#[derive(Debug, Clone, Default)]
pub struct TopicPicker {
  active: bool,
  len: usize,
  selected: usize,
}

impl TopicPicker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Open the menu over `len` options, highlighting `current` if valid
  pub fn show(&mut self, len: usize, current: Option<usize>) {
    self.active = true;
    self.len = len;
    self.selected = current.filter(|&i| i < len).unwrap_or(0);
  }

  pub fn hide(&mut self) {
    self.active = false;
    self.selected = 0;
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> KeyResult<TopicPickerEvent> {
    if !self.active {
      return KeyResult::NotHandled;
    }

    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => {
        self.hide();
        KeyResult::Event(TopicPickerEvent::Cancelled)
      }
      KeyCode::Enter => {
        let event = if self.selected < self.len {
          TopicPickerEvent::Selected(self.selected)
        } else {
          TopicPickerEvent::Cancelled
        };
        self.hide();
        KeyResult::Event(event)
      }
      KeyCode::Char('j') | KeyCode::Down => {
        if self.len > 0 {
          self.selected = (self.selected + 1) % self.len;
        }
        KeyResult::Handled
      }
      KeyCode::Char('k') | KeyCode::Up => {
        if self.len > 0 {
          self.selected = if self.selected == 0 {
            self.len - 1
          } else {
            self.selected - 1
          };
        }
        KeyResult::Handled
      }
      _ => KeyResult::Handled,
    }
  }

  /// Render the menu below `anchor` (the dropdown button) if active
  pub fn render_overlay(
    &self,
    frame: &mut Frame,
    anchor: Rect,
    area: Rect,
    options: &[DropdownOption],
  ) {
    if !self.active || options.is_empty() {
      return;
    }

    let max_text_len = options
      .iter()
      .map(|o| o.text.chars().count())
      .max()
      .unwrap_or(10);
    let width = (max_text_len as u16 + 6).max(20).min(area.width);
    let top = anchor.y + anchor.height;
    let height = (options.len() as u16 + 2).min(area.bottom().saturating_sub(top));
    if height < 3 {
      return;
    }

    let overlay_area = Rect::new(anchor.x, top, width, height);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::Yellow))
      .title(" Topics ");

    let items: Vec<ListItem> = options
      .iter()
      .map(|option| {
        let style = if option.axis.is_some() {
          Style::default().fg(Color::Cyan)
        } else {
          Style::default().fg(Color::DarkGray)
        };
        ListItem::new(Line::from(Span::styled(option.text.as_str(), style)))
      })
      .collect();

    let list = List::new(items)
      .block(block)
      .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    let mut state = ListState::default();
    state.select(Some(self.selected));

    frame.render_stateful_widget(list, overlay_area, &mut state);
  }
}
