use super::topic::{TopicAxis, TopicFlags};
use std::collections::BTreeMap;

/// One stand-up special shown as a card in the deck
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
  pub id: String,
  pub comedian: String,
  pub title: String,
  pub year: u16,
  pub image_url: Option<String>,
  /// Raw topic weights, empty when the catalog gave flags directly
  pub weights: BTreeMap<TopicAxis, f64>,
  pub topics: TopicFlags,
  pub visible: bool,
}

impl Card {
  /// Weight used for similarity: the raw weight if known, otherwise 1.0/0.0 from the flag
  pub fn weight(&self, axis: &TopicAxis) -> f64 {
    match self.weights.get(axis) {
      Some(w) => *w,
      None => match self.topics.get(axis) {
        Some(true) => 1.0,
        _ => 0.0,
      },
    }
  }

  pub fn heading(&self) -> String {
    format!("{}: {} ({})", self.comedian, self.title, self.year)
  }
}

/// A selectable dropdown entry. `axis` is `None` when the option carries no topic id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
  pub text: String,
  pub axis: Option<TopicAxis>,
}

impl DropdownOption {
  pub fn new(text: impl Into<String>, axis: Option<TopicAxis>) -> Self {
    Self {
      text: text.into(),
      axis,
    }
  }
}

/// The dropdown control: its button label, mirrored value, and options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
  pub label: String,
  pub value: String,
  pub options: Vec<DropdownOption>,
}

impl Dropdown {
  pub const PLACEHOLDER: &'static str = "Filter by topic";

  pub fn new(options: Vec<DropdownOption>) -> Self {
    Self {
      label: Self::PLACEHOLDER.to_string(),
      value: String::new(),
      options,
    }
  }

  /// Restore the placeholder label
  pub fn reset(&mut self) {
    self.label = Self::PLACEHOLDER.to_string();
    self.value.clear();
  }
}

/// Root container: the dropdown and the cards it filters
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
  pub dropdown: Dropdown,
  pub cards: Vec<Card>,
}

impl Page {
  pub fn new(dropdown: Dropdown, cards: Vec<Card>) -> Self {
    Self { dropdown, cards }
  }

  pub fn visible_cards(&self) -> impl Iterator<Item = (usize, &Card)> {
    self.cards.iter().enumerate().filter(|(_, c)| c.visible)
  }

  /// Make every card visible again and reset the dropdown label
  pub fn reset(&mut self) {
    self.dropdown.reset();
    for card in &mut self.cards {
      card.visible = true;
    }
  }
}
