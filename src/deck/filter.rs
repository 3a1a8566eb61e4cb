//! Dropdown-driven card filter.
//!
//! Choosing a dropdown option relabels the dropdown and shows or hides each
//! card according to its flag on the option's topic axis. A selection runs to
//! completion synchronously and never fails: options without an axis, indexes
//! past the end, and cards without a flag all degrade to "change nothing".

use super::types::Page;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// What to do with a card that has no flag for the selected axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTopicPolicy {
  /// Leave the card's visibility as it was
  #[default]
  Keep,
  /// Treat a missing flag as "not a member" and hide the card
  Hide,
}

/// Counts of what a single selection did to the cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
  pub shown: usize,
  pub hidden: usize,
  pub untouched: usize,
}

/// Click handler bound to every option of a page's dropdown
#[derive(Debug, Clone)]
pub struct DropdownFilter {
  policy: MissingTopicPolicy,
  bound: usize,
}

impl DropdownFilter {
  /// Bind to the dropdown of `page`. Call once at startup.
  pub fn init(page: &Page, policy: MissingTopicPolicy) -> Self {
    let bound = page.dropdown.options.len();
    let unlabelled = page
      .dropdown
      .options
      .iter()
      .filter(|o| o.axis.is_none())
      .count();
    if unlabelled > 0 {
      warn!(unlabelled, "dropdown options without a topic id will not filter cards");
    }
    info!(options = bound, cards = page.cards.len(), ?policy, "dropdown filter bound");
    Self { policy, bound }
  }

  /// Number of options bound at init
  pub fn bound_options(&self) -> usize {
    self.bound
  }

  /// Apply the option at `index` to `page`.
  pub fn select(&self, page: &mut Page, index: usize) -> FilterOutcome {
    let Some(option) = page.dropdown.options.get(index).cloned() else {
      warn!(index, options = page.dropdown.options.len(), "selected option does not exist");
      return FilterOutcome {
        untouched: page.cards.len(),
        ..FilterOutcome::default()
      };
    };

    page.dropdown.label = option.text.clone();
    page.dropdown.value = option.text.clone();

    let Some(axis) = option.axis else {
      warn!(text = %option.text, "option has no topic id, visibility unchanged");
      return FilterOutcome {
        untouched: page.cards.len(),
        ..FilterOutcome::default()
      };
    };

    let mut outcome = FilterOutcome::default();
    for card in &mut page.cards {
      match (card.topics.get(&axis), self.policy) {
        (Some(true), _) => {
          card.visible = true;
          outcome.shown += 1;
        }
        (Some(false), _) | (None, MissingTopicPolicy::Hide) => {
          card.visible = false;
          outcome.hidden += 1;
        }
        (None, MissingTopicPolicy::Keep) => outcome.untouched += 1,
      }
    }

    debug!(
      topic = %axis,
      shown = outcome.shown,
      hidden = outcome.hidden,
      untouched = outcome.untouched,
      "applied topic filter"
    );
    outcome
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::deck::topic::{TopicAxis, TopicFlags};
  use crate::deck::types::{Card, Dropdown, DropdownOption};

  fn axis(id: &str) -> TopicAxis {
    TopicAxis::parse(id).unwrap()
  }

  fn card(id: &str, flags: &[(&str, bool)]) -> Card {
    Card {
      id: id.to_string(),
      comedian: format!("Comedian {}", id),
      title: format!("Special {}", id),
      year: 2020,
      image_url: None,
      weights: Default::default(),
      topics: flags.iter().map(|(a, f)| (axis(a), *f)).collect::<TopicFlags>(),
      visible: true,
    }
  }

  fn page(cards: Vec<Card>) -> Page {
    Page::new(
      Dropdown::new(vec![
        DropdownOption::new("Politics", Some(axis("politics"))),
        DropdownOption::new("Sports", Some(axis("sports"))),
        DropdownOption::new("News", Some(axis("news"))),
        DropdownOption::new("Broken", None),
      ]),
      cards,
    )
  }

  fn visibility(page: &Page) -> Vec<bool> {
    page.cards.iter().map(|c| c.visible).collect()
  }

  #[test]
  fn test_init_binds_every_option() {
    let page = page(vec![]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Keep);
    assert_eq!(filter.bound_options(), 4);
  }

  #[test]
  fn test_politics_then_sports() {
    let mut page = page(vec![card("1", &[("politics", true), ("sports", false)])]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Keep);

    filter.select(&mut page, 0);
    assert!(page.cards[0].visible);
    assert_eq!(page.dropdown.label, "Politics");
    assert_eq!(page.dropdown.value, "Politics");

    filter.select(&mut page, 1);
    assert!(!page.cards[0].visible);
    assert_eq!(page.dropdown.label, "Sports");
  }

  #[test]
  fn test_missing_flag_keeps_prior_visibility() {
    let mut page = page(vec![
      card("1", &[("sports", false)]),
      card("2", &[("sports", true)]),
    ]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Keep);

    filter.select(&mut page, 1);
    assert_eq!(visibility(&page), vec![false, true]);

    let outcome = filter.select(&mut page, 0);
    assert_eq!(visibility(&page), vec![false, true]);
    assert_eq!(outcome.untouched, 2);
  }

  #[test]
  fn test_missing_flag_hidden_under_hide_policy() {
    let mut page = page(vec![card("1", &[]), card("2", &[("politics", true)])]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Hide);

    let outcome = filter.select(&mut page, 0);
    assert_eq!(visibility(&page), vec![false, true]);
    assert_eq!(
      outcome,
      FilterOutcome {
        shown: 1,
        hidden: 1,
        untouched: 0
      }
    );
  }

  #[test]
  fn test_shows_every_member() {
    let mut first = card("1", &[("news", true)]);
    let mut second = card("2", &[("news", true)]);
    first.visible = false;
    second.visible = false;
    let mut page = page(vec![first, second]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Keep);

    let outcome = filter.select(&mut page, 2);
    assert_eq!(visibility(&page), vec![true, true]);
    assert_eq!(outcome.shown, 2);
  }

  #[test]
  fn test_option_without_topic_only_relabels() {
    let mut page = page(vec![
      card("1", &[("politics", true)]),
      card("2", &[("politics", false)]),
    ]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Hide);
    filter.select(&mut page, 0);
    let before = visibility(&page);

    let outcome = filter.select(&mut page, 3);
    assert_eq!(visibility(&page), before);
    assert_eq!(page.dropdown.label, "Broken");
    assert_eq!(outcome.untouched, 2);
  }

  #[test]
  fn test_out_of_range_changes_nothing() {
    let mut page = page(vec![card("1", &[("politics", false)])]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Keep);
    let before = page.clone();

    filter.select(&mut page, 99);
    assert_eq!(page, before);
  }

  #[test]
  fn test_repeat_selection_is_idempotent() {
    let mut page = page(vec![
      card("1", &[("politics", true)]),
      card("2", &[("politics", false)]),
      card("3", &[]),
    ]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Keep);

    filter.select(&mut page, 0);
    let once = page.clone();
    filter.select(&mut page, 0);
    assert_eq!(page, once);
  }

  #[test]
  fn test_label_tracks_latest_selection() {
    let mut page = page(vec![]);
    let filter = DropdownFilter::init(&page, MissingTopicPolicy::Keep);
    for (index, expected) in [(2, "News"), (0, "Politics"), (3, "Broken")] {
      filter.select(&mut page, index);
      assert_eq!(page.dropdown.label, expected);
    }
  }
}
