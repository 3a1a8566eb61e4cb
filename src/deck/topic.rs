use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopicError {
  #[error("topic id is empty")]
  Empty,
  #[error("invalid character {ch:?} in topic id {id:?}")]
  InvalidChar { id: String, ch: char },
}

/// Identifier of a topic axis, e.g. `political` or `relationships-sex`.
///
/// Only lower-case ASCII letters, digits, `-` and `_` are accepted, so an
/// axis can be compared and displayed without further escaping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TopicAxis(String);

impl TopicAxis {
  pub fn parse(id: &str) -> Result<Self, TopicError> {
    if id.is_empty() {
      return Err(TopicError::Empty);
    }
    if let Some(ch) = id
      .chars()
      .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
      return Err(TopicError::InvalidChar {
        id: id.to_string(),
        ch,
      });
    }
    Ok(Self(id.to_string()))
  }

  /// Build an axis id from display text: "Relationships & Sex" -> "relationships-sex"
  pub fn from_label(label: &str) -> Result<Self, TopicError> {
    let mut slug = String::with_capacity(label.len());
    for c in label.chars() {
      if c.is_ascii_alphanumeric() {
        slug.push(c.to_ascii_lowercase());
      } else if !slug.is_empty() && !slug.ends_with('-') {
        slug.push('-');
      }
    }
    while slug.ends_with('-') {
      slug.pop();
    }
    Self::parse(&slug)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for TopicAxis {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl<'de> Deserialize<'de> for TopicAxis {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    TopicAxis::parse(&s).map_err(serde::de::Error::custom)
  }
}

/// Membership flags of one card, keyed by axis.
///
/// A missing axis is not the same as `false`: the filter treats it
/// according to its missing-topic policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicFlags(BTreeMap<TopicAxis, bool>);

impl TopicFlags {
  pub fn new() -> Self {
    Self::default()
  }

  /// A card belongs to an axis when its weight is strictly above the threshold.
  pub fn from_weights(weights: &BTreeMap<TopicAxis, f64>, threshold: f64) -> Self {
    Self(
      weights
        .iter()
        .map(|(axis, weight)| (axis.clone(), *weight > threshold))
        .collect(),
    )
  }

  pub fn set(&mut self, axis: TopicAxis, member: bool) {
    self.0.insert(axis, member);
  }

  pub fn get(&self, axis: &TopicAxis) -> Option<bool> {
    self.0.get(axis).copied()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&TopicAxis, bool)> {
    self.0.iter().map(|(axis, member)| (axis, *member))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl FromIterator<(TopicAxis, bool)> for TopicFlags {
  fn from_iter<I: IntoIterator<Item = (TopicAxis, bool)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
