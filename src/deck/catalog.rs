//! Card catalog loading.
//!
//! The catalog is a JSON document with a `cards` array. Topic values can be
//! membership flags (`"0"`/`"1"`, `0`/`1`, booleans) or fractional weights,
//! which are turned into flags with the configured threshold.

use super::topic::{TopicAxis, TopicFlags};
use super::types::Card;
use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Title tags marking a transcript that is not in English
const FOREIGN_LANGUAGE_TAGS: &[&str] = &[
  "Testo italiano completo",
  "Trascrizione italiana",
  "Traduzione italiana",
  "Transcripción completa",
];

#[derive(Debug, Deserialize)]
struct RawCatalog {
  cards: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
struct RawCard {
  id: String,
  comedian: Option<String>,
  title: Option<String>,
  year: Option<u16>,
  /// "Comedian: Title (Year)", used when the separate fields are absent
  heading: Option<String>,
  image_url: Option<String>,
  #[serde(default)]
  topics: BTreeMap<TopicAxis, RawTopicValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTopicValue {
  Bool(bool),
  Number(serde_json::Number),
  Text(String),
}

/// Parsed parts of a "Comedian: Title (Year)" heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
  pub comedian: String,
  pub title: String,
  pub year: u16,
}

/// Split a raw heading into comedian, title and year.
///
/// Returns `None` for headings that do not follow the pattern or that are
/// tagged as a non-English transcript.
pub fn parse_heading(raw: &str) -> Option<Heading> {
  if FOREIGN_LANGUAGE_TAGS.iter().any(|tag| raw.contains(tag)) {
    return None;
  }

  let (before_year, year) = raw.rmatch_indices(" (").find_map(|(idx, _)| {
    let rest = &raw[idx + 2..];
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 && rest[digits..].starts_with(')') {
      rest[..digits].parse::<u16>().ok().map(|y| (&raw[..idx], y))
    } else {
      None
    }
  })?;

  let split = before_year.rfind(": ")?;
  let comedian = before_year[..split].trim();
  let title = before_year[split + 2..].trim();
  if comedian.is_empty() || title.is_empty() {
    return None;
  }

  Some(Heading {
    comedian: comedian.to_string(),
    title: title.to_string(),
    year,
  })
}

/// Capitalize the first letter of every word and lower-case the rest.
/// A word starts after any non-alphabetic character, so "o'neal" becomes "O'Neal".
pub fn title_case(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut prev_alpha = false;
  for c in s.chars() {
    if prev_alpha {
      out.extend(c.to_lowercase());
    } else {
      out.extend(c.to_uppercase());
    }
    prev_alpha = c.is_alphabetic();
  }
  out
}

pub struct Catalog;

impl Catalog {
  /// Load and validate all cards from a JSON catalog file
  pub fn load(path: &Path, threshold: f64) -> Result<Vec<Card>> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read catalog {}: {}", path.display(), e))?;

    let cards = Self::parse(&contents, threshold)
      .map_err(|e| eyre!("Failed to load catalog {}: {}", path.display(), e))?;

    info!(path = %path.display(), cards = cards.len(), threshold, "catalog loaded");
    Ok(cards)
  }

  pub fn parse(contents: &str, threshold: f64) -> Result<Vec<Card>> {
    let raw: RawCatalog =
      serde_json::from_str(contents).map_err(|e| eyre!("invalid catalog JSON: {}", e))?;

    let mut seen = HashSet::new();
    let mut cards = Vec::with_capacity(raw.cards.len());
    for raw_card in raw.cards {
      if !seen.insert(raw_card.id.clone()) {
        return Err(eyre!("duplicate card id {:?}", raw_card.id));
      }
      cards.push(Self::build_card(raw_card, threshold)?);
    }
    Ok(cards)
  }

  fn build_card(raw: RawCard, threshold: f64) -> Result<Card> {
    let heading = match (&raw.comedian, &raw.title, raw.year) {
      (Some(comedian), Some(title), Some(year)) => Heading {
        comedian: comedian.clone(),
        title: title.clone(),
        year,
      },
      _ => {
        let text = raw
          .heading
          .as_deref()
          .ok_or_else(|| eyre!("card {:?} needs comedian, title and year or a heading", raw.id))?;
        parse_heading(text)
          .ok_or_else(|| eyre!("card {:?} has an unrecognized heading {:?}", raw.id, text))?
      }
    };

    let mut weights = BTreeMap::new();
    let mut topics = TopicFlags::new();
    for (axis, value) in raw.topics {
      match value {
        RawTopicValue::Bool(member) => topics.set(axis, member),
        RawTopicValue::Text(text) => match text.as_str() {
          "1" => topics.set(axis, true),
          "0" => topics.set(axis, false),
          other => {
            return Err(eyre!(
              "card {:?}: topic {} must be \"0\" or \"1\", got {:?}",
              raw.id,
              axis,
              other
            ))
          }
        },
        RawTopicValue::Number(n) => {
          if let Some(flag) = n.as_u64() {
            match flag {
              0 | 1 => topics.set(axis, flag == 1),
              _ => {
                return Err(eyre!(
                  "card {:?}: topic {} flag must be 0 or 1, got {}",
                  raw.id,
                  axis,
                  flag
                ))
              }
            }
          } else {
            let weight = n
              .as_f64()
              .ok_or_else(|| eyre!("card {:?}: topic {} is not a number", raw.id, axis))?;
            topics.set(axis.clone(), weight > threshold);
            weights.insert(axis, weight);
          }
        }
      }
    }

    debug!(id = %raw.id, topics = topics.len(), "card parsed");

    Ok(Card {
      id: raw.id,
      comedian: title_case(&heading.comedian),
      title: title_case(&heading.title),
      year: heading.year,
      image_url: raw.image_url,
      weights,
      topics,
      visible: true,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn axis(id: &str) -> TopicAxis {
    TopicAxis::parse(id).unwrap()
  }

  #[test]
  fn test_parse_heading() {
    let heading = parse_heading("Dave Chappelle: Sticks & Stones (2019)").unwrap();
    assert_eq!(heading.comedian, "Dave Chappelle");
    assert_eq!(heading.title, "Sticks & Stones");
    assert_eq!(heading.year, 2019);
  }

  #[test]
  fn test_parse_heading_keeps_inner_parentheses() {
    let heading = parse_heading("Ali Wong: Baby Cobra (Live) (2016)").unwrap();
    assert_eq!(heading.title, "Baby Cobra (Live)");
    assert_eq!(heading.year, 2016);
  }

  #[test]
  fn test_parse_heading_rejects_non_standard() {
    assert_eq!(parse_heading("Late Night Sketch"), None);
    assert_eq!(parse_heading("Someone: No Year"), None);
    assert_eq!(
      parse_heading("Louis C.K.: 2017 (2017) – Trascrizione italiana"),
      None
    );
  }

  #[test]
  fn test_title_case() {
    assert_eq!(title_case("john MULANEY"), "John Mulaney");
    assert_eq!(title_case("patrice o'neal"), "Patrice O'Neal");
    assert_eq!(title_case("kid gorgeous at radio city"), "Kid Gorgeous At Radio City");
  }

  #[test]
  fn test_parse_flags_and_weights() {
    let json = r#"{
      "cards": [
        {
          "id": "a",
          "comedian": "hasan minhaj",
          "title": "homecoming king",
          "year": 2017,
          "topics": { "immigrant": "1", "political": 0, "observational": true }
        },
        {
          "id": "b",
          "heading": "Trevor Noah: Son Of Patricia (2018)",
          "topics": { "political": 0.31, "immigrant": 0.2 }
        }
      ]
    }"#;

    let cards = Catalog::parse(json, 0.2).unwrap();
    assert_eq!(cards.len(), 2);

    assert_eq!(cards[0].comedian, "Hasan Minhaj");
    assert_eq!(cards[0].title, "Homecoming King");
    assert_eq!(cards[0].topics.get(&axis("immigrant")), Some(true));
    assert_eq!(cards[0].topics.get(&axis("political")), Some(false));
    assert_eq!(cards[0].topics.get(&axis("observational")), Some(true));
    assert!(cards[0].weights.is_empty());

    assert_eq!(cards[1].comedian, "Trevor Noah");
    assert_eq!(cards[1].year, 2018);
    assert_eq!(cards[1].topics.get(&axis("political")), Some(true));
    assert_eq!(cards[1].topics.get(&axis("immigrant")), Some(false));
    assert_eq!(cards[1].weights.get(&axis("political")), Some(&0.31));
    assert!(cards.iter().all(|c| c.visible));
  }

  #[test]
  fn test_parse_rejects_bad_flag() {
    let json = r#"{ "cards": [ { "id": "a", "heading": "A: B (2000)", "topics": { "news": "yes" } } ] }"#;
    assert!(Catalog::parse(json, 0.2).is_err());

    let json = r#"{ "cards": [ { "id": "a", "heading": "A: B (2000)", "topics": { "news": 2 } } ] }"#;
    assert!(Catalog::parse(json, 0.2).is_err());
  }

  #[test]
  fn test_parse_rejects_invalid_topic_id() {
    let json = r#"{ "cards": [ { "id": "a", "heading": "A: B (2000)", "topics": { "News Desk": "1" } } ] }"#;
    assert!(Catalog::parse(json, 0.2).is_err());
  }

  #[test]
  fn test_parse_rejects_duplicate_ids() {
    let json = r#"{ "cards": [
      { "id": "a", "heading": "A: B (2000)" },
      { "id": "a", "heading": "C: D (2001)" }
    ] }"#;
    let err = Catalog::parse(json, 0.2).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
  }

  #[test]
  fn test_parse_requires_heading_or_fields() {
    let json = r#"{ "cards": [ { "id": "a", "comedian": "A" } ] }"#;
    assert!(Catalog::parse(json, 0.2).is_err());
  }

  #[test]
  fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
      file,
      r#"{{ "cards": [ {{ "id": "x", "heading": "Ali Wong: Hard Knock Wife (2018)", "topics": {{ "relationships-sex": "1" }} }} ] }}"#
    )
    .unwrap();

    let cards = Catalog::load(file.path(), 0.2).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Hard Knock Wife");
  }

  #[test]
  fn test_load_missing_file_mentions_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    let err = Catalog::load(&path, 0.2).unwrap_err();
    assert!(err.to_string().contains("missing.json"));
  }
}
