use super::topic::TopicAxis;
use super::types::Card;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Number of entries shown in "more like this"
pub const SIMILAR_LIMIT: usize = 10;

/// Cosine similarity of two weight vectors; 0.0 if either has zero length
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
  let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
  let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
  let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
  if norm_a == 0.0 || norm_b == 0.0 {
    0.0
  } else {
    dot / (norm_a * norm_b)
  }
}

fn axes(cards: &[Card]) -> Vec<TopicAxis> {
  let set: BTreeSet<&TopicAxis> = cards
    .iter()
    .flat_map(|c| c.weights.keys().chain(c.topics.iter().map(|(axis, _)| axis)))
    .collect();
  set.into_iter().cloned().collect()
}

fn vector(card: &Card, axes: &[TopicAxis]) -> Vec<f64> {
  axes.iter().map(|axis| card.weight(axis)).collect()
}

/// Rank the cards most similar to `cards[index]`, best first.
///
/// The card itself is excluded. Ties keep catalog order.
pub fn most_similar(cards: &[Card], index: usize, limit: usize) -> Vec<(usize, f64)> {
  let Some(target) = cards.get(index) else {
    return Vec::new();
  };

  let axes = axes(cards);
  let target = vector(target, &axes);

  let mut scored: Vec<(usize, f64)> = cards
    .iter()
    .enumerate()
    .filter(|(i, _)| *i != index)
    .map(|(i, card)| (i, cosine_similarity(&target, &vector(card, &axes))))
    .collect();

  scored.sort_by(|a, b| {
    b.1
      .partial_cmp(&a.1)
      .unwrap_or(Ordering::Equal)
      .then(a.0.cmp(&b.0))
  });
  scored.truncate(limit);
  scored
}
