use ratatui::prelude::Color;

/// Truncate a string to at most `max_len` characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Display color for a card's membership flag on a topic
pub fn flag_color(flag: Option<bool>) -> Color {
  match flag {
    Some(true) => Color::Green,
    Some(false) => Color::DarkGray,
    None => Color::Red,
  }
}

/// Similarity score as a percentage, e.g. 0.873 -> " 87%"
pub fn percent(score: f64) -> String {
  format!("{:>3.0}%", (score * 100.0).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_counts_chars() {
    assert_eq!(truncate("Transcripción completa", 14), "Transcripci...");
  }

  #[test]
  fn test_flag_color() {
    assert_eq!(flag_color(Some(true)), Color::Green);
    assert_eq!(flag_color(Some(false)), Color::DarkGray);
    assert_eq!(flag_color(None), Color::Red);
  }

  #[test]
  fn test_percent() {
    assert_eq!(percent(0.873), " 87%");
    assert_eq!(percent(1.0), "100%");
    assert_eq!(percent(-0.2), "  0%");
  }
}
