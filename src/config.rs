use crate::deck::filter::MissingTopicPolicy;
use crate::deck::topic::TopicAxis;
use crate::deck::types::DropdownOption;
use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Topic threshold used when the catalog gives weights instead of flags
pub const DEFAULT_THRESHOLD: f64 = 0.2;

const DEFAULT_TOPICS: &[&str] = &[
  "Observational",
  "The Black Experience",
  "British & Australian",
  "Political",
  "Immigrant Upbringing",
  "Relationships & Sex",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Custom title for header (defaults to "topicdeck")
  pub title: Option<String>,
  /// Path to the card catalog JSON
  pub catalog: Option<PathBuf>,
  pub threshold: f64,
  /// What to do with cards lacking a flag for the chosen topic: keep or hide
  pub missing_topic: MissingTopicPolicy,
  pub topics: Vec<TopicOption>,
}

/// A dropdown entry. `id` defaults to a slug of `label`; an explicit
/// empty id yields an option that filters nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicOption {
  pub label: String,
  pub id: Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      title: None,
      catalog: None,
      threshold: DEFAULT_THRESHOLD,
      missing_topic: MissingTopicPolicy::default(),
      topics: DEFAULT_TOPICS
        .iter()
        .map(|label| TopicOption {
          label: label.to_string(),
          id: None,
        })
        .collect(),
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./topicdeck.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/topicdeck/config.yaml
  ///
  /// Falls back to defaults when no file is found.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("topicdeck.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("topicdeck").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<()> {
    if !(0.0..=1.0).contains(&self.threshold) {
      return Err(eyre!(
        "threshold must be between 0 and 1, got {}",
        self.threshold
      ));
    }
    self.dropdown_options()?;
    Ok(())
  }

  /// Build the dropdown options, resolving each topic id
  pub fn dropdown_options(&self) -> Result<Vec<DropdownOption>> {
    self
      .topics
      .iter()
      .map(|topic| -> Result<DropdownOption> {
        let axis = match topic.id.as_deref() {
          Some("") => None,
          Some(id) => Some(TopicAxis::parse(id)),
          None => Some(TopicAxis::from_label(&topic.label)),
        }
        .transpose()
        .map_err(|e| eyre!("Invalid topic id for {:?}: {}", topic.label, e))?;
        Ok(DropdownOption::new(topic.label.clone(), axis))
      })
      .collect()
  }

  pub fn title(&self) -> &str {
    self.title.as_deref().unwrap_or("topicdeck")
  }

  /// Resolve the catalog path: command line first, then config
  pub fn catalog_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
    override_path
      .map(Path::to_path_buf)
      .or_else(|| self.catalog.clone())
      .ok_or_else(|| {
        eyre!(
          "No catalog configured. Pass --catalog or set `catalog` in ~/.config/topicdeck/config.yaml"
        )
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn write_config(yaml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
  }

  #[test]
  fn test_default_topics_slugify() {
    let options = Config::default().dropdown_options().unwrap();
    assert_eq!(options.len(), 6);
    assert_eq!(options[1].text, "The Black Experience");
    assert_eq!(
      options[1].axis.as_ref().map(|a| a.as_str()),
      Some("the-black-experience")
    );
    assert_eq!(
      options[5].axis.as_ref().map(|a| a.as_str()),
      Some("relationships-sex")
    );
  }

  #[test]
  fn test_load_full_config() {
    let file = write_config(
      r#"
title: Comedy Specials
catalog: /data/specials.json
threshold: 0.3
missing_topic: hide
topics:
  - label: Politics
    id: politics
  - label: Sports
  - label: Mystery
    id: ""
"#,
    );

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.title(), "Comedy Specials");
    assert_eq!(config.threshold, 0.3);
    assert_eq!(config.missing_topic, MissingTopicPolicy::Hide);
    assert_eq!(
      config.catalog_path(None).unwrap(),
      PathBuf::from("/data/specials.json")
    );

    let options = config.dropdown_options().unwrap();
    assert_eq!(options[0].axis.as_ref().unwrap().as_str(), "politics");
    assert_eq!(options[1].axis.as_ref().unwrap().as_str(), "sports");
    assert_eq!(options[2].axis, None);
  }

  #[test]
  fn test_partial_config_uses_defaults() {
    let file = write_config("catalog: specials.json\n");
    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.threshold, DEFAULT_THRESHOLD);
    assert_eq!(config.missing_topic, MissingTopicPolicy::Keep);
    assert_eq!(config.topics.len(), DEFAULT_TOPICS.len());
    assert_eq!(config.title(), "topicdeck");
  }

  #[test]
  fn test_rejects_invalid_topic_id() {
    let file = write_config("topics:\n  - label: Politics\n    id: \"Politics!\"\n");
    assert!(Config::load(Some(file.path())).is_err());
  }

  #[test]
  fn test_rejects_threshold_out_of_range() {
    let file = write_config("threshold: 1.5\n");
    assert!(Config::load(Some(file.path())).is_err());
  }

  #[test]
  fn test_missing_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }

  #[test]
  fn test_catalog_override_wins() {
    let config = Config {
      catalog: Some(PathBuf::from("from-config.json")),
      ..Config::default()
    };
    assert_eq!(
      config.catalog_path(Some(Path::new("cli.json"))).unwrap(),
      PathBuf::from("cli.json")
    );
    assert!(Config::default().catalog_path(None).is_err());
  }
}
