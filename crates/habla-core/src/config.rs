use crate::error::ConfigError;
use crate::types::WordCard;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub deck: Vec<DeckConfig>,

    #[serde(default)]
    pub badge: Vec<BadgeConfig>,

    #[serde(default)]
    pub source: Option<SourceConfig>,

    #[serde(default)]
    pub sink: Vec<SinkRouteConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_true")]
    pub use_alternatives: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            use_alternatives: default_true(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeckConfig {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub word: Vec<WordConfig>,
}

impl DeckConfig {
    /// Materialize the configured words as flashcards.
    pub fn cards(&self) -> Vec<WordCard> {
        self.word
            .iter()
            .map(|w| WordCard {
                word: w.word.clone(),
                article: w.article.clone(),
                translation: w.translation.clone(),
                audio_key: w.audio.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WordConfig {
    pub word: String,

    #[serde(default)]
    pub article: Option<String>,

    #[serde(default)]
    pub translation: String,

    #[serde(default)]
    pub audio: Option<String>,
}

/// A named milestone in the gamification table.
///
/// Thresholds count correctly answered prompts. An empty `[[badge]]` list in
/// the config means the built-in table (see `habla-progress`) applies.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BadgeConfig {
    pub id: String,
    pub name: String,
    pub threshold: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub plugin: String,

    #[serde(flatten)]
    pub extra: toml::Value,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SinkRouteConfig {
    pub session_id: String,
    pub plugin: String,

    #[serde(flatten)]
    pub extra: toml::Value,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Find a deck by id, or the first deck when `id` is `None`.
    pub fn find_deck(&self, id: Option<&str>) -> Result<&DeckConfig, ConfigError> {
        match id {
            Some(id) => self
                .deck
                .iter()
                .find(|d| d.id == id)
                .ok_or_else(|| ConfigError::DeckNotFound(id.to_string())),
            None => self
                .deck
                .first()
                .ok_or_else(|| ConfigError::DeckNotFound("<first>".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_valid_toml() {
        let toml_str = r#"
[general]
log_level = "debug"

[session]
max_attempts = 2
use_alternatives = false

[[deck]]
id = "animales"
title = "Animals"

[[deck.word]]
word = "perro"
article = "el"
translation = "dog"

[[deck.word]]
word = "gato"
article = "el"
translation = "cat"
audio = "gato.mp3"

[[sink]]
session_id = "animales"
plugin = "jsonl"
path = "progress.jsonl"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.session.max_attempts, 2);
        assert!(!config.session.use_alternatives);
        assert_eq!(config.deck.len(), 1);
        assert_eq!(config.deck[0].id, "animales");
        assert_eq!(config.deck[0].word.len(), 2);
        assert_eq!(config.deck[0].word[1].audio.as_deref(), Some("gato.mp3"));
        assert_eq!(config.sink.len(), 1);
        assert_eq!(config.sink[0].plugin, "jsonl");
    }

    #[test]
    fn test_config_default_values() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.session.max_attempts, 3);
        assert!(config.session.use_alternatives);
        assert!(config.deck.is_empty());
        assert!(config.badge.is_empty());
        assert!(config.source.is_none());
        assert!(config.sink.is_empty());
    }

    #[test]
    fn test_config_env_var_interpolation() {
        std::env::set_var("HABLA_TEST_LEVEL", "warn");
        let toml_str = r#"
[general]
log_level = "${HABLA_TEST_LEVEL}"
"#;
        let config = AppConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "warn");
        std::env::remove_var("HABLA_TEST_LEVEL");
    }

    #[test]
    fn test_config_missing_env_var_error() {
        let toml_str = r#"
[general]
log_level = "${DEFINITELY_DOES_NOT_EXIST_12345}"
"#;
        let result = AppConfig::from_toml_str(toml_str);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("DEFINITELY_DOES_NOT_EXIST_12345"));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let result = AppConfig::from_toml_str("this is not valid toml [[[");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = std::env::temp_dir().join("habla_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("test.toml");
        std::fs::write(
            &path,
            r#"
[general]
log_level = "warn"

[[deck]]
id = "colores"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.deck[0].id, "colores");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_load_from_file_not_found() {
        let result = AppConfig::load_from_file(std::path::Path::new("/nonexistent/path.toml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("failed to read config file"));
    }

    #[test]
    fn test_config_find_deck_by_id() {
        let config = AppConfig::from_toml_str(
            r#"
[[deck]]
id = "animales"

[[deck]]
id = "colores"
"#,
        )
        .unwrap();
        assert_eq!(config.find_deck(Some("colores")).unwrap().id, "colores");
        assert_eq!(config.find_deck(None).unwrap().id, "animales");
    }

    #[test]
    fn test_config_find_deck_missing() {
        let config = AppConfig::from_toml_str("").unwrap();
        match config.find_deck(Some("nope")) {
            Err(ConfigError::DeckNotFound(id)) => assert_eq!(id, "nope"),
            _ => panic!("expected DeckNotFound"),
        }
        assert!(config.find_deck(None).is_err());
    }

    #[test]
    fn test_config_deck_cards() {
        let config = AppConfig::from_toml_str(
            r#"
[[deck]]
id = "animales"

[[deck.word]]
word = "perro"
article = "el"
translation = "dog"
"#,
        )
        .unwrap();
        let cards = config.deck[0].cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].word, "perro");
        assert_eq!(cards[0].article.as_deref(), Some("el"));
        assert_eq!(cards[0].translation, "dog");
        assert!(cards[0].audio_key.is_none());
    }

    #[test]
    fn test_config_badge_table_override() {
        let config = AppConfig::from_toml_str(
            r#"
[[badge]]
id = "estrella"
name = "Primera Estrella"
threshold = 1
"#,
        )
        .unwrap();
        assert_eq!(config.badge.len(), 1);
        assert_eq!(config.badge[0].id, "estrella");
        assert_eq!(config.badge[0].threshold, 1);
    }

    #[test]
    fn test_config_source_extra_fields() {
        let config = AppConfig::from_toml_str(
            r#"
[source]
plugin = "script"
path = "utterances.txt"
"#,
        )
        .unwrap();
        let source = config.source.unwrap();
        assert_eq!(source.plugin, "script");
        assert_eq!(
            source.extra.get("path").unwrap().as_str(),
            Some("utterances.txt")
        );
    }

    #[test]
    fn test_config_sink_route_extra_fields() {
        let config = AppConfig::from_toml_str(
            r#"
[[sink]]
session_id = "animales"
plugin = "jsonl"
path = "out.jsonl"
"#,
        )
        .unwrap();
        let sink = &config.sink[0];
        assert_eq!(sink.session_id, "animales");
        // Extra fields are captured via #[serde(flatten)]
        assert_eq!(sink.extra.get("path").unwrap().as_str(), Some("out.jsonl"));
    }
}
