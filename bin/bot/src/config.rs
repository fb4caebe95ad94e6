//! Centralized bot configuration.
//!
//! Loaded via the `config` crate from an optional `studio-bot.toml` in the
//! working directory, overridden by environment variables (`__` separates
//! nested keys, e.g. `STORAGE__RESERVATIONS_PATH`).

use serde::Deserialize;
use std::path::PathBuf;
use studio_bot_conversation::Schedule;

/// Bot configuration.
#[derive(Debug, Deserialize)]
pub struct BotConfig {
    /// Telegram Bot API token.
    pub telegram_token: String,

    /// Where records are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Classes on offer. Defaults to the studio's weekly schedule.
    #[serde(default)]
    pub schedule: Schedule,
}

/// Record file locations.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// One reservation per line.
    #[serde(default = "default_reservations_path")]
    pub reservations_path: PathBuf,

    /// One feedback message per line.
    #[serde(default = "default_feedback_path")]
    pub feedback_path: PathBuf,
}

fn default_reservations_path() -> PathBuf {
    PathBuf::from("reservations.txt")
}

fn default_feedback_path() -> PathBuf {
    PathBuf::from("feedback.txt")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            reservations_path: default_reservations_path(),
            feedback_path: default_feedback_path(),
        }
    }
}

impl BotConfig {
    /// Loads configuration from `studio-bot.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing or a value is malformed.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("studio-bot").required(false))
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Result<BotConfig, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn storage_config_has_correct_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.reservations_path, PathBuf::from("reservations.txt"));
        assert_eq!(config.feedback_path, PathBuf::from("feedback.txt"));
    }

    #[test]
    fn token_only_uses_default_schedule() {
        let config = from_toml(r#"telegram_token = "123:abc""#).expect("should load");
        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.schedule, Schedule::default());
        assert_eq!(config.storage.feedback_path, PathBuf::from("feedback.txt"));
    }

    #[test]
    fn schedule_and_paths_can_be_overridden() {
        let config = from_toml(
            r#"
            telegram_token = "t"

            [storage]
            reservations_path = "/var/lib/studio/reservations.txt"

            [[schedule]]
            label = "Суббота 12:00 (Джаз)"
            instructor = "Хореограф - Мария."
            "#,
        )
        .expect("should load");

        assert_eq!(
            config.storage.reservations_path,
            PathBuf::from("/var/lib/studio/reservations.txt")
        );
        assert_eq!(config.storage.feedback_path, PathBuf::from("feedback.txt"));
        assert_eq!(
            config.schedule.labels().collect::<Vec<_>>(),
            vec!["Суббота 12:00 (Джаз)"]
        );
    }

    #[test]
    fn missing_token_is_an_error() {
        assert!(from_toml("").is_err());
    }
}
