//! User configuration at ~/.config/agenda/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REMINDER_INTERVAL_SECS;
use crate::error::{AgendaError, AgendaResult};
use crate::persistence::FileStore;
use crate::store::ItemStore;

static DEFAULT_DATA_DIR: &str = "~/agenda";
static DEFAULT_NOTIFICATION_SOUND: &str = "message-new-instant";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_reminder_interval_secs() -> u64 {
    DEFAULT_REMINDER_INTERVAL_SECS
}

fn default_true() -> bool {
    true
}

fn default_notification_sound() -> String {
    DEFAULT_NOTIFICATION_SOUND.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    /// Directory holding one JSON file per durable record
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_reminder_interval_secs")]
    pub reminder_interval_secs: u64,

    #[serde(default = "default_true")]
    pub desktop_notifications: bool,

    /// Freedesktop sound theme name played with each reminder
    #[serde(default = "default_notification_sound")]
    pub notification_sound: String,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            data_dir: default_data_dir(),
            reminder_interval_secs: default_reminder_interval_secs(),
            desktop_notifications: default_true(),
            notification_sound: default_notification_sound(),
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, writing a commented default file first if none exists.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn reminder_interval(&self) -> Duration {
        Duration::from_secs(self.reminder_interval_secs.max(1))
    }

    /// Open the file-backed item store under `data_path` and load it.
    pub fn open_store(&self) -> AgendaResult<ItemStore<FileStore>> {
        ItemStore::open(FileStore::new(self.data_path()))
    }

    pub fn to_toml(&self) -> AgendaResult<String> {
        toml::to_string_pretty(self).map_err(|e| AgendaError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Where events, tasks and birthdays are stored:
# data_dir = \"{}\"

# Seconds between reminder checks while `agenda watch` runs:
# reminder_interval_secs = {}

# Show reminders as desktop notifications (otherwise they are only logged):
# desktop_notifications = true

# Sound played with each reminder:
# notification_sound = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_REMINDER_INTERVAL_SECS, DEFAULT_NOTIFICATION_SOUND
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn commented_default_file_loads_as_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("agenda").join("config.toml");

        AgendaConfig::create_default_config(&path).unwrap();
        let config = AgendaConfig::load_from(&path).unwrap();

        assert_eq!(config, AgendaConfig::default());
        assert_eq!(config.reminder_interval(), Duration::from_secs(60));
    }

    #[test]
    fn missing_file_loads_as_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AgendaConfig::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config, AgendaConfig::default());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/agenda\"\nreminder_interval_secs = 15\ndesktop_notifications = false\n",
        )
        .unwrap();

        let config = AgendaConfig::load_from(&path).unwrap();

        assert_eq!(config.data_path(), PathBuf::from("/srv/agenda"));
        assert_eq!(config.reminder_interval(), Duration::from_secs(15));
        assert!(!config.desktop_notifications);
        assert_eq!(config.notification_sound, "message-new-instant");
    }

    #[test]
    fn invalid_value_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reminder_interval_secs = \"soon\"\n").unwrap();

        let err = AgendaConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, AgendaError::Config(_)));
    }

    #[test]
    fn open_store_uses_data_dir() {
        let dir = TempDir::new().unwrap();
        let config = AgendaConfig {
            data_dir: dir.path().join("data"),
            ..Default::default()
        };

        let store = config.open_store().unwrap();
        assert!(store.collections().is_empty());
        assert_eq!(store.persistence().dir(), dir.path().join("data"));
    }

    #[test]
    fn serializes_to_toml() {
        let toml = AgendaConfig::default().to_toml().unwrap();
        assert!(toml.contains("reminder_interval_secs = 60"));
        assert!(toml.contains("notification_sound = \"message-new-instant\""));
    }
}
