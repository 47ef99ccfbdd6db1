//! Application settings stored in settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::focus::DEFAULT_DURATION_SECS;
use crate::gamification::{StreakRules, XpRewards};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine {0} directory")]
    DirNotFound(&'static str),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusSettings {
    /// Length of one focus session in seconds
    pub duration_secs: u32,
}

impl Default for FocusSettings {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overrides the default data directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub focus: FocusSettings,
    pub xp: XpRewards,
    pub streak: StreakRules,
}

impl Settings {
    /// `<config dir>/studyhub/settings.toml`
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("studyhub").join("settings.toml"))
            .ok_or(ConfigError::DirNotFound("config"))
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.focus.duration_secs == 0 {
            return Err(ConfigError::Invalid("focus.duration_secs must be greater than 0".into()));
        }
        Ok(())
    }

    /// Data directory: the configured override or `<local data dir>/studyhub`
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join("studyhub"))
                .ok_or(ConfigError::DirNotFound("data")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.focus.duration_secs, 1500);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "[focus]\nduration_secs = 900\n\n[xp]\ncard_correct = 15\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.focus.duration_secs, 900);
        assert_eq!(settings.xp.card_correct, 15);
        assert_eq!(settings.xp.focus_session, 25);
        assert_eq!(settings.streak, StreakRules::default());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "[focus]\nduration_secs = 0\n").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_freeze_every_disables_freezes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "[streak]\nfreeze_every = 0\n").unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.streak.freeze_every, 0);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "focus = [").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/settings.toml");
        let mut settings = Settings::default();
        settings.data_dir = Some(temp.path().join("data"));
        settings.streak.max_freezes = 5;

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.data_dir().unwrap(), temp.path().join("data"));
    }
}
