use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::profile::StudyProfile;

#[derive(Error, Debug)]
pub enum ProgressStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, ProgressStorageError>;

/// Storage for the study profile (a single JSON file)
pub struct ProgressStorage {
    progress_dir: PathBuf,
}

impl ProgressStorage {
    /// Create a new progress storage, creating the directory if needed
    pub fn new(data_dir: &Path) -> Result<Self> {
        let progress_dir = data_dir.join("progress");
        fs::create_dir_all(&progress_dir)?;
        Ok(Self { progress_dir })
    }

    fn profile_path(&self) -> PathBuf {
        self.progress_dir.join("profile.json")
    }

    /// Load the profile, or a fresh one if nothing was saved yet
    pub fn load(&self) -> Result<StudyProfile> {
        let path = self.profile_path();
        if !path.exists() {
            return Ok(StudyProfile::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save using atomic write (write to .tmp then rename)
    pub fn save(&self, profile: &StudyProfile) -> Result<()> {
        let path = self.profile_path();
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(profile)?)?;
        fs::rename(&tmp_path, &path)?;
        log::debug!("Saved study profile ({} XP)", profile.xp);
        Ok(())
    }

    /// Load, apply `f`, save
    pub fn update<T>(&self, f: impl FnOnce(&mut StudyProfile) -> T) -> Result<T> {
        let mut profile = self.load()?;
        let result = f(&mut profile);
        self.save(&profile)?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::{StreakRules, XpEvent, XpRewards};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (ProgressStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = ProgressStorage::new(temp_dir.path()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_missing_profile_loads_default() {
        let (storage, _temp) = create_test_storage();
        assert_eq!(storage.load().unwrap(), StudyProfile::default());
    }

    #[test]
    fn test_update_persists() {
        let (storage, _temp) = create_test_storage();
        let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();

        let outcome = storage
            .update(|profile| {
                profile.record(
                    XpEvent::FocusSessionCompleted,
                    today,
                    &XpRewards::default(),
                    &StreakRules::default(),
                )
            })
            .unwrap();
        assert_eq!(outcome.xp_gained, 25);

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.xp, 25);
        assert_eq!(loaded.focus_sessions, 1);
        assert_eq!(loaded.streak.last_active, Some(today));
        assert_eq!(loaded.unlocked.len(), 1);
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let (storage, temp) = create_test_storage();
        storage.save(&StudyProfile::default()).unwrap();
        assert!(temp.path().join("progress/profile.json").exists());
        assert!(!temp.path().join("progress/profile.json.tmp").exists());
    }
}
