//! XP, levels, streaks and achievements

pub mod achievements;
pub mod profile;
pub mod storage;
pub mod streak;
pub mod xp;

pub use achievements::{newly_unlocked, Achievement, AchievementId, CATALOG};
pub use profile::{AwardOutcome, StudyProfile, UnlockedAchievement};
pub use storage::{ProgressStorage, ProgressStorageError};
pub use streak::{Streak, StreakChange, StreakRules};
pub use xp::{level_for_xp, LevelProgress, XpEvent, XpRewards};
