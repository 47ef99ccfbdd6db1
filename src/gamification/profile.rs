//! The student's accumulated progress

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::achievements::{newly_unlocked, AchievementId};
use super::streak::{Streak, StreakChange, StreakRules};
use super::xp::{level_for_xp, XpEvent, XpRewards};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockedAchievement {
    pub id: AchievementId,
    pub unlocked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyProfile {
    pub xp: u64,
    pub streak: Streak,
    pub cards_reviewed: u32,
    pub focus_sessions: u32,
    pub quizzes_completed: u32,
    pub perfect_quizzes: u32,
    pub documents_uploaded: u32,
    pub unlocked: Vec<UnlockedAchievement>,
}

/// Everything that changed as the result of one [`XpEvent`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardOutcome {
    pub xp_gained: u64,
    pub level_before: u32,
    pub level_after: u32,
    pub streak_change: StreakChange,
    pub new_achievements: Vec<AchievementId>,
}

impl AwardOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

impl StudyProfile {
    pub fn level(&self) -> u32 {
        level_for_xp(self.xp).level
    }

    pub fn has_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.iter().any(|u| u.id == id)
    }

    /// Apply an event that happened on `today`: XP, counters, streak, then
    /// achievements.
    pub fn record(
        &mut self,
        event: XpEvent,
        today: NaiveDate,
        rewards: &XpRewards,
        rules: &StreakRules,
    ) -> AwardOutcome {
        let level_before = self.level();
        let xp_gained = rewards.xp_for(&event);
        self.xp += xp_gained;

        match event {
            XpEvent::CardReviewed { .. } => self.cards_reviewed += 1,
            XpEvent::FocusSessionCompleted => self.focus_sessions += 1,
            XpEvent::QuizCompleted { percentage } => {
                self.quizzes_completed += 1;
                if percentage >= 100.0 {
                    self.perfect_quizzes += 1;
                }
            }
            XpEvent::DocumentUploaded => self.documents_uploaded += 1,
        }

        let streak_change = self.streak.record_activity(today, rules);

        let new_achievements = newly_unlocked(self);
        let now = Utc::now();
        for id in &new_achievements {
            log::info!("Achievement unlocked: {}", id.info().title);
            self.unlocked.push(UnlockedAchievement {
                id: *id,
                unlocked_at: now,
            });
        }

        let level_after = self.level();
        if level_after > level_before {
            log::info!("Level up: {} -> {}", level_before, level_after);
        }

        AwardOutcome {
            xp_gained,
            level_before,
            level_after,
            streak_change,
            new_achievements,
        }
    }
}
