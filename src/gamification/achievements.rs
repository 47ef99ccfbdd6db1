//! Achievement catalog

use serde::{Deserialize, Serialize};

use super::profile::StudyProfile;
use super::xp::level_for_xp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstReview,
    Reviews100,
    FirstFocus,
    Focus10,
    Streak7,
    Streak30,
    PerfectQuiz,
    Level5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
}

pub static CATALOG: [Achievement; 8] = [
    Achievement {
        id: AchievementId::FirstReview,
        title: "First Steps",
        description: "Review your first flashcard",
    },
    Achievement {
        id: AchievementId::Reviews100,
        title: "Card Shark",
        description: "Review 100 flashcards",
    },
    Achievement {
        id: AchievementId::FirstFocus,
        title: "In the Zone",
        description: "Complete a focus session",
    },
    Achievement {
        id: AchievementId::Focus10,
        title: "Deep Worker",
        description: "Complete 10 focus sessions",
    },
    Achievement {
        id: AchievementId::Streak7,
        title: "On a Roll",
        description: "Study 7 days in a row",
    },
    Achievement {
        id: AchievementId::Streak30,
        title: "Unstoppable",
        description: "Study 30 days in a row",
    },
    Achievement {
        id: AchievementId::PerfectQuiz,
        title: "Flawless",
        description: "Score 100% on a quiz",
    },
    Achievement {
        id: AchievementId::Level5,
        title: "Rising Scholar",
        description: "Reach level 5",
    },
];

impl AchievementId {
    pub fn info(&self) -> &'static Achievement {
        CATALOG
            .iter()
            .find(|a| a.id == *self)
            .unwrap_or(&CATALOG[0])
    }

    /// Whether the profile's counters qualify for this achievement
    pub fn is_earned(&self, profile: &StudyProfile) -> bool {
        match self {
            Self::FirstReview => profile.cards_reviewed >= 1,
            Self::Reviews100 => profile.cards_reviewed >= 100,
            Self::FirstFocus => profile.focus_sessions >= 1,
            Self::Focus10 => profile.focus_sessions >= 10,
            Self::Streak7 => profile.streak.longest >= 7,
            Self::Streak30 => profile.streak.longest >= 30,
            Self::PerfectQuiz => profile.perfect_quizzes >= 1,
            Self::Level5 => level_for_xp(profile.xp).level >= 5,
        }
    }
}

/// Achievements the profile qualifies for but has not unlocked yet, in
/// catalog order
pub fn newly_unlocked(profile: &StudyProfile) -> Vec<AchievementId> {
    CATALOG
        .iter()
        .map(|a| a.id)
        .filter(|id| !profile.has_unlocked(*id) && id.is_earned(profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        for achievement in CATALOG.iter() {
            assert_eq!(achievement.id.info().id, achievement.id);
        }
        assert_eq!(AchievementId::Streak7.info().title, "On a Roll");
    }

    #[test]
    fn test_empty_profile_unlocks_nothing() {
        assert!(newly_unlocked(&StudyProfile::default()).is_empty());
    }

    #[test]
    fn test_counters_unlock_in_catalog_order() {
        let mut profile = StudyProfile::default();
        profile.cards_reviewed = 100;
        profile.focus_sessions = 1;
        profile.xp = 1000;

        assert_eq!(
            newly_unlocked(&profile),
            [
                AchievementId::FirstReview,
                AchievementId::Reviews100,
                AchievementId::FirstFocus,
                AchievementId::Level5,
            ]
        );
    }

    #[test]
    fn test_streak_uses_longest() {
        let mut profile = StudyProfile::default();
        profile.streak.longest = 8;
        profile.streak.current = 1;
        assert_eq!(newly_unlocked(&profile), [AchievementId::Streak7]);
    }
}
