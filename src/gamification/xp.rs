//! Experience points and levels

use serde::{Deserialize, Serialize};

/// Something the student did that earns XP
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum XpEvent {
    CardReviewed { correct: bool },
    FocusSessionCompleted,
    QuizCompleted { percentage: f64 },
    DocumentUploaded,
}

/// XP awarded per event, configurable under `[xp]` in settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XpRewards {
    pub card_correct: u64,
    pub card_incorrect: u64,
    pub focus_session: u64,
    pub quiz_base: u64,
    pub quiz_perfect_bonus: u64,
    pub document_upload: u64,
}

impl Default for XpRewards {
    fn default() -> Self {
        Self {
            card_correct: 10,
            card_incorrect: 2,
            focus_session: 25,
            quiz_base: 20,
            quiz_perfect_bonus: 30,
            document_upload: 5,
        }
    }
}

impl XpRewards {
    pub fn xp_for(&self, event: &XpEvent) -> u64 {
        match event {
            XpEvent::CardReviewed { correct: true } => self.card_correct,
            XpEvent::CardReviewed { correct: false } => self.card_incorrect,
            XpEvent::FocusSessionCompleted => self.focus_session,
            XpEvent::QuizCompleted { percentage } if *percentage >= 100.0 => {
                self.quiz_base + self.quiz_perfect_bonus
            }
            XpEvent::QuizCompleted { .. } => self.quiz_base,
            XpEvent::DocumentUploaded => self.document_upload,
        }
    }
}

/// Where a total XP value sits on the level curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub level: u32,
    pub xp_into_level: u64,
    pub xp_for_next_level: u64,
}

/// XP needed to go from `level` to `level + 1`
pub fn xp_to_next(level: u32) -> u64 {
    100 * level as u64
}

/// Level 1 starts at 0 XP; each level L costs 100 × L XP to leave.
pub fn level_for_xp(xp: u64) -> LevelProgress {
    let mut level = 1u32;
    let mut remaining = xp;
    while remaining >= xp_to_next(level) {
        remaining -= xp_to_next(level);
        level += 1;
    }
    LevelProgress {
        level,
        xp_into_level: remaining,
        xp_for_next_level: xp_to_next(level),
    }
}
