//! SM-2 Spaced Repetition Algorithm
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation

use chrono::{DateTime, Duration, Utc};

use super::models::{CardState, CardStatus};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f32 = 1.3;

/// Lowest quality that still counts as a correct answer
pub const PASSING_QUALITY: i32 = 3;

/// Result of calculating the next review
#[derive(Debug, Clone)]
pub struct ReviewResult {
    pub interval: i32,
    pub ease_factor: f32,
    pub due_date: DateTime<Utc>,
    pub status: CardStatus,
}

/// Calculate the next interval, ease factor and due date for a review at `now`
pub fn calculate_next_review(state: &CardState, quality: i32, now: DateTime<Utc>) -> ReviewResult {
    let quality = quality.clamp(0, 5);

    let mut ease_factor = state.ease_factor;
    let interval;
    let status;

    if quality >= PASSING_QUALITY {
        match state.review_count {
            0 => {
                interval = 1;
                status = CardStatus::Learning;
            }
            1 => {
                interval = 6;
                status = CardStatus::Review;
            }
            _ => {
                interval = (state.interval as f32 * ease_factor).round() as i32;
                status = CardStatus::Review;
            }
        }

        // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
        let miss = (5 - quality) as f32;
        ease_factor = (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR);
    } else {
        interval = 1;
        ease_factor = (ease_factor - 0.2).max(MIN_EASE_FACTOR);

        status = if state.status == CardStatus::Review {
            CardStatus::Relearning
        } else {
            CardStatus::Learning
        };
    }

    ReviewResult {
        interval,
        ease_factor,
        due_date: now + Duration::days(interval as i64),
        status,
    }
}

/// Intervals each button would give: Again, Hard, Good, Easy
pub fn preview_intervals(state: &CardState, now: DateTime<Utc>) -> [i32; 4] {
    [1, 2, 3, 4].map(|rating| {
        ui_rating_to_quality(rating)
            .map(|q| calculate_next_review(state, q, now).interval)
            .unwrap_or_default()
    })
}

/// Map UI rating (1-4: Again, Hard, Good, Easy) to SM-2 quality
pub fn ui_rating_to_quality(rating: i32) -> Option<i32> {
    match rating {
        1 => Some(1),
        2 => Some(3),
        3 => Some(4),
        4 => Some(5),
        _ => None,
    }
}

/// Format an interval in days to a short label
pub fn format_interval(days: i32) -> String {
    match days {
        0 => "now".to_string(),
        d if d < 7 => format!("{}d", d),
        d if d < 30 => format!("{}w", d / 7),
        d if d < 365 => format!("{}mo", d / 30),
        d => format!("{}y", d / 365),
    }
}
