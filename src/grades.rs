//! Percentage to German grade mapping
//!
//! The eleven buckets follow the German academic scale (1,0 best, 5,0 failed).
//! Thresholds are evaluated highest-first and the first `score >= threshold`
//! wins.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GradeError {
    #[error("Score is not a number")]
    NotANumber,

    #[error("Score out of range (0-100): {0}")]
    OutOfRange(f64),
}

/// A grade on the German 1,0 - 5,0 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "1,0")]
    OneZero,
    #[serde(rename = "1,3")]
    OneThree,
    #[serde(rename = "1,7")]
    OneSeven,
    #[serde(rename = "2,0")]
    TwoZero,
    #[serde(rename = "2,3")]
    TwoThree,
    #[serde(rename = "2,7")]
    TwoSeven,
    #[serde(rename = "3,0")]
    ThreeZero,
    #[serde(rename = "3,3")]
    ThreeThree,
    #[serde(rename = "3,7")]
    ThreeSeven,
    #[serde(rename = "4,0")]
    FourZero,
    #[serde(rename = "5,0")]
    FiveZero,
}

/// Minimum score for each passing grade, highest first
const THRESHOLDS: [(f64, Grade); 10] = [
    (95.0, Grade::OneZero),
    (90.0, Grade::OneThree),
    (85.0, Grade::OneSeven),
    (80.0, Grade::TwoZero),
    (75.0, Grade::TwoThree),
    (70.0, Grade::TwoSeven),
    (65.0, Grade::ThreeZero),
    (60.0, Grade::ThreeThree),
    (55.0, Grade::ThreeSeven),
    (50.0, Grade::FourZero),
];

impl Grade {
    /// The label as printed on a transcript, e.g. "1,3"
    pub fn label(&self) -> &'static str {
        match self {
            Self::OneZero => "1,0",
            Self::OneThree => "1,3",
            Self::OneSeven => "1,7",
            Self::TwoZero => "2,0",
            Self::TwoThree => "2,3",
            Self::TwoSeven => "2,7",
            Self::ThreeZero => "3,0",
            Self::ThreeThree => "3,3",
            Self::ThreeSeven => "3,7",
            Self::FourZero => "4,0",
            Self::FiveZero => "5,0",
        }
    }

    pub fn is_passing(&self) -> bool {
        *self != Self::FiveZero
    }

    /// Strict conversion: rejects NaN and anything outside 0-100
    pub fn try_from_score(score: f64) -> Result<Self, GradeError> {
        if score.is_nan() {
            return Err(GradeError::NotANumber);
        }
        if !(0.0..=100.0).contains(&score) {
            return Err(GradeError::OutOfRange(score));
        }
        Ok(bucket(score))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn bucket(score: f64) -> Grade {
    THRESHOLDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::FiveZero)
}

/// Map a percentage score to a grade.
///
/// Total over `f64`: finite values outside 0-100 are clamped, NaN lands in
/// the failing bucket.
pub fn score_to_grade(score: f64) -> Grade {
    if score.is_nan() {
        log::warn!("Grading a NaN score as {}", Grade::FiveZero);
        return Grade::FiveZero;
    }
    bucket(score.clamp(0.0, 100.0))
}

/// Result of a quiz attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub correct: u32,
    pub total: u32,
}

impl QuizScore {
    pub fn new(correct: u32, total: u32) -> Self {
        Self { correct, total }
    }

    /// Percentage of correct answers, `None` for an empty quiz
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.correct.min(self.total) as f64 * 100.0 / self.total as f64)
    }

    pub fn grade(&self) -> Option<Grade> {
        self.percentage().map(score_to_grade)
    }
}
