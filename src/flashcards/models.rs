//! Data models for decks, cards and review state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A deck of flashcards, optionally scoped to a course
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub card_count: usize,
    #[serde(default = "default_new_cards_per_day")]
    pub new_cards_per_day: u32,
    #[serde(default = "default_reviews_per_day")]
    pub reviews_per_day: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_new_cards_per_day() -> u32 {
    20
}

fn default_reviews_per_day() -> u32 {
    100
}

impl Deck {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            course_id: None,
            name,
            description: None,
            card_count: 0,
            new_cards_per_day: default_new_cards_per_day(),
            reviews_per_day: default_reviews_per_day(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Where a card came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardOrigin {
    /// Typed in by the student
    #[default]
    Manual,
    /// Generated by the assistant from an uploaded document
    #[serde(rename_all = "camelCase")]
    Generated { document_name: String },
}

/// A flashcard with question (front) and answer (back)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    pub deck_id: Uuid,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub origin: CardOrigin,
    #[serde(default)]
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn new(deck_id: Uuid, front: String, back: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            deck_id,
            front,
            back,
            tags: Vec::new(),
            origin: CardOrigin::default(),
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Status of a card in the spaced repetition system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CardStatus {
    /// Never reviewed
    #[default]
    New,
    /// In initial learning phase
    Learning,
    /// Regular spaced review
    Review,
    /// Failed and re-learning
    Relearning,
}

/// Current spaced repetition state for a card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    pub card_id: Uuid,
    /// Current interval in days
    #[serde(default)]
    pub interval: i32,
    /// SM-2 ease factor
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f32,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub status: CardStatus,
}

fn default_ease_factor() -> f32 {
    2.5
}

impl CardState {
    pub fn new(card_id: Uuid) -> Self {
        Self {
            card_id,
            interval: 0,
            ease_factor: default_ease_factor(),
            due_date: Utc::now(),
            review_count: 0,
            correct_count: 0,
            status: CardStatus::New,
        }
    }

    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_date
    }
}

/// Statistics for a deck or all decks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    pub new_cards: usize,
    pub learning_cards: usize,
    pub review_cards: usize,
    pub due_cards: usize,
}

/// A card with its current state, used for review sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithState {
    pub card: Flashcard,
    pub state: CardState,
}

/// What a submitted review did to a card
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub state: CardState,
    pub correct: bool,
}
