//! Storage operations for flashcards
//!
//! Directory structure:
//! ```text
//! <data>/flashcards/
//! ├── decks.json           # Array of all decks
//! ├── cards/
//! │   └── {card-id}.json   # Individual card files
//! └── states/
//!     └── {card-id}.json   # Card spaced repetition state
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::algorithm::{calculate_next_review, ui_rating_to_quality, ReviewResult, PASSING_QUALITY};
use super::anki::{export_anki, AnkiCard};
use super::models::*;

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("Invalid rating {0}, expected 1-4")]
    InvalidRating(i32),
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

/// Storage manager for flashcard operations
pub struct FlashcardStorage {
    flashcards_dir: PathBuf,
}

impl FlashcardStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            flashcards_dir: data_dir.join("flashcards"),
        }
    }

    fn cards_dir(&self) -> PathBuf {
        self.flashcards_dir.join("cards")
    }

    fn states_dir(&self) -> PathBuf {
        self.flashcards_dir.join("states")
    }

    fn decks_path(&self) -> PathBuf {
        self.flashcards_dir.join("decks.json")
    }

    fn card_path(&self, card_id: Uuid) -> PathBuf {
        self.cards_dir().join(format!("{}.json", card_id))
    }

    fn state_path(&self, card_id: Uuid) -> PathBuf {
        self.states_dir().join(format!("{}.json", card_id))
    }

    /// Create the directory layout if missing
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.cards_dir())?;
        fs::create_dir_all(self.states_dir())?;

        let decks_path = self.decks_path();
        if !decks_path.exists() {
            let empty_decks: Vec<Deck> = Vec::new();
            fs::write(&decks_path, serde_json::to_string_pretty(&empty_decks)?)?;
        }

        Ok(())
    }

    // ==================== Deck Operations ====================

    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        let decks_path = self.decks_path();
        if !decks_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&decks_path)?;
        let decks: Vec<Deck> = serde_json::from_str(&content)?;
        Ok(decks)
    }

    pub fn get_deck(&self, deck_id: Uuid) -> Result<Deck> {
        self.list_decks()?
            .into_iter()
            .find(|d| d.id == deck_id)
            .ok_or(FlashcardStorageError::DeckNotFound(deck_id))
    }

    pub fn create_deck(
        &self,
        name: String,
        description: Option<String>,
        course_id: Option<Uuid>,
    ) -> Result<Deck> {
        self.init()?;

        let mut deck = Deck::new(name);
        deck.description = description;
        deck.course_id = course_id;

        let mut decks = self.list_decks()?;
        decks.push(deck.clone());
        self.save_decks(&decks)?;

        log::info!("Created deck '{}' ({})", deck.name, deck.id);
        Ok(deck)
    }

    pub fn update_deck(&self, deck: &Deck) -> Result<()> {
        let mut decks = self.list_decks()?;
        let pos = decks
            .iter()
            .position(|d| d.id == deck.id)
            .ok_or(FlashcardStorageError::DeckNotFound(deck.id))?;

        decks[pos] = deck.clone();
        self.save_decks(&decks)
    }

    /// Delete a deck and all its cards
    pub fn delete_deck(&self, deck_id: Uuid) -> Result<()> {
        let mut decks = self.list_decks()?;
        let len_before = decks.len();
        decks.retain(|d| d.id != deck_id);
        if decks.len() == len_before {
            return Err(FlashcardStorageError::DeckNotFound(deck_id));
        }

        for card in self.list_cards(deck_id)? {
            self.remove_card_files(card.id)?;
        }

        self.save_decks(&decks)
    }

    fn save_decks(&self, decks: &[Deck]) -> Result<()> {
        fs::write(self.decks_path(), serde_json::to_string_pretty(decks)?)?;
        Ok(())
    }

    fn update_deck_card_count(&self, deck_id: Uuid) -> Result<()> {
        let cards = self.list_cards(deck_id)?;
        let mut deck = self.get_deck(deck_id)?;
        deck.card_count = cards.len();
        deck.updated_at = Utc::now();
        self.update_deck(&deck)
    }

    // ==================== Card Operations ====================

    /// List all cards in a deck, ordered by position
    pub fn list_cards(&self, deck_id: Uuid) -> Result<Vec<Flashcard>> {
        let mut cards = self.list_all_cards()?;
        cards.retain(|c| c.deck_id == deck_id);
        cards.sort_by(|a, b| a.position.cmp(&b.position).then(a.created_at.cmp(&b.created_at)));
        Ok(cards)
    }

    /// List all cards across all decks
    pub fn list_all_cards(&self) -> Result<Vec<Flashcard>> {
        let cards_dir = self.cards_dir();
        if !cards_dir.exists() {
            return Ok(Vec::new());
        }

        let mut cards = Vec::new();
        for entry in fs::read_dir(&cards_dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                let content = fs::read_to_string(&path)?;
                let card: Flashcard = serde_json::from_str(&content)?;
                cards.push(card);
            }
        }

        Ok(cards)
    }

    pub fn get_card(&self, card_id: Uuid) -> Result<Flashcard> {
        let card_path = self.card_path(card_id);
        if !card_path.exists() {
            return Err(FlashcardStorageError::CardNotFound(card_id));
        }

        let content = fs::read_to_string(&card_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Create a card at the end of the deck, with a fresh review state
    pub fn create_card(
        &self,
        deck_id: Uuid,
        front: String,
        back: String,
        origin: CardOrigin,
        tags: Vec<String>,
    ) -> Result<Flashcard> {
        self.init()?;
        // Verify deck exists
        self.get_deck(deck_id)?;

        let mut card = Flashcard::new(deck_id, front, back);
        card.position = self
            .list_cards(deck_id)?
            .iter()
            .map(|c| c.position + 1)
            .max()
            .unwrap_or(0);
        card.origin = origin;
        card.tags = tags;

        fs::write(self.card_path(card.id), serde_json::to_string_pretty(&card)?)?;
        self.update_card_state(&CardState::new(card.id))?;
        self.update_deck_card_count(deck_id)?;

        Ok(card)
    }

    pub fn update_card(&self, card: &Flashcard) -> Result<()> {
        let card_path = self.card_path(card.id);
        if !card_path.exists() {
            return Err(FlashcardStorageError::CardNotFound(card.id));
        }

        fs::write(&card_path, serde_json::to_string_pretty(card)?)?;
        Ok(())
    }

    pub fn delete_card(&self, card_id: Uuid) -> Result<()> {
        let card = self.get_card(card_id)?;
        self.remove_card_files(card_id)?;
        self.update_deck_card_count(card.deck_id)
    }

    fn remove_card_files(&self, card_id: Uuid) -> Result<()> {
        for path in [self.card_path(card_id), self.state_path(card_id)] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    // ==================== State Operations ====================

    /// Get the state for a card, or a fresh one if none was saved
    pub fn get_card_state(&self, card_id: Uuid) -> Result<CardState> {
        let state_path = self.state_path(card_id);
        if !state_path.exists() {
            return Ok(CardState::new(card_id));
        }

        let content = fs::read_to_string(&state_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn update_card_state(&self, state: &CardState) -> Result<()> {
        fs::write(self.state_path(state.card_id), serde_json::to_string_pretty(state)?)?;
        Ok(())
    }

    // ==================== Review Operations ====================

    /// Cards due at `now`, oldest first.
    ///
    /// When a deck is given, never-reviewed cards are capped at its
    /// `new_cards_per_day` and the whole list at its `reviews_per_day`.
    pub fn get_due_cards(&self, deck_id: Option<Uuid>, now: DateTime<Utc>) -> Result<Vec<CardWithState>> {
        let (cards, limits) = match deck_id {
            Some(id) => {
                let deck = self.get_deck(id)?;
                (
                    self.list_cards(id)?,
                    Some((deck.new_cards_per_day as usize, deck.reviews_per_day as usize)),
                )
            }
            None => (self.list_all_cards()?, None),
        };

        let mut due_cards = Vec::new();
        for card in cards {
            let state = self.get_card_state(card.id)?;
            if state.is_due_at(now) {
                due_cards.push(CardWithState { card, state });
            }
        }

        due_cards.sort_by(|a, b| a.state.due_date.cmp(&b.state.due_date));
        if let Some((new_limit, review_limit)) = limits {
            let mut new_seen = 0;
            due_cards.retain(|item| {
                if item.state.status != CardStatus::New {
                    return true;
                }
                new_seen += 1;
                new_seen <= new_limit
            });
            due_cards.truncate(review_limit);
        }

        Ok(due_cards)
    }

    /// Submit a UI rating (1-4) for a card reviewed at `now`
    pub fn submit_review(&self, card_id: Uuid, rating: i32, now: DateTime<Utc>) -> Result<ReviewOutcome> {
        let quality = ui_rating_to_quality(rating).ok_or(FlashcardStorageError::InvalidRating(rating))?;
        // Reviewing a deleted card is an error, not a fresh state
        self.get_card(card_id)?;
        let mut state = self.get_card_state(card_id)?;

        let ReviewResult {
            interval,
            ease_factor,
            due_date,
            status,
        } = calculate_next_review(&state, quality, now);

        let correct = quality >= PASSING_QUALITY;
        state.interval = interval;
        state.ease_factor = ease_factor;
        state.due_date = due_date;
        state.status = status;
        state.review_count += 1;
        if correct {
            state.correct_count += 1;
        }

        self.update_card_state(&state)?;
        log::debug!("Card {} reviewed, next due in {} days", card_id, interval);

        Ok(ReviewOutcome { state, correct })
    }

    pub fn get_review_stats(&self, deck_id: Option<Uuid>, now: DateTime<Utc>) -> Result<ReviewStats> {
        let cards = match deck_id {
            Some(id) => self.list_cards(id)?,
            None => self.list_all_cards()?,
        };

        let mut stats = ReviewStats {
            total_cards: cards.len(),
            ..Default::default()
        };

        for card in &cards {
            let state = self.get_card_state(card.id)?;

            match state.status {
                CardStatus::New => stats.new_cards += 1,
                CardStatus::Learning => stats.learning_cards += 1,
                CardStatus::Review | CardStatus::Relearning => stats.review_cards += 1,
            }

            if state.is_due_at(now) {
                stats.due_cards += 1;
            }
        }

        Ok(stats)
    }

    // ==================== Export ====================

    /// Render a deck as an Anki import file, cards in position order
    pub fn export_deck_anki(&self, deck_id: Uuid) -> Result<String> {
        let deck = self.get_deck(deck_id)?;
        let cards: Vec<AnkiCard> = self.list_cards(deck_id)?.iter().map(AnkiCard::from).collect();
        log::info!("Exporting {} cards from deck '{}'", cards.len(), deck.name);
        Ok(export_anki(&cards, &deck.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_storage() -> (FlashcardStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FlashcardStorage::new(temp_dir.path());
        (storage, temp_dir)
    }

    fn add_card(storage: &FlashcardStorage, deck_id: Uuid, front: &str, back: &str) -> Flashcard {
        storage
            .create_card(deck_id, front.to_string(), back.to_string(), CardOrigin::Manual, vec![])
            .unwrap()
    }

    #[test]
    fn test_create_deck_and_cards() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("Biology".to_string(), None, None).unwrap();

        let first = add_card(&storage, deck.id, "Cell", "Basic unit of life");
        let second = add_card(&storage, deck.id, "ATP", "Energy currency");

        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
        assert_eq!(storage.get_deck(deck.id).unwrap().card_count, 2);

        let cards = storage.list_cards(deck.id).unwrap();
        assert_eq!(cards.iter().map(|c| c.front.as_str()).collect::<Vec<_>>(), ["Cell", "ATP"]);
    }

    #[test]
    fn test_create_card_in_missing_deck_fails() {
        let (storage, _temp) = create_test_storage();
        let result = storage.create_card(Uuid::new_v4(), "a".into(), "b".into(), CardOrigin::Manual, vec![]);
        assert!(matches!(result, Err(FlashcardStorageError::DeckNotFound(_))));
    }

    #[test]
    fn test_delete_deck_removes_cards() {
        let (storage, _temp) = create_test_storage();
        let keep = storage.create_deck("Keep".to_string(), None, None).unwrap();
        let drop = storage.create_deck("Drop".to_string(), None, None).unwrap();
        add_card(&storage, keep.id, "k", "k");
        let doomed = add_card(&storage, drop.id, "d", "d");

        storage.delete_deck(drop.id).unwrap();

        assert_eq!(storage.list_decks().unwrap().len(), 1);
        assert!(matches!(
            storage.get_card(doomed.id),
            Err(FlashcardStorageError::CardNotFound(_))
        ));
        assert_eq!(storage.list_all_cards().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_card_updates_count() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("Chem".to_string(), None, None).unwrap();
        let card = add_card(&storage, deck.id, "H2O", "Water");
        storage.delete_card(card.id).unwrap();
        assert_eq!(storage.get_deck(deck.id).unwrap().card_count, 0);
    }

    #[test]
    fn test_review_moves_due_date() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("History".to_string(), None, None).unwrap();
        let card = add_card(&storage, deck.id, "1789", "French Revolution");
        let now = Utc::now() + Duration::seconds(1);

        assert_eq!(storage.get_due_cards(Some(deck.id), now).unwrap().len(), 1);

        let outcome = storage.submit_review(card.id, 3, now).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.state.review_count, 1);
        assert_eq!(outcome.state.correct_count, 1);
        assert_eq!(outcome.state.status, CardStatus::Learning);

        assert!(storage.get_due_cards(Some(deck.id), now).unwrap().is_empty());
        let tomorrow = now + Duration::days(1);
        assert_eq!(storage.get_due_cards(None, tomorrow).unwrap().len(), 1);
    }

    #[test]
    fn test_again_rating_is_incorrect() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("Latin".to_string(), None, None).unwrap();
        let card = add_card(&storage, deck.id, "amo", "I love");
        let outcome = storage.submit_review(card.id, 1, Utc::now()).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.state.correct_count, 0);
    }

    #[test]
    fn test_invalid_rating_rejected() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("Math".to_string(), None, None).unwrap();
        let card = add_card(&storage, deck.id, "1+1", "2");
        assert!(matches!(
            storage.submit_review(card.id, 7, Utc::now()),
            Err(FlashcardStorageError::InvalidRating(7))
        ));
    }

    #[test]
    fn test_due_cards_capped_by_daily_limit() {
        let (storage, _temp) = create_test_storage();
        let mut deck = storage.create_deck("Vocab".to_string(), None, None).unwrap();
        deck.reviews_per_day = 2;
        storage.update_deck(&deck).unwrap();
        for i in 0..4 {
            add_card(&storage, deck.id, &format!("word {}", i), "meaning");
        }
        let now = Utc::now() + Duration::seconds(1);
        assert_eq!(storage.get_due_cards(Some(deck.id), now).unwrap().len(), 2);
        assert_eq!(storage.get_due_cards(None, now).unwrap().len(), 4);
    }

    #[test]
    fn test_new_cards_capped_per_deck() {
        let (storage, _temp) = create_test_storage();
        let mut deck = storage.create_deck("Spanish".to_string(), None, None).unwrap();
        deck.new_cards_per_day = 2;
        storage.update_deck(&deck).unwrap();
        let seen = add_card(&storage, deck.id, "hola", "hello");
        for i in 0..3 {
            add_card(&storage, deck.id, &format!("palabra {}", i), "word");
        }
        let now = Utc::now() + Duration::seconds(1);
        storage.submit_review(seen.id, 1, now).unwrap();

        let later = now + Duration::days(2);
        let due = storage.get_due_cards(Some(deck.id), later).unwrap();
        let new_count = due.iter().filter(|c| c.state.status == CardStatus::New).count();
        assert_eq!(new_count, 2);
        assert_eq!(due.len(), 3);
        assert!(due.iter().any(|c| c.card.id == seen.id));
        assert_eq!(storage.get_due_cards(None, later).unwrap().len(), 4);
    }

    #[test]
    fn test_position_after_delete_keeps_export_order() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("Order".to_string(), None, None).unwrap();
        let a = add_card(&storage, deck.id, "A", "a");
        add_card(&storage, deck.id, "B", "b");
        add_card(&storage, deck.id, "C", "c");
        storage.delete_card(a.id).unwrap();
        let d = add_card(&storage, deck.id, "D", "d");

        assert_eq!(d.position, 3);
        let cards = storage.list_cards(deck.id).unwrap();
        assert_eq!(cards.iter().map(|c| c.front.as_str()).collect::<Vec<_>>(), ["B", "C", "D"]);

        let output = storage.export_deck_anki(deck.id).unwrap();
        assert!(output.ends_with("B\tb\nC\tc\nD\td\n"));
    }

    #[test]
    fn test_review_stats() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("Physics".to_string(), None, None).unwrap();
        let a = add_card(&storage, deck.id, "F", "ma");
        add_card(&storage, deck.id, "E", "mc^2");
        let now = Utc::now() + Duration::seconds(1);
        storage.submit_review(a.id, 4, now).unwrap();

        let stats = storage.get_review_stats(Some(deck.id), now).unwrap();
        assert_eq!(stats.total_cards, 2);
        assert_eq!(stats.new_cards, 1);
        assert_eq!(stats.learning_cards, 1);
        assert_eq!(stats.due_cards, 1);
    }

    #[test]
    fn test_export_deck_anki() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("Deck A".to_string(), None, None).unwrap();
        add_card(&storage, deck.id, "line\none", "tab\there");
        add_card(&storage, deck.id, "second", "card");

        let output = storage.export_deck_anki(deck.id).unwrap();
        assert_eq!(
            output,
            "#separator:tab\n#html:true\n#deck:Deck A\n#notetype:Basic\nline<br>one\ttab here\nsecond\tcard\n"
        );
    }

    #[test]
    fn test_generated_origin_roundtrips() {
        let (storage, _temp) = create_test_storage();
        let deck = storage.create_deck("AI".to_string(), None, Some(Uuid::new_v4())).unwrap();
        let origin = CardOrigin::Generated {
            document_name: "lecture.pdf".to_string(),
        };
        let card = storage
            .create_card(deck.id, "q".into(), "a".into(), origin.clone(), vec!["exam".into()])
            .unwrap();
        let loaded = storage.get_card(card.id).unwrap();
        assert_eq!(loaded.origin, origin);
        assert_eq!(loaded.tags, ["exam"]);
    }
}
