use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;

use studyhub_lib::config::Settings;
use studyhub_lib::flashcards::{Deck, FlashcardStorage};
use studyhub_lib::gamification::{AwardOutcome, ProgressStorage, XpEvent};

/// Shared application state for CLI commands
pub struct App {
    pub settings: Settings,
    pub flashcards: FlashcardStorage,
    pub progress: ProgressStorage,
}

impl App {
    /// Load settings and open storage under the data directory
    pub fn new(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let mut settings = Settings::load().context("Failed to load settings")?;
        if let Some(dir) = data_dir_override {
            settings.data_dir = Some(dir);
        }
        let data_dir = settings.data_dir().context("Failed to get data directory")?;
        log::debug!("Using data directory {:?}", data_dir);

        let flashcards = FlashcardStorage::new(&data_dir);
        flashcards.init().context("Failed to initialize flashcard storage")?;
        let progress = ProgressStorage::new(&data_dir).context("Failed to initialize progress storage")?;

        Ok(Self {
            settings,
            flashcards,
            progress,
        })
    }

    /// Find a deck by name (exact match first, then unique case-insensitive prefix)
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        let decks = self.flashcards.list_decks().context("Failed to list decks")?;

        let name_lower = name.to_lowercase();

        if let Some(deck) = decks.iter().find(|d| d.name.to_lowercase() == name_lower) {
            return Ok(deck.clone());
        }

        let matches: Vec<&Deck> = decks
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No deck matching '{}'. Available decks:\n{}",
                name,
                decks.iter().map(|d| format!("  - {}", d.name)).collect::<Vec<_>>().join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                name,
                matches.iter().map(|d| format!("  - {}", d.name)).collect::<Vec<_>>().join("\n")
            ),
        }
    }

    /// Record an XP event for today and persist the profile
    pub fn award(&self, event: XpEvent) -> Result<AwardOutcome> {
        let today = Local::now().date_naive();
        self.progress
            .update(|profile| profile.record(event, today, &self.settings.xp, &self.settings.streak))
            .context("Failed to update study profile")
    }
}
