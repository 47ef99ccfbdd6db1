use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;

pub fn run(app: &App, deck_name: &str, output: Option<&Path>) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let text = app
        .flashcards
        .export_deck_anki(deck.id)
        .context("Failed to export deck")?;

    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Exported {} cards to {}", deck.card_count, path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}
