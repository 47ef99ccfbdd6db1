use anyhow::{Context, Result};

use studyhub_lib::flashcards::CardOrigin;

use crate::app::App;
use crate::OutputFormat;

pub fn run_add(
    app: &App,
    deck_name: &str,
    front: String,
    back: String,
    tags: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let tags: Vec<String> = tags
        .map(|t| {
            t.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let card = app
        .flashcards
        .create_card(deck.id, front, back, CardOrigin::Manual, tags)
        .context("Failed to create card")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => println!("Added card {} to '{}'", card.id, deck.name),
    }

    Ok(())
}

pub fn run_list(app: &App, deck_name: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let cards = app.flashcards.list_cards(deck.id).context("Failed to list cards")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&cards)?),
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("'{}' has no cards.", deck.name);
                return Ok(());
            }
            for card in &cards {
                println!("{}  {}  \u{2192}  {}", card.id, card.front, card.back);
            }
            println!("\n{} cards", cards.len());
        }
    }

    Ok(())
}
