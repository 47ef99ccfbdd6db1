use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let decks = app.flashcards.list_decks().context("Failed to list decks")?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&decks)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("No decks yet. Create one with `deck create <name>`.");
                return Ok(());
            }

            let name_width = decks.iter().map(|d| d.name.len()).max().unwrap_or(4).clamp(4, 40);
            println!("{:<width$} Cards", "Deck", width = name_width);
            println!("{} {}", "\u{2500}".repeat(name_width), "\u{2500}".repeat(5));
            for deck in &decks {
                println!("{:<width$} {}", deck.name, deck.card_count, width = name_width);
            }
        }
    }

    Ok(())
}

pub fn run_create(
    app: &App,
    name: String,
    description: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let deck = app
        .flashcards
        .create_deck(name, description, None)
        .context("Failed to create deck")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Plain => println!("Created deck '{}' ({})", deck.name, deck.id),
    }

    Ok(())
}
