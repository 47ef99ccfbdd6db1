use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use studyhub_lib::flashcards::algorithm::{format_interval, preview_intervals};
use studyhub_lib::gamification::XpEvent;

use crate::app::App;
use crate::render::terminal::{self, paint, Color};
use crate::OutputFormat;

pub fn run_due(app: &App, deck_name: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck_id = match deck_name {
        Some(name) => Some(app.find_deck(name)?.id),
        None => None,
    };
    let now = Utc::now();
    let due = app
        .flashcards
        .get_due_cards(deck_id, now)
        .context("Failed to load due cards")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&due)?),
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due. Nice work!");
                return Ok(());
            }
            for item in &due {
                let [again, hard, good, easy] = preview_intervals(&item.state, now);
                println!("{}", paint(&item.card.front, Color::BOLD, use_color));
                println!(
                    "  {}  again {} | hard {} | good {} | easy {}",
                    paint(&item.card.id.to_string(), Color::GRAY, use_color),
                    format_interval(again),
                    format_interval(hard),
                    format_interval(good),
                    format_interval(easy),
                );
            }
            println!("\n{} cards due", due.len());
        }
    }

    Ok(())
}

pub fn run_rate(app: &App, card_id: &str, rating: i32, format: &OutputFormat, use_color: bool) -> Result<()> {
    let card_id = Uuid::parse_str(card_id).context("Invalid card ID")?;
    let outcome = app
        .flashcards
        .submit_review(card_id, rating, Utc::now())
        .context("Failed to submit review")?;
    let award = app.award(XpEvent::CardReviewed {
        correct: outcome.correct,
    })?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "review": outcome,
                "award": award,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Next review in {} ({})",
                format_interval(outcome.state.interval),
                outcome.state.due_date.format("%Y-%m-%d")
            );
            terminal::print_award(&award, use_color);
        }
    }

    Ok(())
}
