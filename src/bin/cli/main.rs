mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "studyhub-cli", about = "Flashcards, focus sessions and grades from the terminal", version)]
struct Cli {
    /// Use a specific data directory (default: from settings)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a percentage score to a grade
    Grade {
        /// Score between 0 and 100
        #[arg(allow_hyphen_values = true)]
        score: f64,
        /// Reject scores outside 0-100 instead of clamping
        #[arg(long)]
        strict: bool,
    },

    /// Deck management
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Card management
    #[command(subcommand)]
    Card(CardCommand),

    /// Spaced repetition reviews
    #[command(subcommand)]
    Review(ReviewCommand),

    /// Export a deck as an Anki import file
    Export {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Run a focus session countdown
    Focus {
        /// Session length in minutes (default: from settings)
        #[arg(long)]
        minutes: Option<u32>,
    },

    /// Show level, XP, streak and achievements
    Progress,
}

#[derive(Subcommand)]
enum DeckCommand {
    /// List all decks
    List,
    /// Create a new deck
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
enum CardCommand {
    /// Add a card to a deck
    Add {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        front: String,
        back: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// List cards in a deck
    List {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },
}

#[derive(Subcommand)]
enum ReviewCommand {
    /// List cards due for review
    Due {
        /// Only this deck
        #[arg(long)]
        deck: Option<String>,
    },
    /// Rate a reviewed card: 1 = again, 2 = hard, 3 = good, 4 = easy
    Rate {
        card_id: String,
        #[arg(value_parser = clap::value_parser!(i32).range(1..=4))]
        rating: i32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        Command::Grade { score, strict } => {
            commands::grade::run(score, strict, &cli.format)?;
        }
        Command::Deck(subcmd) => {
            let app = app::App::new(cli.data_dir)?;
            match subcmd {
                DeckCommand::List => commands::deck::run_list(&app, &cli.format)?,
                DeckCommand::Create { name, description } => {
                    commands::deck::run_create(&app, name, description, &cli.format)?
                }
            }
        }
        Command::Card(subcmd) => {
            let app = app::App::new(cli.data_dir)?;
            match subcmd {
                CardCommand::Add { deck, front, back, tags } => {
                    commands::card::run_add(&app, &deck, front, back, tags.as_deref(), &cli.format)?
                }
                CardCommand::List { deck } => commands::card::run_list(&app, &deck, &cli.format)?,
            }
        }
        Command::Review(subcmd) => {
            let app = app::App::new(cli.data_dir)?;
            match subcmd {
                ReviewCommand::Due { deck } => {
                    commands::review::run_due(&app, deck.as_deref(), &cli.format, use_color)?
                }
                ReviewCommand::Rate { card_id, rating } => {
                    commands::review::run_rate(&app, &card_id, rating, &cli.format, use_color)?
                }
            }
        }
        Command::Export { deck, output } => {
            let app = app::App::new(cli.data_dir)?;
            commands::export::run(&app, &deck, output.as_deref())?;
        }
        Command::Focus { minutes } => {
            let app = app::App::new(cli.data_dir)?;
            commands::focus::run(&app, minutes, use_color)?;
        }
        Command::Progress => {
            let app = app::App::new(cli.data_dir)?;
            commands::progress::run(&app, &cli.format, use_color)?;
        }
    }

    Ok(())
}
