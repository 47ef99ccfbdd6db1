use anyhow::{Context, Result};
use chrono::Local;

use studyhub_lib::gamification::{level_for_xp, CATALOG};

use crate::app::App;
use crate::render::terminal::{paint, progress_bar, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let profile = app.progress.load().context("Failed to load study profile")?;
    let level = level_for_xp(profile.xp);
    let today = Local::now().date_naive();
    let streak = profile.streak.current_on(today);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "profile": profile,
                "level": level,
                "currentStreak": streak,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{}  {} {}/{} XP",
                paint(&format!("Level {}", level.level), Color::BOLD, use_color),
                progress_bar(level.xp_into_level, level.xp_for_next_level, 20),
                level.xp_into_level,
                level.xp_for_next_level
            );
            println!("Total XP:       {}", profile.xp);
            println!(
                "Streak:         {} days (longest {}, {} freezes)",
                streak, profile.streak.longest, profile.streak.freezes_available
            );
            println!("Cards reviewed: {}", profile.cards_reviewed);
            println!("Focus sessions: {}", profile.focus_sessions);
            println!("Quizzes:        {} ({} perfect)", profile.quizzes_completed, profile.perfect_quizzes);

            println!("\nAchievements");
            for achievement in CATALOG.iter() {
                if profile.has_unlocked(achievement.id) {
                    println!("  {} {}", paint("\u{2713}", Color::GREEN, use_color), achievement.title);
                } else {
                    println!(
                        "  {}",
                        paint(&format!("\u{00b7} {} ({})", achievement.title, achievement.description), Color::DIM, use_color)
                    );
                }
            }
        }
    }

    Ok(())
}
