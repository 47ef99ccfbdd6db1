use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::{interval, MissedTickBehavior};

use studyhub_lib::focus::{format_clock, FocusTimer, TickOutcome};
use studyhub_lib::gamification::XpEvent;

use crate::app::App;
use crate::render::terminal::{self, progress_bar};

pub fn run(app: &App, minutes: Option<u32>, use_color: bool) -> Result<()> {
    let duration_secs = match minutes {
        Some(0) => anyhow::bail!("--minutes must be greater than 0"),
        Some(m) => m.saturating_mul(60),
        None => app.settings.focus.duration_secs,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let mut timer = FocusTimer::new(duration_secs);
    let completed = runtime.block_on(countdown(&mut timer, tokio::signal::ctrl_c()))?;

    if completed {
        println!("\nSession complete!");
        let award = app.award(XpEvent::FocusSessionCompleted)?;
        terminal::print_award(&award, use_color);
    } else {
        println!("\nSession abandoned at {}", format_clock(timer.seconds_left()));
    }

    Ok(())
}

/// Drive the timer once per second until it completes or `interrupt` resolves.
/// Returns whether the session completed.
async fn countdown<F>(timer: &mut FocusTimer, interrupt: F) -> Result<bool>
where
    F: Future<Output = std::io::Result<()>>,
{
    // Registered once so a signal arriving mid-draw is not lost
    tokio::pin!(interrupt);

    let total = timer.duration_secs() as u64;
    let mut ticker = interval(Duration::from_secs(1));
    // A suspended laptop should not fire a burst of catch-up ticks
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately
    ticker.tick().await;

    timer.start();
    draw(timer.seconds_left(), total)?;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match timer.advance() {
                    TickOutcome::Ticked { seconds_left } => draw(seconds_left, total)?,
                    TickOutcome::Completed { .. } => {
                        draw(0, total)?;
                        return Ok(true);
                    }
                    TickOutcome::Inactive => return Ok(false),
                }
            }
            _ = &mut interrupt => {
                log::info!("Focus session interrupted");
                return Ok(false);
            }
        }
    }
}

fn draw(seconds_left: u32, total: u64) -> Result<()> {
    let elapsed = total.saturating_sub(seconds_left as u64);
    let mut stdout = std::io::stdout();
    write!(stdout, "\r{} {}", format_clock(seconds_left), progress_bar(elapsed, total, 30))?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_interrupt_stops_countdown() {
        let mut timer = FocusTimer::new(60);
        let completed = countdown(&mut timer, std::future::ready(Ok(()))).await.unwrap();
        assert!(!completed);
        assert_eq!(timer.seconds_left(), 60);
    }

    #[tokio::test]
    async fn test_countdown_completes_without_interrupt() {
        let mut timer = FocusTimer::new(1);
        let completed = countdown(&mut timer, std::future::pending()).await.unwrap();
        assert!(completed);
        assert_eq!(timer.completed_sessions(), 1);
    }
}
