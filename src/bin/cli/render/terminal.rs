use studyhub_lib::gamification::{AwardOutcome, StreakChange};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// A fixed-width bar like `[#####-----]`
pub fn progress_bar(done: u64, total: u64, width: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        ((done.min(total) as u128 * width as u128) / total as u128) as usize
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Print the XP, level and achievement lines for an award
pub fn print_award(outcome: &AwardOutcome, use_color: bool) {
    println!("{}", paint(&format!("+{} XP", outcome.xp_gained), Color::GREEN, use_color));

    if outcome.leveled_up() {
        println!(
            "{}",
            paint(&format!("Level up! You are now level {}", outcome.level_after), Color::BOLD, use_color)
        );
    }

    match outcome.streak_change {
        StreakChange::FreezeUsed => println!("Streak freeze used to keep your streak alive"),
        StreakChange::Reset => println!("{}", paint("Streak restarted", Color::YELLOW, use_color)),
        StreakChange::Extended | StreakChange::Unchanged => {}
    }

    for id in &outcome.new_achievements {
        let info = id.info();
        println!(
            "{} {}",
            paint("Achievement unlocked:", Color::CYAN, use_color),
            info.title
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10, 10), "[----------]");
        assert_eq!(progress_bar(5, 10, 10), "[#####-----]");
        assert_eq!(progress_bar(20, 10, 4), "[####]");
        assert_eq!(progress_bar(3, 0, 4), "[----]");
    }

    #[test]
    fn test_paint_without_color() {
        assert_eq!(paint("x", Color::RED, false), "x");
        assert_eq!(paint("x", Color::RED, true), "\x1b[31mx\x1b[0m");
    }
}
