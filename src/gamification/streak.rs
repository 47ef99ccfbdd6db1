//! Daily study streaks with freezes
//!
//! A freeze forgives exactly one missed day. Freezes are earned every
//! `freeze_every` consecutive days and capped at `max_freezes`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakRules {
    /// Days of streak per earned freeze; 0 turns freezes off
    pub freeze_every: u32,
    pub max_freezes: u32,
}

impl Default for StreakRules {
    fn default() -> Self {
        Self {
            freeze_every: 7,
            max_freezes: 2,
        }
    }
}

/// What recording an activity did to the streak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StreakChange {
    /// Already active that day (or the date is in the past)
    Unchanged,
    Extended,
    /// A missed day was bridged by spending a freeze
    FreezeUsed,
    /// The streak broke and starts again at 1
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    pub last_active: Option<NaiveDate>,
    pub freezes_available: u32,
}

impl Streak {
    /// Record study activity on `date`
    pub fn record_activity(&mut self, date: NaiveDate, rules: &StreakRules) -> StreakChange {
        let change = match self.last_active {
            None => {
                self.current = 1;
                StreakChange::Extended
            }
            Some(last) if date <= last => return StreakChange::Unchanged,
            Some(last) => match (date - last).num_days() {
                1 => {
                    self.current += 1;
                    StreakChange::Extended
                }
                2 if self.freezes_available > 0 => {
                    self.freezes_available -= 1;
                    self.current += 1;
                    log::info!("Streak freeze used, {} left", self.freezes_available);
                    StreakChange::FreezeUsed
                }
                _ => {
                    self.current = 1;
                    StreakChange::Reset
                }
            },
        };

        self.last_active = Some(date);
        self.longest = self.longest.max(self.current);

        if change != StreakChange::Reset
            && rules.freeze_every > 0
            && self.current % rules.freeze_every == 0
            && self.freezes_available < rules.max_freezes
        {
            self.freezes_available += 1;
        }

        change
    }

    /// Streak as it should be displayed on `today`.
    ///
    /// Still counts if the last activity was today or yesterday, or the day
    /// before yesterday with a freeze left to bridge the gap.
    pub fn current_on(&self, today: NaiveDate) -> u32 {
        let Some(last) = self.last_active else {
            return 0;
        };
        match (today - last).num_days() {
            0 | 1 => self.current,
            2 if self.freezes_available > 0 => self.current,
            d if d < 0 => self.current,
            _ => 0,
        }
    }
}
