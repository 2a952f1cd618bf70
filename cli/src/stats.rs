use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sweepr_core::Difficulty;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Everything the statistics need to know about a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameRecord {
    pub won: bool,
    pub elapsed: Duration,
    pub difficulty: Difficulty,
}

/// Lifetime totals across sessions. Times are in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub best_times: BTreeMap<Difficulty, Option<f64>>,
    pub total_time: f64,
    pub win_streak: u32,
    pub best_win_streak: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            games_played: 0,
            games_won: 0,
            games_lost: 0,
            best_times: Difficulty::ALL.into_iter().map(|d| (d, None)).collect(),
            total_time: 0.0,
            win_streak: 0,
            best_win_streak: 0,
        }
    }
}

impl GameStats {
    pub fn record(&mut self, record: GameRecord) {
        let seconds = record.elapsed.as_secs_f64();
        self.games_played += 1;

        if record.won {
            self.games_won += 1;
            self.win_streak += 1;
            self.best_win_streak = self.best_win_streak.max(self.win_streak);

            let best = self.best_times.entry(record.difficulty).or_default();
            if best.is_none_or(|best| seconds < best) {
                *best = Some(seconds);
            }
        } else {
            self.games_lost += 1;
            self.win_streak = 0;
        }

        self.total_time += seconds;
    }

    /// Percentage of played games that were won.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        f64::from(self.games_won) / f64::from(self.games_played) * 100.0
    }

    pub fn best_time(&self, difficulty: Difficulty) -> Option<f64> {
        self.best_times.get(&difficulty).copied().flatten()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for GameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statistics Summary:")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Games Played: {}", self.games_played)?;
        writeln!(f, "Games Won: {}", self.games_won)?;
        writeln!(f, "Games Lost: {}", self.games_lost)?;
        writeln!(f, "Win Rate: {:.1}%", self.win_rate())?;
        writeln!(f, "Current Win Streak: {}", self.win_streak)?;
        writeln!(f, "Best Win Streak: {}", self.best_win_streak)?;
        writeln!(f)?;
        writeln!(f, "Best Times:")?;
        for difficulty in Difficulty::ALL {
            writeln!(
                f,
                "  {}: {}",
                title(difficulty),
                format_time(self.best_time(difficulty))
            )?;
        }
        write!(f, "{RULE}")
    }
}

fn title(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => "Beginner",
        Difficulty::Intermediate => "Intermediate",
        Difficulty::Expert => "Expert",
        Difficulty::Custom => "Custom",
    }
}

/// `MM:SS`, whole seconds truncated, `N/A` without a time.
pub fn format_time(seconds: Option<f64>) -> String {
    match seconds {
        Some(seconds) => {
            let whole = seconds as u64;
            format!("{:02}:{:02}", whole / 60, whole % 60)
        }
        None => "N/A".to_string(),
    }
}
