use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row synthesis strategy.
///
/// The two variants disagree on what the stored integers mean:
/// `DailyFill` writes seconds-of-day, `PerActivity` writes unitless
/// counters that aggregate queries will happily sum as if they were
/// seconds. Pick `DailyFill` when the data feeds hour-based reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// Walk a 24h clock, one random label and a 0..=2h step at a time.
    #[default]
    DailyFill,
    /// For every label, a random number of (n, n + 0..=25) counter pairs.
    PerActivity,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::DailyFill => "daily-fill",
            Policy::PerActivity => "per-activity",
        }
    }

    /// True when `start_time`/`stop_time` are seconds-of-day.
    pub fn uses_seconds(&self) -> bool {
        matches!(self, Policy::DailyFill)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
