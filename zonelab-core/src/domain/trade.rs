//! Trade — a completed round trip: entry → stop or target.

use super::side::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a trade resolved. Losses exit exactly at the stop (−1.0 R by
/// construction); wins exit exactly at the target (+rr R).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed trade record. Immutable once built — appended to the run's
/// trade list and forwarded to the sink, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: Side,
    pub entry_time: DateTime<Utc>,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub exit_time: DateTime<Utc>,
    pub exit: f64,
    pub outcome: Outcome,
    /// Result in risk units: −1.0 for a loss, +rr for a win.
    pub r: f64,
}

impl Trade {
    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }
}
