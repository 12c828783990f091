//! Engine state: the single live position, equity accounting, run outcome.

use crate::domain::{Side, Trade};
use crate::stats::RunStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The one live position. At most one exists at any processing index;
/// owned exclusively by the walk and converted into a `Trade` the bar its
/// stop or target is touched.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Position {
    pub side: Side,
    pub entry_time: DateTime<Utc>,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
}

/// A position still open when the series ended.
///
/// Deliberately excluded from the trade list and statistics — the engine
/// never force-closes. It is surfaced here instead of silently dropped so
/// callers can see the dangling exposure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub side: Side,
    pub entry_time: DateTime<Utc>,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
}

impl From<Position> for OpenPosition {
    fn from(p: Position) -> Self {
        Self {
            side: p.side,
            entry_time: p.entry_time,
            entry: p.entry,
            stop: p.stop,
            target: p.target,
        }
    }
}

/// A trade that could not be persisted. The in-memory trade list remains
/// the source of truth; persistence failures never abort the walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkWarning {
    /// Index of the affected trade in the run's trade list.
    pub trade_index: usize,
    pub message: String,
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestOutcome {
    pub trades: Vec<Trade>,
    pub stats: RunStats,
    pub open_position: Option<OpenPosition>,
    pub sink_warnings: Vec<SinkWarning>,
}

/// Running equity in R, tracked trade by trade during the walk.
#[derive(Debug, Default)]
pub(crate) struct EquityTracker {
    pub equity: f64,
    peak: f64,
    worst_decline: f64,
}

impl EquityTracker {
    pub fn record(&mut self, r: f64) {
        self.equity += r;
        self.peak = self.peak.max(self.equity);
        self.worst_decline = self.worst_decline.min(self.equity - self.peak);
    }

    /// Magnitude of the largest peak-to-trough decline observed.
    pub fn max_drawdown(&self) -> f64 {
        self.worst_decline.abs()
    }
}
