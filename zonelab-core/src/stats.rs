//! Run statistics — a pure fold over the completed trade sequence.

use crate::domain::Trade;
use serde::{Deserialize, Serialize};

/// Aggregate statistics for a single backtest run.
///
/// `equity_r` and `max_drawdown_r` are the values accumulated during the
/// walk (final running equity and the absolute largest peak-to-trough
/// decline); the count-based fields are recomputed from the trade list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub avg_r: f64,
    pub equity_r: f64,
    pub max_drawdown_r: f64,
}

impl RunStats {
    /// Fold the trade list into aggregate statistics.
    ///
    /// Zero trades yields 0.0 for `win_rate` and `avg_r` rather than NaN.
    pub fn from_trades(trades: &[Trade], equity_r: f64, max_drawdown_r: f64) -> Self {
        let n = trades.len();
        let wins = trades.iter().filter(|t| t.is_win()).count();
        let losses = n - wins;
        let win_rate = if n > 0 { wins as f64 / n as f64 } else { 0.0 };
        let avg_r = if n > 0 {
            trades.iter().map(|t| t.r).sum::<f64>() / n as f64
        } else {
            0.0
        };

        Self {
            trades: n,
            wins,
            losses,
            win_rate,
            avg_r,
            equity_r,
            max_drawdown_r,
        }
    }
}
