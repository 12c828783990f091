//! Backtest engine — the stateful walk over an ordered bar series.
//!
//! Two states, FLAT and IN_POSITION. Per bar while flat: test the
//! previous close against the zone, ask the entry signal about the prefix
//! strictly before the current bar, and on a trigger enter at the current
//! bar's open. Per bar while in position: resolve stop/target intrabar
//! against high/low, with the conservative tie-break that an ambiguous bar
//! is always a stop.

mod state;
mod walk;

pub use state::{BacktestOutcome, OpenPosition, SinkWarning};
pub use walk::run;

use crate::domain::{Side, Zone};
use thiserror::Error;

/// Caller contract violations. Checked before any bar is processed;
/// nothing is ever retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("need at least 2 bars (a signal bar and a decision bar), got {0}")]
    NotEnoughBars(usize),
    #[error("reward-to-risk must be a positive finite number, got {0}")]
    InvalidRewardToRisk(f64),
    #[error("stop price must be finite, got {0}")]
    InvalidStopPrice(f64),
}

/// Parameters fixed for the duration of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    pub side: Side,
    pub zone: Zone,
    pub stop_price: f64,
    pub reward_to_risk: f64,
}

impl EngineParams {
    /// Params with the conventional default reward-to-risk of 2.0.
    pub fn new(side: Side, zone: Zone, stop_price: f64) -> Self {
        Self {
            side,
            zone,
            stop_price,
            reward_to_risk: 2.0,
        }
    }

    pub fn with_reward_to_risk(mut self, reward_to_risk: f64) -> Self {
        self.reward_to_risk = reward_to_risk;
        self
    }

    pub(crate) fn validate(&self, bar_count: usize) -> Result<(), EngineError> {
        if bar_count < 2 {
            return Err(EngineError::NotEnoughBars(bar_count));
        }
        if !(self.reward_to_risk.is_finite() && self.reward_to_risk > 0.0) {
            return Err(EngineError::InvalidRewardToRisk(self.reward_to_risk));
        }
        if !self.stop_price.is_finite() {
            return Err(EngineError::InvalidStopPrice(self.stop_price));
        }
        Ok(())
    }
}
