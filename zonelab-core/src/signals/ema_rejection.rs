//! EMA rejection — the last closed bar probes the EMA and closes back
//! through it on the favorable side.
//!
//! Short: the bar's high reaches the EMA but the close finishes below it.
//! Long: the bar's low reaches the EMA but the close finishes above it.

use super::EntrySignal;
use crate::domain::{Bar, Side};
use crate::indicators::ema;

#[derive(Debug, Clone)]
pub struct EmaRejection {
    period: usize,
    name: String,
}

impl EmaRejection {
    pub const DEFAULT_PERIOD: usize = 21;

    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}_rejection"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for EmaRejection {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

impl EntrySignal for EmaRejection {
    fn should_enter(&self, prefix: &[Bar], side: Side) -> bool {
        let Some(last) = prefix.last() else {
            return false;
        };

        let closes: Vec<f64> = prefix.iter().map(|b| b.close).collect();
        let Some(&value) = ema(&closes, self.period).last() else {
            return false;
        };
        if value.is_nan() {
            // Still inside the EMA warmup window.
            return false;
        }

        match side {
            Side::Short => last.high >= value && last.close < value,
            Side::Long => last.low <= value && last.close > value,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
