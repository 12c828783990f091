//! Entry zone — the closed price interval in which entries are eligible.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A closed price interval `[low, high]` with `low <= high`.
///
/// Constructed through [`Zone::new`], so an inverted or non-finite zone
/// cannot exist — malformed bounds are a caller contract violation caught
/// before any bar is processed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    low: f64,
    high: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ZoneError {
    #[error("zone low {low} exceeds zone high {high}")]
    Inverted { low: f64, high: f64 },
    #[error("zone bounds must be finite (got low={low}, high={high})")]
    NonFinite { low: f64, high: f64 },
}

impl Zone {
    pub fn new(low: f64, high: f64) -> Result<Self, ZoneError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(ZoneError::NonFinite { low, high });
        }
        if low > high {
            return Err(ZoneError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive membership test on both bounds.
    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}
