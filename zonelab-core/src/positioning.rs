//! Positioning — bias, key levels, interest zone, invalidation.
//!
//! The layer that picks a side, an entry zone, and a stop candidate from
//! higher-timeframe history. The engine never depends on it: its outputs
//! (a `Side`, a `Zone`, a stop price) feed the engine through ordinary run
//! parameters, so any other zone-selection logic is interchangeable.

use crate::domain::{Bar, Side, Zone};
use crate::indicators::{ema, swing_points};
use serde::{Deserialize, Serialize};

/// Directional lean read off the EMA stack, or no lean at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Long,
    Short,
    Neutral,
}

impl Bias {
    pub fn side(&self) -> Option<Side> {
        match self {
            Bias::Long => Some(Side::Long),
            Bias::Short => Some(Side::Short),
            Bias::Neutral => None,
        }
    }
}

/// Most recent confirmed swing levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyLevels {
    pub support: Option<f64>,
    pub resistance: Option<f64>,
}

/// Bias from the EMA stack of the last closed bar:
/// close above fast EMA above slow EMA ⇒ long; the mirror ⇒ short.
pub fn ema_bias(bars: &[Bar], fast: usize, slow: usize) -> Bias {
    let Some(last) = bars.last() else {
        return Bias::Neutral;
    };

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = match ema(&closes, fast).last() {
        Some(&v) if !v.is_nan() => v,
        _ => return Bias::Neutral,
    };
    let slow_ema = match ema(&closes, slow).last() {
        Some(&v) if !v.is_nan() => v,
        _ => return Bias::Neutral,
    };

    if last.close > fast_ema && fast_ema > slow_ema {
        Bias::Long
    } else if last.close < fast_ema && fast_ema < slow_ema {
        Bias::Short
    } else {
        Bias::Neutral
    }
}

/// Support/resistance from the most recent confirmed swing low/high.
pub fn key_levels(bars: &[Bar], left: usize, right: usize) -> KeyLevels {
    let flags = swing_points(bars, left, right);

    let support = flags
        .lows
        .iter()
        .rposition(|&f| f)
        .map(|i| bars[i].low);
    let resistance = flags
        .highs
        .iter()
        .rposition(|&f| f)
        .map(|i| bars[i].high);

    KeyLevels {
        support,
        resistance,
    }
}

/// Interest zone: the band between the fast and slow EMAs, only offered
/// when the bias is directional.
pub fn interest_zone(bars: &[Bar], bias: Bias, fast: usize, slow: usize) -> Option<Zone> {
    bias.side()?;

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = *ema(&closes, fast).last()?;
    let slow_ema = *ema(&closes, slow).last()?;
    if fast_ema.is_nan() || slow_ema.is_nan() {
        return None;
    }

    Zone::new(fast_ema.min(slow_ema), fast_ema.max(slow_ema)).ok()
}

/// Invalidation level for a biased setup.
///
/// Long: the lower of support and the zone's low bound.
/// Short: the higher of resistance and the zone's high bound.
/// No swing level on the relevant side means no invalidation.
pub fn invalidation(bias: Bias, levels: &KeyLevels, zone: Option<&Zone>) -> Option<f64> {
    match bias {
        Bias::Long => match (levels.support, zone) {
            (Some(support), Some(z)) => Some(support.min(z.low())),
            (Some(support), None) => Some(support),
            (None, _) => None,
        },
        Bias::Short => match (levels.resistance, zone) {
            (Some(resistance), Some(z)) => Some(resistance.max(z.high())),
            (Some(resistance), None) => Some(resistance),
            (None, _) => None,
        },
        Bias::Neutral => None,
    }
}
