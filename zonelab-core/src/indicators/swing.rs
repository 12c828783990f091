//! Fractal swing highs and lows.
//!
//! A bar is a swing high when its high strictly exceeds the highs of the
//! `left` bars before and the `right` bars after it (mirrored for lows).
//! Confirmation is inherently `right` bars delayed, so downstream use must
//! be on closed history only. Flags are written once and never revisited.

use crate::domain::Bar;

/// Parallel boolean sequences, one flag pair per bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwingFlags {
    pub highs: Vec<bool>,
    pub lows: Vec<bool>,
}

/// Detect swing points over a bar series.
///
/// Bars within `left` of the start or `right` of the end can never qualify.
pub fn swing_points(bars: &[Bar], left: usize, right: usize) -> SwingFlags {
    let n = bars.len();
    let mut highs = vec![false; n];
    let mut lows = vec![false; n];

    if n == 0 || left + right >= n {
        return SwingFlags { highs, lows };
    }

    for i in left..n - right {
        let h = bars[i].high;
        let l = bars[i].low;

        let swing_high = bars[i - left..i].iter().all(|b| h > b.high)
            && bars[i + 1..=i + right].iter().all(|b| h > b.high);
        let swing_low = bars[i - left..i].iter().all(|b| l < b.low)
            && bars[i + 1..=i + right].iter().all(|b| l < b.low);

        highs[i] = swing_high;
        lows[i] = swing_low;
    }

    SwingFlags { highs, lows }
}
