//! Indicator helpers — single left-to-right passes over closed history.
//!
//! Each indicator writes into a parallel output sequence and never mutates
//! a value once written. Warmup positions hold NaN (for `ema`) or stay
//! unset (for swing flags).

pub mod ema;
pub mod swing;

pub use ema::ema;
pub use swing::{swing_points, SwingFlags};
