//! ZoneLab Core — single-position backtest engine over OHLC bar series.
//!
//! This crate contains the heart of the backtester:
//! - Domain types (bars, sides, zones, trades)
//! - The FLAT ⇄ IN_POSITION walk with next-bar-open entry and
//!   conservative intrabar stop priority
//! - Run statistics (win rate, average R, equity, max drawdown in R)
//! - The `EntrySignal` trait and concrete signals
//! - Indicator helpers (EMA, swing points) and the bias/zone
//!   positioning layer built on them

pub mod domain;
pub mod engine;
pub mod indicators;
pub mod positioning;
pub mod signals;
pub mod sink;
pub mod stats;
