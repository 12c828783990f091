//! ZoneLab Runner — run configuration, durable trade sink, bar loading,
//! single-run orchestration, and parallel parameter sweeps.

pub mod config;
pub mod data;
pub mod runner;
pub mod sink;
pub mod sweep;

pub use config::{ConfigError, RunConfig, SignalConfig};
pub use data::load_bars_csv;
pub use runner::{run_backtest, run_backtest_with_sink, BacktestReport, RunError};
pub use sink::CsvTradeSink;
pub use sweep::{run_sweep, RrGrid};
