//! Backtest runner — wires config, engine, signal, and sink together.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zonelab_core::domain::{Bar, Trade};
use zonelab_core::engine::{self, EngineError, OpenPosition, SinkWarning};
use zonelab_core::sink::TradeSink;
use zonelab_core::stats::RunStats;

use crate::config::{ConfigError, RunConfig, RunId};
use crate::sink::CsvTradeSink;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub run_id: RunId,
    pub config: RunConfig,
    pub stats: RunStats,
    pub trades: Vec<Trade>,
    /// Position still open when the series ended, excluded from stats.
    pub open_position: Option<OpenPosition>,
    /// Trades that could not be persisted (the run continued regardless).
    pub warnings: Vec<SinkWarning>,
    /// Sink destination identifier (e.g. the trades CSV path).
    pub sink: String,
}

/// Run a single backtest, persisting trades to the config's CSV sink.
pub fn run_backtest(config: &RunConfig, bars: &[Bar]) -> Result<BacktestReport, RunError> {
    let mut sink = CsvTradeSink::new(&config.trades_csv);
    run_backtest_with_sink(config, bars, &mut sink)
}

/// Run a single backtest against a caller-supplied sink.
pub fn run_backtest_with_sink(
    config: &RunConfig,
    bars: &[Bar],
    sink: &mut dyn TradeSink,
) -> Result<BacktestReport, RunError> {
    config.validate()?;
    let params = config.engine_params()?;
    let signal = config.signal.build();

    let outcome = engine::run(bars, &params, signal.as_ref(), sink)?;

    Ok(BacktestReport {
        run_id: config.run_id(),
        config: config.clone(),
        stats: outcome.stats,
        trades: outcome.trades,
        open_position: outcome.open_position,
        warnings: outcome.sink_warnings,
        sink: sink.identifier(),
    })
}
