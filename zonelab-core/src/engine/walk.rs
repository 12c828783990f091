//! The bar-by-bar walk.

use super::state::{BacktestOutcome, EquityTracker, Position, SinkWarning};
use super::{EngineError, EngineParams};
use crate::domain::{Bar, Outcome, Side, Trade};
use crate::signals::EntrySignal;
use crate::sink::TradeSink;
use crate::stats::RunStats;

/// Run one backtest over an ordered bar series.
///
/// Causality: the decision evaluated at index `i` consults only
/// `bars[..i]` — the zone test uses the close of bar `i − 1` and the
/// signal receives the strict prefix. A triggered entry executes at the
/// open of bar `i`; the engine never assumes a better price than the next
/// bar's open. Stop/target checks begin on the bar *after* the entry bar.
///
/// Completed trades are forwarded to `sink` as they close. A sink failure
/// is recorded as a warning and the walk continues.
pub fn run(
    bars: &[Bar],
    params: &EngineParams,
    signal: &dyn EntrySignal,
    sink: &mut dyn TradeSink,
) -> Result<BacktestOutcome, EngineError> {
    params.validate(bars.len())?;

    let mut trades: Vec<Trade> = Vec::new();
    let mut warnings: Vec<SinkWarning> = Vec::new();
    let mut equity = EquityTracker::default();
    let mut position: Option<Position> = None;

    // Start at 1: bar i-1 is the signal bar, bar i the decision/open bar.
    for i in 1..bars.len() {
        let prev = &bars[i - 1];
        let cur = &bars[i];

        match position.take() {
            None => {
                if params.zone.contains(prev.close)
                    && signal.should_enter(&bars[..i], params.side)
                {
                    position = try_open(params, cur);
                }
            }
            Some(pos) => match resolve(&pos, cur, params.reward_to_risk) {
                Some(trade) => {
                    if let Err(err) = sink.append(&trade) {
                        warnings.push(SinkWarning {
                            trade_index: trades.len(),
                            message: err.to_string(),
                        });
                    }
                    equity.record(trade.r);
                    trades.push(trade);
                }
                None => position = Some(pos),
            },
        }
    }

    let stats = RunStats::from_trades(&trades, equity.equity, equity.max_drawdown());

    Ok(BacktestOutcome {
        trades,
        stats,
        open_position: position.map(Into::into),
        sink_warnings: warnings,
    })
}

/// Attempt an entry at the decision bar's open.
///
/// A stop on the wrong side of the entry, or zero/negative risk, is not an
/// error: the opportunity is silently skipped and the walk stays flat.
fn try_open(params: &EngineParams, decision_bar: &Bar) -> Option<Position> {
    let entry = decision_bar.open;
    let stop = params.stop_price;

    let stop_ok = match params.side {
        Side::Long => stop < entry,
        Side::Short => stop > entry,
    };
    if !stop_ok {
        return None;
    }

    let risk = (entry - stop).abs();
    if risk <= 0.0 {
        return None;
    }

    let target = match params.side {
        Side::Long => entry + params.reward_to_risk * risk,
        Side::Short => entry - params.reward_to_risk * risk,
    };

    Some(Position {
        side: params.side,
        entry_time: decision_bar.timestamp,
        entry,
        stop,
        target,
    })
}

/// Check the open position against one bar's intrabar range.
///
/// Stop and target are tested against high/low only. If both are touched
/// within the same bar the outcome is a stop: adverse excursion inside an
/// ambiguous bar cannot be proven to have happened after the favorable one.
fn resolve(pos: &Position, bar: &Bar, reward_to_risk: f64) -> Option<Trade> {
    let (hit_stop, hit_target) = match pos.side {
        Side::Long => (bar.low <= pos.stop, bar.high >= pos.target),
        Side::Short => (bar.high >= pos.stop, bar.low <= pos.target),
    };

    let (exit, outcome, r) = if hit_stop {
        (pos.stop, Outcome::Loss, -1.0)
    } else if hit_target {
        (pos.target, Outcome::Win, reward_to_risk)
    } else {
        return None;
    };

    Some(Trade {
        side: pos.side,
        entry_time: pos.entry_time,
        entry: pos.entry,
        stop: pos.stop,
        target: pos.target,
        exit_time: bar.timestamp,
        exit,
        outcome,
        r,
    })
}
