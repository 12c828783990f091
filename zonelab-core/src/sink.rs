//! Trade sink — the append-only destination for completed trades.
//!
//! The engine only needs an "append one trade" capability. Durable
//! implementations (CSV files, databases) live outside this crate; here we
//! define the seam plus the in-memory implementations used by tests and by
//! callers that only want the returned trade list.

use crate::domain::Trade;
use thiserror::Error;

/// Failure to persist one trade. Sink failures never abort the walk: the
/// engine records them as warnings and the in-memory trade list stays the
/// source of truth for the returned statistics.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("trade sink '{sink}' failed: {message}")]
pub struct SinkError {
    pub sink: String,
    pub message: String,
}

/// Append-only destination accepting one trade at a time.
///
/// Appends are at-least-once: a failed append may be retried by the sink's
/// own I/O layer, never by the engine.
pub trait TradeSink {
    fn append(&mut self, trade: &Trade) -> Result<(), SinkError>;

    /// Identifier reported back to the caller (e.g. a file path).
    fn identifier(&self) -> String;
}

/// Discards every trade. For runs where only the returned list matters.
#[derive(Debug, Default)]
pub struct NullSink;

impl TradeSink for NullSink {
    fn append(&mut self, _trade: &Trade) -> Result<(), SinkError> {
        Ok(())
    }

    fn identifier(&self) -> String {
        "null".to_string()
    }
}

/// Vec-backed sink for tests and inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub trades: Vec<Trade>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TradeSink for MemorySink {
    fn append(&mut self, trade: &Trade) -> Result<(), SinkError> {
        self.trades.push(trade.clone());
        Ok(())
    }

    fn identifier(&self) -> String {
        "memory".to_string()
    }
}

/// Fails every append. Exists so tests can verify that sink failures are
/// reported as warnings without invalidating the in-memory run.
#[derive(Debug, Default)]
pub struct FailingSink;

impl TradeSink for FailingSink {
    fn append(&mut self, _trade: &Trade) -> Result<(), SinkError> {
        Err(SinkError {
            sink: self.identifier(),
            message: "append refused".to_string(),
        })
    }

    fn identifier(&self) -> String {
        "failing".to_string()
    }
}
