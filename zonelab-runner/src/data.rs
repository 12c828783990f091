//! Bar loading from CSV.
//!
//! The data source is expected to supply bars already deduplicated,
//! sorted ascending, with any still-forming final bar excluded. The
//! loader verifies that contract rather than repairing violations:
//! out-of-order or duplicate timestamps and non-finite OHLC are errors.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use zonelab_core::domain::Bar;

#[derive(Debug, Deserialize)]
struct BarRow {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

/// Load an ordered bar series from a CSV file with columns
/// `timestamp,open,high,low,close[,volume]`.
///
/// Timestamps may be RFC 3339, `YYYY-MM-DD HH:MM:SS`, or epoch
/// milliseconds.
pub fn load_bars_csv(path: &Path) -> Result<Vec<Bar>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open bars CSV {}", path.display()))?;

    let mut bars: Vec<Bar> = Vec::new();
    for (idx, row) in reader.deserialize::<BarRow>().enumerate() {
        let line = idx + 2; // 1-based, after the header
        let row = row.with_context(|| format!("malformed bar at line {line}"))?;
        let timestamp = parse_timestamp(&row.timestamp)
            .with_context(|| format!("bad timestamp at line {line}"))?;

        let bar = Bar::new(timestamp, row.open, row.high, row.low, row.close, row.volume);
        if !bar.is_sane() {
            bail!(
                "inconsistent OHLC at line {line}: o={} h={} l={} c={}",
                bar.open,
                bar.high,
                bar.low,
                bar.close
            );
        }
        if let Some(prev) = bars.last() {
            if bar.timestamp <= prev.timestamp {
                bail!(
                    "timestamps must be strictly increasing: {} at line {line} follows {}",
                    bar.timestamp,
                    prev.timestamp
                );
            }
        }
        bars.push(bar);
    }

    Ok(bars)
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(millis) = text.parse::<i64>() {
        if let Some(dt) = DateTime::from_timestamp_millis(millis) {
            return Ok(dt);
        }
    }
    bail!("unrecognized timestamp format: {text:?}")
}
