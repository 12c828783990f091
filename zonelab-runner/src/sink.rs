//! Durable CSV trade sink.
//!
//! Appends one row per completed trade. On first use for an empty or
//! missing destination it writes the header first. Rows are written and
//! flushed one at a time, so unrelated runs appending to their own files
//! never leave partial records behind.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use zonelab_core::domain::Trade;
use zonelab_core::sink::{SinkError, TradeSink};

const HEADER: [&str; 9] = [
    "side",
    "entry_time",
    "entry",
    "stop",
    "tp",
    "exit_time",
    "exit",
    "result",
    "r",
];

/// Append-only CSV destination for completed trades.
#[derive(Debug, Clone)]
pub struct CsvTradeSink {
    path: PathBuf,
}

impl CsvTradeSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_append(&self, trade: &Trade) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        let write_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(HEADER).context("failed to write header")?;
        }

        writer
            .write_record([
                trade.side.to_string(),
                trade.entry_time.to_rfc3339(),
                trade.entry.to_string(),
                trade.stop.to_string(),
                trade.target.to_string(),
                trade.exit_time.to_rfc3339(),
                trade.exit.to_string(),
                trade.outcome.to_string(),
                trade.r.to_string(),
            ])
            .context("failed to write trade row")?;
        writer.flush().context("failed to flush trade row")?;

        Ok(())
    }
}

impl TradeSink for CsvTradeSink {
    fn append(&mut self, trade: &Trade) -> Result<(), SinkError> {
        self.try_append(trade).map_err(|err| SinkError {
            sink: self.identifier(),
            message: format!("{err:#}"),
        })
    }

    fn identifier(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use zonelab_core::domain::{Outcome, Side};

    fn sample_trade(r: f64) -> Trade {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap();
        let outcome = if r > 0.0 { Outcome::Win } else { Outcome::Loss };
        Trade {
            side: Side::Long,
            entry_time: t0,
            entry: 100.0,
            stop: 98.0,
            target: 104.0,
            exit_time: t0 + chrono::Duration::minutes(45),
            exit: if r > 0.0 { 104.0 } else { 98.0 },
            outcome,
            r,
        }
    }

    #[test]
    fn header_is_written_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        let mut sink = CsvTradeSink::new(&path);

        sink.append(&sample_trade(2.0)).unwrap();
        sink.append(&sample_trade(-1.0)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "side,entry_time,entry,stop,tp,exit_time,exit,result,r"
        );
        assert!(lines[1].starts_with("long,"));
        assert!(lines[1].ends_with(",win,2"));
        assert!(lines[2].ends_with(",loss,-1"));
    }

    #[test]
    fn existing_rows_are_preserved_and_not_reheadered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");

        {
            let mut sink = CsvTradeSink::new(&path);
            sink.append(&sample_trade(2.0)).unwrap();
        }
        {
            // A fresh sink on the same non-empty file appends without a header.
            let mut sink = CsvTradeSink::new(&path);
            sink.append(&sample_trade(-1.0)).unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let headers = text
            .lines()
            .filter(|l| l.starts_with("side,"))
            .count();
        assert_eq!(headers, 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/trades.csv");
        let mut sink = CsvTradeSink::new(&path);
        sink.append(&sample_trade(2.0)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn rows_roundtrip_through_a_csv_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        let mut sink = CsvTradeSink::new(&path);
        sink.append(&sample_trade(2.0)).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "long");
        assert_eq!(&record[2], "100");
        assert_eq!(&record[7], "win");
    }
}
