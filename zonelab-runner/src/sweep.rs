//! Reward-to-risk parameter sweeps.
//!
//! Independent runs are embarrassingly parallel: each owns its own
//! position/trade state and writes to its own sink file, so the grid is
//! executed with rayon. Results come back in grid order.

use rayon::prelude::*;
use std::path::PathBuf;
use zonelab_core::domain::Bar;

use crate::config::RunConfig;
use crate::runner::{run_backtest, BacktestReport, RunError};

/// Reward-to-risk values to test against an otherwise fixed config.
#[derive(Debug, Clone)]
pub struct RrGrid {
    pub rrs: Vec<f64>,
}

impl RrGrid {
    pub fn new(rrs: Vec<f64>) -> Self {
        Self { rrs }
    }

    /// Conventional grid: 1.0 through 3.0 in half-R steps.
    pub fn default_grid() -> Self {
        Self::new(vec![1.0, 1.5, 2.0, 2.5, 3.0])
    }

    pub fn size(&self) -> usize {
        self.rrs.len()
    }

    /// One config per grid point, each with its own sink destination
    /// derived from the config's content hash.
    pub fn generate_configs(&self, base: &RunConfig) -> Vec<RunConfig> {
        self.rrs
            .iter()
            .map(|&rr| {
                let mut config = base.clone();
                config.reward_to_risk = rr;
                config.trades_csv = per_run_sink_path(&config);
                config
            })
            .collect()
    }
}

/// `logs/trades.csv` → `logs/trades-<run_id8>.csv`.
fn per_run_sink_path(config: &RunConfig) -> PathBuf {
    let base = &config.trades_csv;
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "trades".to_string());
    let short_id = &config.run_id()[..8];
    base.with_file_name(format!("{stem}-{short_id}.csv"))
}

/// Run every grid point in parallel over the same bar series.
pub fn run_sweep(
    base: &RunConfig,
    grid: &RrGrid,
    bars: &[Bar],
) -> Result<Vec<BacktestReport>, RunError> {
    grid.generate_configs(base)
        .par_iter()
        .map(|config| run_backtest(config, bars))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SignalConfig;
    use std::collections::HashSet;
    use zonelab_core::domain::Side;

    fn base_config() -> RunConfig {
        RunConfig {
            side: Side::Long,
            zone_low: 95.0,
            zone_high: 105.0,
            stop_price: 90.0,
            reward_to_risk: 2.0,
            signal: SignalConfig::AlwaysEnter,
            trades_csv: PathBuf::from("logs/trades.csv"),
        }
    }

    #[test]
    fn grid_produces_one_config_per_rr() {
        let grid = RrGrid::new(vec![1.0, 2.0, 3.0]);
        let configs = grid.generate_configs(&base_config());
        assert_eq!(configs.len(), 3);
        assert_eq!(configs[0].reward_to_risk, 1.0);
        assert_eq!(configs[2].reward_to_risk, 3.0);
    }

    #[test]
    fn each_grid_point_gets_a_distinct_sink_path() {
        let grid = RrGrid::default_grid();
        let configs = grid.generate_configs(&base_config());
        let paths: HashSet<_> = configs.iter().map(|c| c.trades_csv.clone()).collect();
        assert_eq!(paths.len(), grid.size());
        for config in &configs {
            let name = config.trades_csv.file_name().unwrap().to_string_lossy();
            assert!(name.starts_with("trades-"));
            assert!(name.ends_with(".csv"));
        }
    }
}
