//! Serializable backtest configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use zonelab_core::domain::{Side, Zone, ZoneError};
use zonelab_core::engine::EngineParams;
use zonelab_core::signals::{AlwaysEnter, EmaRejection, EntrySignal};

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Zone(#[from] ZoneError),
    #[error("reward-to-risk must be a positive finite number, got {0}")]
    InvalidRewardToRisk(f64),
    #[error("stop price must be finite, got {0}")]
    InvalidStopPrice(f64),
}

/// All parameters needed to reproduce a single backtest run.
///
/// Loadable from TOML; two runs with identical configs share the same
/// [`RunConfig::run_id`], which sweep mode uses to give each run its own
/// sink destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub side: Side,

    /// Entry zone bounds (closed interval).
    pub zone_low: f64,
    pub zone_high: f64,

    /// Stop level, fixed for the whole run.
    pub stop_price: f64,

    /// Target distance as a multiple of the stop distance.
    #[serde(default = "default_reward_to_risk")]
    pub reward_to_risk: f64,

    #[serde(default)]
    pub signal: SignalConfig,

    /// Destination for the durable trade log.
    #[serde(default = "default_trades_csv")]
    pub trades_csv: PathBuf,
}

fn default_reward_to_risk() -> f64 {
    2.0
}

fn default_trades_csv() -> PathBuf {
    PathBuf::from("logs/trades.csv")
}

impl RunConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: RunConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the caller contract before any processing begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.zone()?;
        if !(self.reward_to_risk.is_finite() && self.reward_to_risk > 0.0) {
            return Err(ConfigError::InvalidRewardToRisk(self.reward_to_risk));
        }
        if !self.stop_price.is_finite() {
            return Err(ConfigError::InvalidStopPrice(self.stop_price));
        }
        Ok(())
    }

    pub fn zone(&self) -> Result<Zone, ZoneError> {
        Zone::new(self.zone_low, self.zone_high)
    }

    /// Engine parameters derived from this config.
    pub fn engine_params(&self) -> Result<EngineParams, ConfigError> {
        Ok(EngineParams::new(self.side, self.zone()?, self.stop_price)
            .with_reward_to_risk(self.reward_to_risk))
    }

    /// Deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs have the same RunId; sweep mode
    /// derives per-run sink paths from it.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

/// Entry signal configuration (serializable enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalConfig {
    /// Last closed bar probes the EMA and closes back through it.
    EmaRejection {
        #[serde(default = "default_ema_period")]
        period: usize,
    },

    /// Enter at every opportunity (baseline).
    AlwaysEnter,
}

fn default_ema_period() -> usize {
    EmaRejection::DEFAULT_PERIOD
}

impl Default for SignalConfig {
    fn default() -> Self {
        SignalConfig::EmaRejection {
            period: EmaRejection::DEFAULT_PERIOD,
        }
    }
}

impl SignalConfig {
    pub fn build(&self) -> Box<dyn EntrySignal> {
        match self {
            SignalConfig::EmaRejection { period } => Box::new(EmaRejection::new(*period)),
            SignalConfig::AlwaysEnter => Box::new(AlwaysEnter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> RunConfig {
        RunConfig {
            side: Side::Long,
            zone_low: 50.0,
            zone_high: 60.0,
            stop_price: 48.0,
            reward_to_risk: 2.0,
            signal: SignalConfig::default(),
            trades_csv: PathBuf::from("logs/trades.csv"),
        }
    }

    #[test]
    fn toml_with_defaults_parses() {
        let config: RunConfig = toml::from_str(
            r#"
            side = "long"
            zone_low = 50.0
            zone_high = 60.0
            stop_price = 48.0
            "#,
        )
        .unwrap();
        assert_eq!(config.reward_to_risk, 2.0);
        assert_eq!(config.trades_csv, PathBuf::from("logs/trades.csv"));
        assert_eq!(
            config.signal,
            SignalConfig::EmaRejection { period: 21 }
        );
    }

    #[test]
    fn explicit_signal_config_parses() {
        let config: RunConfig = toml::from_str(
            r#"
            side = "short"
            zone_low = 50.0
            zone_high = 60.0
            stop_price = 62.0
            reward_to_risk = 3.0

            [signal]
            type = "EMA_REJECTION"
            period = 9
            "#,
        )
        .unwrap();
        assert_eq!(config.signal, SignalConfig::EmaRejection { period: 9 });
        assert_eq!(config.signal.build().name(), "ema_9_rejection");
    }

    #[test]
    fn validate_rejects_inverted_zone() {
        let mut config = base_config();
        config.zone_low = 61.0;
        assert!(matches!(config.validate(), Err(ConfigError::Zone(_))));
    }

    #[test]
    fn validate_rejects_non_positive_rr() {
        let mut config = base_config();
        config.reward_to_risk = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRewardToRisk(_))
        ));
    }

    #[test]
    fn run_id_is_stable_and_distinguishes_configs() {
        let a = base_config();
        let b = base_config();
        assert_eq!(a.run_id(), b.run_id());

        let mut c = base_config();
        c.reward_to_risk = 3.0;
        assert_ne!(a.run_id(), c.run_id());
    }
}
