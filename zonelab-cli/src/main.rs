//! ZoneLab CLI — run and sweep commands.
//!
//! Commands:
//! - `run` — execute one backtest from a TOML config over a bars CSV
//! - `sweep` — run a reward-to-risk grid over the same bars, in parallel

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zonelab_runner::{load_bars_csv, run_backtest, run_sweep, BacktestReport, RrGrid, RunConfig};

#[derive(Parser)]
#[command(name = "zonelab", about = "ZoneLab — zone-entry backtesting engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a single backtest from a TOML config file.
    Run {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Path to the bars CSV (timestamp,open,high,low,close[,volume]).
        #[arg(long)]
        bars: PathBuf,

        /// Override the trades CSV destination from the config.
        #[arg(long)]
        trades_out: Option<PathBuf>,

        /// Print the full report as JSON instead of the summary table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run the same config across a reward-to-risk grid, in parallel.
    Sweep {
        /// Path to a TOML run config (its rr value is ignored).
        #[arg(long)]
        config: PathBuf,

        /// Path to the bars CSV.
        #[arg(long)]
        bars: PathBuf,

        /// Reward-to-risk values to test (repeatable). Defaults to
        /// 1.0 1.5 2.0 2.5 3.0.
        #[arg(long = "rr")]
        rrs: Vec<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            bars,
            trades_out,
            json,
        } => {
            let mut run_config = RunConfig::from_toml_file(&config)
                .with_context(|| format!("loading config {}", config.display()))?;
            if let Some(path) = trades_out {
                run_config.trades_csv = path;
            }
            let series = load_bars_csv(&bars)?;
            let report = run_backtest(&run_config, &series)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Sweep { config, bars, rrs } => {
            let run_config = RunConfig::from_toml_file(&config)
                .with_context(|| format!("loading config {}", config.display()))?;
            let series = load_bars_csv(&bars)?;
            let grid = if rrs.is_empty() {
                RrGrid::default_grid()
            } else {
                RrGrid::new(rrs)
            };
            let reports = run_sweep(&run_config, &grid, &series)?;
            print_sweep(&reports);
        }
    }

    Ok(())
}

fn print_report(report: &BacktestReport) {
    println!("run        {}", &report.run_id[..12]);
    println!("side       {}", report.config.side);
    println!(
        "zone       [{}, {}]  stop {}  rr {}",
        report.config.zone_low,
        report.config.zone_high,
        report.config.stop_price,
        report.config.reward_to_risk
    );
    println!("signal     {}", report.config.signal.build().name());
    println!("sink       {}", report.sink);
    println!();
    println!("trades     {}", report.stats.trades);
    println!("wins       {}", report.stats.wins);
    println!("losses     {}", report.stats.losses);
    println!("win rate   {:.1}%", report.stats.win_rate * 100.0);
    println!("avg R      {:+.3}", report.stats.avg_r);
    println!("equity R   {:+.3}", report.stats.equity_r);
    println!("max DD R   {:.3}", report.stats.max_drawdown_r);

    if let Some(open) = &report.open_position {
        println!();
        println!(
            "open position at end of series: {} entered {} @ {} (excluded from stats)",
            open.side, open.entry_time, open.entry
        );
    }
    for warning in &report.warnings {
        eprintln!(
            "warning: trade #{} not persisted: {}",
            warning.trade_index, warning.message
        );
    }
}

fn print_sweep(reports: &[BacktestReport]) {
    println!("   rr  trades  win%    avg R  equity R  max DD R");
    for report in reports {
        println!(
            "{:>5.2}  {:>6}  {:>5.1}  {:>+7.3}  {:>+8.3}  {:>8.3}",
            report.config.reward_to_risk,
            report.stats.trades,
            report.stats.win_rate * 100.0,
            report.stats.avg_r,
            report.stats.equity_r,
            report.stats.max_drawdown_r
        );
    }
}
