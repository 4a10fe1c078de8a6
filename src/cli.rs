//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::backtest::{BacktestConfig, BacktestResult, run_backtest};
use crate::domain::config_validation::{
    parse_date, validate_backtest_config, validate_strategy_config,
};
use crate::domain::error::PullbackError;
use crate::domain::indicator::ema::EmaSeed;
use crate::domain::indicator_helpers::build_bar_stream;
use crate::domain::position::PositionStatus;
use crate::domain::strategy::{
    DEFAULT_FAST_PERIOD, DEFAULT_SLOW_PERIOD, DEFAULT_VOLUME_LOOKBACK, StrategyParams,
};
use crate::domain::universe::{UniverseError, parse_codes};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "pullback", about = "8/21 EMA pullback signal backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the signal engine over historical bars
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        exchange: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List available symbols on an exchange
    ListSymbols {
        #[arg(long)]
        exchange: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate the strategy parameters of a config file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for symbol(s)
    Info {
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        exchange: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest {
            config,
            output,
            code,
            exchange,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config, code.as_deref(), exchange.as_deref())
            } else {
                run_backtest_command(
                    &config,
                    output.as_deref(),
                    code.as_deref(),
                    exchange.as_deref(),
                )
            }
        }
        Command::ListSymbols { exchange, config } => run_list_symbols(&exchange, &config),
        Command::Validate { config } => run_validate(&config),
        Command::Info {
            code,
            exchange,
            config,
        } => run_info(code.as_deref(), exchange.as_deref(), &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PullbackError> {
    tracing::info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

pub fn build_backtest_config(adapter: &dyn ConfigPort) -> Result<BacktestConfig, PullbackError> {
    let start = adapter.get_string("backtest", "start_date");
    let end = adapter.get_string("backtest", "end_date");
    let start_date = parse_date(start.as_deref(), "start_date")?;
    let end_date = parse_date(end.as_deref(), "end_date")?;
    Ok(BacktestConfig {
        start_date,
        end_date,
    })
}

/// Read `[strategy]`. Call [`validate_strategy_config`] first; unparseable
/// values fall back to the defaults here.
pub fn build_strategy_params(adapter: &dyn ConfigPort) -> StrategyParams {
    let period = |key: &str, default: usize| {
        usize::try_from(adapter.get_int("strategy", key, default as i64)).unwrap_or(default)
    };
    StrategyParams {
        fast_period: period("fast_period", DEFAULT_FAST_PERIOD),
        slow_period: period("slow_period", DEFAULT_SLOW_PERIOD),
        volume_lookback: period("volume_lookback", DEFAULT_VOLUME_LOOKBACK),
        ema_seed: adapter
            .get_string("strategy", "ema_seed")
            .and_then(|s| s.parse::<EmaSeed>().ok())
            .unwrap_or_default(),
    }
}

pub fn resolve_codes(
    code_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, UniverseError> {
    if let Some(c) = code_override {
        return parse_codes(c);
    }
    if let Some(codes) = config.get_string("backtest", "codes") {
        return parse_codes(&codes);
    }
    if let Some(code) = config.get_string("backtest", "code") {
        return parse_codes(&code);
    }
    Ok(vec![])
}

pub fn resolve_exchange(
    exchange_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<String, PullbackError> {
    exchange_override
        .map(str::to_string)
        .or_else(|| config.get_string("backtest", "exchange"))
        .ok_or_else(|| PullbackError::ConfigMissing {
            section: "backtest".into(),
            key: "exchange".into(),
        })
}

fn data_port_from_config(config: &dyn ConfigPort) -> Result<CsvAdapter, PullbackError> {
    let path = config
        .get_string("data", "path")
        .ok_or_else(|| PullbackError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(path)))
}

/// Run one fresh engine per code. Codes whose data cannot be loaded are
/// skipped with a warning; a malformed bar stream aborts the whole run.
pub fn run_codes(
    data_port: &dyn DataPort,
    params: &StrategyParams,
    bt_config: &BacktestConfig,
    codes: &[String],
    exchange: &str,
) -> Result<Vec<(String, BacktestResult)>, PullbackError> {
    let mut runs = Vec::with_capacity(codes.len());

    for code in codes {
        let fetched =
            data_port.fetch_ohlcv(code, exchange, bt_config.start_date, bt_config.end_date);
        let ohlcv = match fetched {
            Ok(bars) if bars.is_empty() => {
                tracing::warn!("skipping {}.{} (no data in range)", code, exchange);
                continue;
            }
            Ok(bars) => bars,
            Err(e) => {
                tracing::warn!("skipping {}.{} ({})", code, exchange, e);
                continue;
            }
        };

        let bars = build_bar_stream(&ohlcv, params);
        tracing::info!("Running {}.{}: {} bars", code, exchange, bars.len());
        let result = run_backtest(&bars)?;
        runs.push((code.clone(), result));
    }

    if runs.is_empty() {
        return Err(match codes {
            [only] => PullbackError::NoData {
                code: only.clone(),
                exchange: exchange.to_string(),
            },
            _ => UniverseError::AllCodesFailed.into(),
        });
    }
    Ok(runs)
}

pub fn print_summary(runs: &[(String, BacktestResult)]) {
    for (code, result) in runs {
        for event in &result.events {
            println!(
                "{}  {:<5}  bar {:>5}  {}  @ {:.4}",
                code,
                event.kind.to_string(),
                event.bar_index,
                event.date,
                event.price
            );
        }
        let status = match (result.final_status(), result.position.entry_bar_index()) {
            (PositionStatus::Long, Some(entry)) => format!("LONG since bar {}", entry),
            (status, _) => status.to_string(),
        };
        println!(
            "{}: {} bars, {} entries, {} exits, final position {}",
            code,
            result.bars_processed,
            result.entries(),
            result.exits(),
            status
        );
    }
}

pub fn run_backtest_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    params: &StrategyParams,
    bt_config: &BacktestConfig,
    codes: &[String],
    exchange: &str,
    output_path: Option<&Path>,
) -> Result<Vec<(String, BacktestResult)>, PullbackError> {
    tracing::info!(
        "Backtesting {} code(s) on {} from {} to {}",
        codes.len(),
        exchange,
        bt_config.start_date,
        bt_config.end_date
    );
    let runs = run_codes(data_port, params, bt_config, codes, exchange)?;
    print_summary(&runs);

    if let Some(path) = output_path {
        report_port.write(&runs, &path.display().to_string())?;
    }
    Ok(runs)
}

fn run_backtest_command(
    config_path: &Path,
    output_path: Option<&Path>,
    code_override: Option<&str>,
    exchange_override: Option<&str>,
) -> Result<(), PullbackError> {
    let adapter = load_config(config_path)?;
    validate_backtest_config(&adapter)?;
    validate_strategy_config(&adapter)?;

    let params = build_strategy_params(&adapter);
    let bt_config = build_backtest_config(&adapter)?;
    let codes = resolve_codes(code_override, &adapter)?;
    let exchange = resolve_exchange(exchange_override, &adapter)?;

    let output = output_path
        .map(Path::to_path_buf)
        .or_else(|| adapter.get_string("report", "output").map(PathBuf::from));

    let data_port = data_port_from_config(&adapter)?;
    run_backtest_pipeline(
        &data_port,
        &CsvReportAdapter::new(),
        &params,
        &bt_config,
        &codes,
        &exchange,
        output.as_deref(),
    )?;
    Ok(())
}

pub fn run_dry_run(
    config_path: &Path,
    code_override: Option<&str>,
    exchange_override: Option<&str>,
) -> Result<(), PullbackError> {
    let adapter = load_config(config_path)?;
    validate_backtest_config(&adapter)?;
    validate_strategy_config(&adapter)?;
    tracing::info!("Config validated successfully");

    let params = build_strategy_params(&adapter);
    let bt_config = build_backtest_config(&adapter)?;
    let codes = resolve_codes(code_override, &adapter)?;
    let exchange = resolve_exchange(exchange_override, &adapter)?;

    println!("Strategy parameters:");
    print_params(&params);
    println!("\nRange: {} to {}", bt_config.start_date, bt_config.end_date);
    println!("Universe:");
    println!("  exchange: {}", exchange);
    println!("  codes:    {}", codes.join(", "));
    println!("\nDry run complete: configuration is valid");
    Ok(())
}

fn print_params(params: &StrategyParams) {
    println!("  fast EMA:        {}", params.fast());
    println!("  slow EMA:        {}", params.slow());
    println!("  volume mean:     {}", params.volume());
    println!("  EMA seed:        {}", params.ema_seed);
}

fn run_validate(config_path: &Path) -> Result<(), PullbackError> {
    let adapter = load_config(config_path)?;
    validate_strategy_config(&adapter)?;
    let params = build_strategy_params(&adapter);
    println!("Strategy parameters:");
    print_params(&params);
    println!("\nStrategy configuration is valid.");
    Ok(())
}

fn run_list_symbols(exchange: &str, config_path: &Path) -> Result<(), PullbackError> {
    let config = load_config(config_path)?;
    let data_port = data_port_from_config(&config)?;
    let symbols = data_port.list_symbols(exchange)?;

    if symbols.is_empty() {
        tracing::warn!("No symbols found for exchange {}", exchange);
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        tracing::info!("{} symbols found", symbols.len());
    }
    Ok(())
}

fn run_info(
    code: Option<&str>,
    exchange: Option<&str>,
    config_path: &Path,
) -> Result<(), PullbackError> {
    let config = load_config(config_path)?;
    let codes = resolve_codes(code, &config)?;
    let exchange = resolve_exchange(exchange, &config)?;
    let data_port = data_port_from_config(&config)?;

    for c in &codes {
        match data_port.get_data_range(c, &exchange) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}.{}: {} bars, {} to {}", c, exchange, count, min_date, max_date);
            }
            Ok(None) => tracing::warn!("{}.{}: no data found", c, exchange),
            Err(e) => tracing::error!("error querying {}.{}: {}", c, exchange, e),
        }
    }
    Ok(())
}
