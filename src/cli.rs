//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvFundamentalsAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::buy_and_hold::BuyAndHoldStrategy;
use crate::domain::config_validation::{validate_data_config, validate_selection_config};
use crate::domain::error::FactorlabError;
use crate::domain::quality::QualityStrategy;
use crate::domain::strategy::SelectionStrategy;
use crate::domain::universe::{parse_tickers, Universe};
use crate::domain::value::ValueStrategy;
use crate::ports::config_port::ConfigPort;
use crate::ports::fundamentals_port::FundamentalsPort;

#[derive(Parser, Debug)]
#[command(name = "factorlab", about = "Factor-based stock selection")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a selection and print portfolio weights
    Select {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        strategy: Option<String>,
        #[arg(long)]
        tickers: Option<String>,
        #[arg(long)]
        top_n: Option<usize>,
        #[arg(long)]
        as_of: Option<String>,
    },
    /// Validate a selection configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show fundamentals coverage for ticker(s)
    Info {
        #[arg(long)]
        ticker: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Select {
            config,
            strategy,
            tickers,
            top_n,
            as_of,
        } => run_select(
            &config,
            strategy.as_deref(),
            tickers.as_deref(),
            top_n,
            as_of.as_deref(),
        ),
        Command::Validate { config } => run_validate(&config),
        Command::Info { ticker, config } => run_info(ticker.as_deref(), &config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FactorlabError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Selection parameters resolved from config plus CLI overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionParams {
    pub as_of: NaiveDate,
    pub top_n: usize,
    pub strategy: String,
}

pub fn build_selection_params(
    config: &dyn ConfigPort,
    strategy_override: Option<&str>,
    top_n_override: Option<usize>,
    as_of_override: Option<&str>,
) -> Result<SelectionParams, FactorlabError> {
    let as_of_str = match as_of_override {
        Some(s) => s.to_string(),
        None => {
            config
                .get_string("selection", "as_of")
                .ok_or_else(|| FactorlabError::ConfigMissing {
                    section: "selection".into(),
                    key: "as_of".into(),
                })?
        }
    };

    let as_of = NaiveDate::parse_from_str(&as_of_str, "%Y-%m-%d").map_err(|_| {
        FactorlabError::ConfigInvalid {
            section: "selection".into(),
            key: "as_of".into(),
            reason: "invalid date format, expected YYYY-MM-DD".into(),
        }
    })?;

    // Range-check before the usize cast so a negative config value
    // cannot wrap into a huge top_n.
    let raw_top_n = match top_n_override {
        Some(n) => i64::try_from(n).unwrap_or(i64::MAX),
        None => config.get_int("selection", "top_n", 0),
    };
    if raw_top_n < 1 {
        return Err(FactorlabError::ConfigInvalid {
            section: "selection".into(),
            key: "top_n".into(),
            reason: "top_n must be at least 1".into(),
        });
    }
    let top_n = raw_top_n as usize;

    let strategy = strategy_override
        .map(String::from)
        .or_else(|| config.get_string("selection", "strategy"))
        .unwrap_or_else(|| "quality".to_string());

    Ok(SelectionParams {
        as_of,
        top_n,
        strategy,
    })
}

pub fn build_strategy(name: &str) -> Result<Box<dyn SelectionStrategy>, FactorlabError> {
    match name {
        "quality" => Ok(Box::new(QualityStrategy::new())),
        "value" => Ok(Box::new(ValueStrategy::new())),
        "buy-and-hold" => Ok(Box::new(BuyAndHoldStrategy::new())),
        other => Err(FactorlabError::UnknownStrategy {
            name: other.to_string(),
        }),
    }
}

pub fn resolve_tickers(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<Vec<String>, FactorlabError> {
    let input = match ticker_override {
        Some(t) => t.to_string(),
        None => {
            config
                .get_string("selection", "tickers")
                .ok_or_else(|| FactorlabError::ConfigMissing {
                    section: "selection".into(),
                    key: "tickers".into(),
                })?
        }
    };

    Ok(parse_tickers(&input)?)
}

/// Ticker resolution for `info`: an explicit override or a configured
/// list is parsed strictly (malformed input is an error); only a
/// missing `[selection] tickers` key falls back to `fallback` (every
/// ticker in the snapshot).
pub fn resolve_info_tickers(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
    fallback: Vec<String>,
) -> Result<Vec<String>, FactorlabError> {
    if let Some(t) = ticker_override {
        return Ok(parse_tickers(t)?);
    }

    match config.get_string("selection", "tickers") {
        Some(input) => Ok(parse_tickers(&input)?),
        None => Ok(fallback),
    }
}

fn load_provider(
    config: &dyn ConfigPort,
    as_of: NaiveDate,
) -> Result<CsvFundamentalsAdapter, FactorlabError> {
    let path =
        config
            .get_string("data", "fundamentals_csv")
            .ok_or_else(|| FactorlabError::ConfigMissing {
                section: "data".into(),
                key: "fundamentals_csv".into(),
            })?;
    CsvFundamentalsAdapter::from_file(&path, as_of)
}

fn run_select(
    config_path: &PathBuf,
    strategy_override: Option<&str>,
    ticker_override: Option<&str>,
    top_n_override: Option<usize>,
    as_of_override: Option<&str>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = match build_selection_params(
        &adapter,
        strategy_override,
        top_n_override,
        as_of_override,
    ) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = match resolve_tickers(ticker_override, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let universe = Universe::new(tickers);

    let provider = match load_provider(&adapter, params.as_of) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut strategy = match build_strategy(&params.strategy) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Selecting up to {} of {} tickers with {} as of {}",
        params.top_n,
        universe.count(),
        strategy.name(),
        params.as_of,
    );

    let selection = strategy.select_stocks(&universe, params.as_of, &provider, params.top_n);

    if selection.is_empty() {
        eprintln!("No candidates passed scoring; holding cash.");
        return ExitCode::SUCCESS;
    }

    if !strategy.validate_selection(&selection) {
        eprintln!("warning: selection failed strategy policy constraints");
    }

    let weights = strategy.portfolio_weights(&selection);

    eprintln!("\nSelected {} of {} tickers:", selection.len(), universe.count());
    let mut printed = std::collections::HashSet::new();
    for ticker in &selection.tickers {
        if !printed.insert(ticker.clone()) {
            continue;
        }
        if let Some(weight) = weights.get(ticker) {
            println!("{},{:.6}", ticker, weight);
        }
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_data_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_selection_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let params = match build_selection_params(&adapter, None, None, None) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = match resolve_tickers(None, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nSelection:");
    eprintln!("  strategy: {}", params.strategy);
    eprintln!("  as_of:    {}", params.as_of);
    eprintln!("  top_n:    {}", params.top_n);
    eprintln!("  tickers:  {}", tickers.join(", "));

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_info(ticker_override: Option<&str>, config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let params = match build_selection_params(&adapter, None, None, None) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let provider = match load_provider(&adapter, params.as_of) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let tickers = match resolve_info_tickers(ticker_override, &adapter, provider.tickers()) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for ticker in &tickers {
        match provider.get_stock_info(ticker) {
            Ok(Some(record)) => {
                println!(
                    "{}: roe={:.3} d/e={:.2} margin={:.3} pe={:.1} pb={:.2} sector={}",
                    ticker,
                    record.return_on_equity,
                    record.debt_to_equity,
                    record.operating_margin,
                    record.pe_ratio,
                    record.pb_ratio,
                    record.sector_label(),
                );
            }
            Ok(None) => {
                eprintln!("{}: no fundamentals as of {}", ticker, params.as_of);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", ticker, e);
            }
        }
    }

    ExitCode::SUCCESS
}
