//! Configuration validation.
//!
//! Validates all config fields before a selection runs.

use crate::domain::error::FactorlabError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const KNOWN_STRATEGIES: &[&str] = &["quality", "value", "buy-and-hold"];

pub fn validate_selection_config(config: &dyn ConfigPort) -> Result<(), FactorlabError> {
    validate_tickers(config)?;
    validate_as_of(config)?;
    validate_top_n(config)?;
    validate_strategy_name(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), FactorlabError> {
    match config.get_string("data", "fundamentals_csv") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(FactorlabError::ConfigMissing {
            section: "data".to_string(),
            key: "fundamentals_csv".to_string(),
        }),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), FactorlabError> {
    match config.get_string("selection", "tickers") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(FactorlabError::ConfigMissing {
            section: "selection".to_string(),
            key: "tickers".to_string(),
        }),
    }
}

fn validate_as_of(config: &dyn ConfigPort) -> Result<(), FactorlabError> {
    match config.get_string("selection", "as_of") {
        None => Err(FactorlabError::ConfigMissing {
            section: "selection".to_string(),
            key: "as_of".to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| FactorlabError::ConfigInvalid {
                section: "selection".to_string(),
                key: "as_of".to_string(),
                reason: "invalid date format, expected YYYY-MM-DD".to_string(),
            }),
    }
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), FactorlabError> {
    let value = config.get_int("selection", "top_n", 0);
    if value < 1 {
        return Err(FactorlabError::ConfigInvalid {
            section: "selection".to_string(),
            key: "top_n".to_string(),
            reason: "top_n must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_strategy_name(config: &dyn ConfigPort) -> Result<(), FactorlabError> {
    let name = config
        .get_string("selection", "strategy")
        .unwrap_or_else(|| "quality".to_string());
    if KNOWN_STRATEGIES.contains(&name.as_str()) {
        Ok(())
    } else {
        Err(FactorlabError::ConfigInvalid {
            section: "selection".to_string(),
            key: "strategy".to_string(),
            reason: format!(
                "unknown strategy '{}', expected one of: {}",
                name,
                KNOWN_STRATEGIES.join(", ")
            ),
        })
    }
}
