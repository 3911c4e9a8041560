//! Candidate universe for a rebalance decision.
//!
//! Parses ticker lists from configuration. Order is caller-supplied and
//! preserved; duplicates are kept and treated as duplicate candidates.

#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    pub tickers: Vec<String>,
}

impl Universe {
    pub fn new(tickers: Vec<String>) -> Self {
        Self { tickers }
    }

    pub fn count(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,
}

/// Parse a comma-separated ticker list: trim whitespace, uppercase,
/// reject empty tokens. Duplicates pass through unchanged.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        tickers.push(trimmed.to_uppercase());
    }

    Ok(tickers)
}
