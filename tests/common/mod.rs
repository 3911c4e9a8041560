#![allow(dead_code)]

use factorlab::domain::error::FactorlabError;
use factorlab::domain::fundamentals::FundamentalsRecord;
use factorlab::ports::fundamentals_port::FundamentalsPort;
use std::collections::HashMap;

pub struct MockFundamentalsPort {
    pub data: HashMap<String, FundamentalsRecord>,
    pub errors: HashMap<String, String>,
}

impl MockFundamentalsPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_record(mut self, ticker: &str, record: FundamentalsRecord) -> Self {
        self.data.insert(ticker.to_string(), record);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl FundamentalsPort for MockFundamentalsPort {
    fn get_stock_info(&self, ticker: &str) -> Result<Option<FundamentalsRecord>, FactorlabError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(FactorlabError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned())
    }
}

pub fn fundamentals(
    roe: f64,
    debt_to_equity: f64,
    margin: f64,
    pe: f64,
    pb: f64,
    sector: Option<&str>,
) -> FundamentalsRecord {
    FundamentalsRecord {
        return_on_equity: roe,
        debt_to_equity,
        operating_margin: margin,
        pe_ratio: pe,
        pb_ratio: pb,
        sector: sector.map(String::from),
    }
}

/// Solid mid-range fundamentals, handy when only presence matters.
pub fn typical_fundamentals() -> FundamentalsRecord {
    fundamentals(0.15, 0.8, 0.12, 16.0, 2.0, Some("Industrials"))
}
