//! CSV fundamentals adapter.
//!
//! Loads a fundamentals snapshot file and serves it through the
//! fundamentals port. Rows dated after the rebalance date are dropped
//! at load time so the strategies cannot see the future; when a ticker
//! has several historical rows, the latest one on or before the
//! rebalance date wins.
//!
//! Expected columns:
//! `ticker,date,return_on_equity,debt_to_equity,operating_margin,pe_ratio,pb_ratio,sector`

use crate::domain::error::FactorlabError;
use crate::domain::fundamentals::FundamentalsRecord;
use crate::ports::fundamentals_port::FundamentalsPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub struct CsvFundamentalsAdapter {
    records: HashMap<String, FundamentalsRecord>,
}

impl CsvFundamentalsAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P, as_of: NaiveDate) -> Result<Self, FactorlabError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FactorlabError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_csv(&content, as_of)
    }

    pub fn from_csv(content: &str, as_of: NaiveDate) -> Result<Self, FactorlabError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut latest: HashMap<String, (NaiveDate, FundamentalsRecord)> = HashMap::new();

        for result in rdr.records() {
            let record = result.map_err(|e| FactorlabError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let ticker = get_field(&record, 0, "ticker")?.to_uppercase();

            let date_str = get_field(&record, 1, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                FactorlabError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date > as_of {
                continue;
            }

            let fundamentals = FundamentalsRecord {
                return_on_equity: parse_field(&record, 2, "return_on_equity")?,
                debt_to_equity: parse_field(&record, 3, "debt_to_equity")?,
                operating_margin: parse_field(&record, 4, "operating_margin")?,
                pe_ratio: parse_field(&record, 5, "pe_ratio")?,
                pb_ratio: parse_field(&record, 6, "pb_ratio")?,
                sector: record
                    .get(7)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            };

            match latest.get(&ticker) {
                Some((existing, _)) if *existing >= date => {}
                _ => {
                    latest.insert(ticker, (date, fundamentals));
                }
            }
        }

        Ok(Self {
            records: latest
                .into_iter()
                .map(|(ticker, (_, record))| (ticker, record))
                .collect(),
        })
    }

    pub fn ticker_count(&self) -> usize {
        self.records.len()
    }

    pub fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = self.records.keys().cloned().collect();
        tickers.sort();
        tickers
    }
}

impl FundamentalsPort for CsvFundamentalsAdapter {
    fn get_stock_info(&self, ticker: &str) -> Result<Option<FundamentalsRecord>, FactorlabError> {
        Ok(self.records.get(&ticker.to_uppercase()).cloned())
    }
}

fn get_field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, FactorlabError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| FactorlabError::Data {
            reason: format!("missing {} column", name),
        })
}

fn parse_field(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<f64, FactorlabError> {
    get_field(record, index, name)?
        .parse()
        .map_err(|e| FactorlabError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}
