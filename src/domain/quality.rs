//! Quality factor strategy: rank by profitability, leverage, and margins.

use chrono::NaiveDate;

use crate::domain::scoring::QualityScorer;
use crate::domain::strategy::{rank_by_score, ScoredCandidate, Selection, SelectionStrategy};
use crate::domain::universe::Universe;
use crate::ports::fundamentals_port::FundamentalsPort;

pub struct QualityStrategy {
    scorer: QualityScorer,
}

impl QualityStrategy {
    pub fn new() -> Self {
        Self {
            scorer: QualityScorer::new(),
        }
    }
}

impl Default for QualityStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for QualityStrategy {
    fn name(&self) -> &str {
        "quality"
    }

    fn select_stocks(
        &mut self,
        universe: &Universe,
        _as_of: NaiveDate,
        provider: &dyn FundamentalsPort,
        top_n: usize,
    ) -> Selection {
        let mut candidates = Vec::with_capacity(universe.count());

        for ticker in &universe.tickers {
            let record = match provider.get_stock_info(ticker) {
                Ok(Some(r)) => r,
                Ok(None) => {
                    eprintln!("warning: skipping {} (no fundamentals)", ticker);
                    continue;
                }
                Err(e) => {
                    eprintln!("warning: skipping {} ({})", ticker, e);
                    continue;
                }
            };

            let score = self.scorer.score(&record);
            if !score.is_finite() {
                eprintln!("warning: skipping {} (non-finite score)", ticker);
                continue;
            }

            candidates.push(ScoredCandidate {
                ticker: ticker.clone(),
                score,
                fundamentals: record,
            });
        }

        rank_by_score(candidates, top_n)
    }
}
