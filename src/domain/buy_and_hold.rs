//! Buy-and-hold benchmark strategy.
//!
//! Selects once and freezes. Subsequent calls intentionally ignore
//! their arguments and return the frozen selection; that is the
//! reference behavior for a benchmark comparator, not a bug.

use chrono::NaiveDate;

use crate::domain::strategy::{Selection, SelectionStrategy};
use crate::domain::universe::Universe;
use crate::ports::fundamentals_port::FundamentalsPort;

#[derive(Debug, Default)]
pub struct BuyAndHoldStrategy {
    frozen: Option<Selection>,
}

impl BuyAndHoldStrategy {
    pub fn new() -> Self {
        Self { frozen: None }
    }

    pub fn is_locked(&self) -> bool {
        self.frozen.is_some()
    }
}

impl SelectionStrategy for BuyAndHoldStrategy {
    fn name(&self) -> &str {
        "buy-and-hold"
    }

    fn select_stocks(
        &mut self,
        universe: &Universe,
        _as_of: NaiveDate,
        _provider: &dyn FundamentalsPort,
        top_n: usize,
    ) -> Selection {
        if let Some(selection) = &self.frozen {
            return selection.clone();
        }

        let tickers: Vec<String> = universe.tickers.iter().take(top_n).cloned().collect();
        let selection = Selection::new(tickers);
        self.frozen = Some(selection.clone());
        selection
    }
}
