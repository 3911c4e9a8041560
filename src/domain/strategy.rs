//! Selection strategy contract and shared ranking/weighting helpers.
//!
//! A strategy picks up to `top_n` tickers from a universe as of a
//! rebalance date. The contract has one mandatory operation
//! ([`SelectionStrategy::select_stocks`]) and two with default
//! implementations, so variants swap in without changing caller code.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::fundamentals::FundamentalsRecord;
use crate::domain::universe::Universe;
use crate::ports::fundamentals_port::FundamentalsPort;

/// Tickers chosen for one rebalance, ordered by descending score with
/// stable ties (first appearance in the universe wins).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    pub tickers: Vec<String>,
}

impl Selection {
    pub fn new(tickers: Vec<String>) -> Self {
        Self { tickers }
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

/// One ranked candidate, transient within a single selection call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub ticker: String,
    pub score: f64,
    pub fundamentals: FundamentalsRecord,
}

pub trait SelectionStrategy {
    fn name(&self) -> &str;

    /// Select up to `top_n` tickers from `universe` as of `as_of`.
    ///
    /// Per-ticker provider failures are skipped, never propagated; an
    /// empty universe (or a provider that fails every ticker) yields an
    /// empty selection. Takes `&mut self` so stateful variants can
    /// cache their first result.
    fn select_stocks(
        &mut self,
        universe: &Universe,
        as_of: NaiveDate,
        provider: &dyn FundamentalsPort,
        top_n: usize,
    ) -> Selection;

    /// Position sizing for a selection. Defaults to equal weight.
    fn portfolio_weights(&self, selection: &Selection) -> HashMap<String, f64> {
        equal_weights(selection)
    }

    /// Policy constraint hook (e.g. sector concentration caps). The
    /// default accepts everything.
    fn validate_selection(&self, _selection: &Selection) -> bool {
        true
    }
}

/// Equal weighting: `1/len` per slot. Duplicate tickers accumulate
/// weight so the map still sums to 1.0. Empty selection yields an
/// empty map.
pub fn equal_weights(selection: &Selection) -> HashMap<String, f64> {
    let mut weights = HashMap::new();
    if selection.is_empty() {
        return weights;
    }

    let weight = 1.0 / selection.len() as f64;
    for ticker in &selection.tickers {
        *weights.entry(ticker.clone()).or_insert(0.0) += weight;
    }
    weights
}

/// Stable-sort candidates by descending score and truncate to `top_n`.
///
/// `Vec::sort_by` is stable, so equal scores keep their first-appearance
/// order. Candidates with non-finite scores must be filtered before
/// calling this.
pub fn rank_by_score(mut candidates: Vec<ScoredCandidate>, top_n: usize) -> Selection {
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(top_n);
    Selection::new(candidates.into_iter().map(|c| c.ticker).collect())
}
