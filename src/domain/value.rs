//! Value factor strategy: rank by valuation relative to sector peers.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::fundamentals::FundamentalsRecord;
use crate::domain::scoring::{PeerBaseline, ValueScorer};
use crate::domain::strategy::{rank_by_score, ScoredCandidate, Selection, SelectionStrategy};
use crate::domain::universe::Universe;
use crate::ports::fundamentals_port::FundamentalsPort;

/// A sector needs at least this many scoreable members before its own
/// baseline is used; thinner sectors fall back to the global baseline.
const MIN_SECTOR_PEERS: usize = 2;

pub struct ValueStrategy {
    scorer: ValueScorer,
}

impl ValueStrategy {
    pub fn new() -> Self {
        Self {
            scorer: ValueScorer::new(),
        }
    }
}

impl Default for ValueStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for ValueStrategy {
    fn name(&self) -> &str {
        "value"
    }

    fn select_stocks(
        &mut self,
        universe: &Universe,
        _as_of: NaiveDate,
        provider: &dyn FundamentalsPort,
        top_n: usize,
    ) -> Selection {
        // First pass: fetch fundamentals, skipping failures, so
        // baselines are computed over exactly the scoreable set.
        let mut records: Vec<(String, FundamentalsRecord)> = Vec::with_capacity(universe.count());

        for ticker in &universe.tickers {
            match provider.get_stock_info(ticker) {
                Ok(Some(r)) => records.push((ticker.clone(), r)),
                Ok(None) => {
                    eprintln!("warning: skipping {} (no fundamentals)", ticker);
                }
                Err(e) => {
                    eprintln!("warning: skipping {} ({})", ticker, e);
                }
            }
        }

        let sector_baselines = compute_sector_baselines(&records);
        let global_baseline = compute_baseline(records.iter().map(|(_, r)| r));

        let mut candidates = Vec::with_capacity(records.len());
        for (ticker, record) in records {
            let baseline = sector_baselines
                .get(record.sector_label())
                .copied()
                .unwrap_or(global_baseline);

            let score = self.scorer.score(&record, &baseline);
            if !score.is_finite() {
                eprintln!("warning: skipping {} (non-finite score)", ticker);
                continue;
            }

            candidates.push(ScoredCandidate {
                ticker,
                score,
                fundamentals: record,
            });
        }

        rank_by_score(candidates, top_n)
    }
}

/// Mean P/E and P/B per sector, keeping only sectors with enough peers.
fn compute_sector_baselines(
    records: &[(String, FundamentalsRecord)],
) -> HashMap<String, PeerBaseline> {
    let mut by_sector: HashMap<String, Vec<&FundamentalsRecord>> = HashMap::new();
    for (_, record) in records {
        by_sector
            .entry(record.sector_label().to_string())
            .or_default()
            .push(record);
    }

    by_sector
        .into_iter()
        .filter(|(_, members)| members.len() >= MIN_SECTOR_PEERS)
        .map(|(sector, members)| {
            let baseline = compute_baseline(members.into_iter());
            (sector, baseline)
        })
        .collect()
}

/// Mean of the positive ratios in the group. A group with no positive
/// ratios gets a zero baseline, which scores every member at zero
/// rather than erroring.
fn compute_baseline<'a>(records: impl Iterator<Item = &'a FundamentalsRecord>) -> PeerBaseline {
    let mut pe_sum = 0.0;
    let mut pe_count = 0usize;
    let mut pb_sum = 0.0;
    let mut pb_count = 0usize;

    for record in records {
        if record.pe_ratio > 0.0 {
            pe_sum += record.pe_ratio;
            pe_count += 1;
        }
        if record.pb_ratio > 0.0 {
            pb_sum += record.pb_ratio;
            pb_count += 1;
        }
    }

    PeerBaseline {
        pe_ratio: if pe_count > 0 {
            pe_sum / pe_count as f64
        } else {
            0.0
        },
        pb_ratio: if pb_count > 0 {
            pb_sum / pb_count as f64
        } else {
            0.0
        },
    }
}
