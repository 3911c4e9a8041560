//! Composite factor scores over fundamentals.
//!
//! Each scorer maps a [`FundamentalsRecord`] to a scalar in [0, 1] via a
//! weighted sum of normalized components. Normalization clamps to [0, 1]
//! so each component stays monotonic in its input over the clamp range.

use crate::domain::fundamentals::FundamentalsRecord;

/// Quality scorer: rewards high return on equity, low leverage, and
/// high operating margin.
///
/// ROE saturates at 30%, operating margin at 25%; debt-to-equity of 2.0
/// or worse scores zero on the leverage component. The weighting
/// (0.40 / 0.30 / 0.30) is a documented implementation choice, not a
/// calibrated model.
pub struct QualityScorer {
    roe_weight: f64,
    leverage_weight: f64,
    margin_weight: f64,
}

impl QualityScorer {
    pub fn new() -> Self {
        Self {
            roe_weight: 0.40,
            leverage_weight: 0.30,
            margin_weight: 0.30,
        }
    }

    pub fn score(&self, record: &FundamentalsRecord) -> f64 {
        let roe_score = normalize_roe(record.return_on_equity);
        let leverage_score = normalize_leverage(record.debt_to_equity);
        let margin_score = normalize_margin(record.operating_margin);

        roe_score * self.roe_weight
            + leverage_score * self.leverage_weight
            + margin_score * self.margin_weight
    }
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_roe(roe: f64) -> f64 {
    (roe / 0.30).clamp(0.0, 1.0)
}

fn normalize_leverage(debt_to_equity: f64) -> f64 {
    if debt_to_equity < 0.0 {
        // Negative equity; worst leverage bucket.
        return 0.0;
    }
    (1.0 - debt_to_equity / 2.0).clamp(0.0, 1.0)
}

fn normalize_margin(margin: f64) -> f64 {
    (margin / 0.25).clamp(0.0, 1.0)
}

/// Peer baseline the value scorer compares against: mean P/E and P/B
/// over a sector (or the whole universe when the sector is too thin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerBaseline {
    pub pe_ratio: f64,
    pub pb_ratio: f64,
}

/// Value scorer: rewards ratios below the peer baseline.
///
/// Each component is `baseline / own`, rescaled so trading exactly at
/// the baseline scores 0.5 and half the baseline (or cheaper) scores
/// 1.0. Non-positive ratios (negative earnings, negative book value)
/// score zero for that component.
pub struct ValueScorer {
    earnings_weight: f64,
    book_weight: f64,
}

impl ValueScorer {
    pub fn new() -> Self {
        Self {
            earnings_weight: 0.5,
            book_weight: 0.5,
        }
    }

    pub fn score(&self, record: &FundamentalsRecord, baseline: &PeerBaseline) -> f64 {
        let earnings_score = cheapness(record.pe_ratio, baseline.pe_ratio);
        let book_score = cheapness(record.pb_ratio, baseline.pb_ratio);

        earnings_score * self.earnings_weight + book_score * self.book_weight
    }
}

impl Default for ValueScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn cheapness(own: f64, baseline: f64) -> f64 {
    if own <= 0.0 || baseline <= 0.0 {
        return 0.0;
    }
    (baseline / own / 2.0).clamp(0.0, 1.0)
}
