//! Per-ticker fundamentals as supplied by a data provider.

/// Snapshot of the fundamental fields the scoring strategies consume.
///
/// Produced by a [`FundamentalsPort`](crate::ports::fundamentals_port::FundamentalsPort)
/// implementation; the core never fabricates or mutates one.
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalsRecord {
    pub return_on_equity: f64,
    pub debt_to_equity: f64,
    pub operating_margin: f64,
    pub pe_ratio: f64,
    pub pb_ratio: f64,
    pub sector: Option<String>,
}

pub const UNKNOWN_SECTOR: &str = "Unknown";

impl FundamentalsRecord {
    /// Sector label used for peer grouping; records without a sector
    /// share the "Unknown" bucket.
    pub fn sector_label(&self) -> &str {
        self.sector.as_deref().unwrap_or(UNKNOWN_SECTOR)
    }
}
