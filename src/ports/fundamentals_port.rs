//! Fundamentals data access port trait.

use crate::domain::error::FactorlabError;
use crate::domain::fundamentals::FundamentalsRecord;

/// The one external contract the selection core consumes.
///
/// `Ok(None)` is the explicit "no data for this ticker" signal; `Err`
/// is a provider fault. Strategies treat both as "skip this ticker".
/// Look-ahead prevention is the provider's responsibility: an adapter
/// is constructed as of a rebalance date and must not serve records
/// dated after it.
pub trait FundamentalsPort {
    fn get_stock_info(&self, ticker: &str) -> Result<Option<FundamentalsRecord>, FactorlabError>;
}
