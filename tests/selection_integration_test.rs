//! Integration tests for the strategy contract and its variants.
//!
//! Covers the selection invariants:
//! - at most top_n tickers, descending score, stable ties
//! - per-ticker data failures skip, never abort
//! - equal weights sum to 1.0, empty selection gives empty weights
//! - buy-and-hold freezes its first selection

mod common;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use common::*;
use factorlab::domain::buy_and_hold::BuyAndHoldStrategy;
use factorlab::domain::quality::QualityStrategy;
use factorlab::domain::strategy::{SelectionStrategy, equal_weights, Selection};
use factorlab::domain::universe::Universe;
use factorlab::domain::value::ValueStrategy;
use proptest::prelude::*;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

#[test]
fn quality_ranks_and_truncates() {
    // Scores ordered STRONG > MID > WEAK by construction.
    let port = MockFundamentalsPort::new()
        .with_record("WEAK", fundamentals(0.02, 1.9, 0.01, 15.0, 2.0, None))
        .with_record("STRONG", fundamentals(0.28, 0.2, 0.22, 15.0, 2.0, None))
        .with_record("MID", fundamentals(0.12, 0.9, 0.10, 15.0, 2.0, None));

    let universe = Universe::new(vec!["WEAK".into(), "STRONG".into(), "MID".into()]);
    let mut strategy = QualityStrategy::new();

    let selection = strategy.select_stocks(&universe, as_of(), &port, 2);
    assert_eq!(selection.tickers, vec!["STRONG", "MID"]);
}

#[test]
fn quality_tie_broken_by_universe_order() {
    // A and C share identical fundamentals, hence identical scores;
    // B scores lower, D lowest. top_n=2 must pick [A, C].
    let port = MockFundamentalsPort::new()
        .with_record("A", fundamentals(0.27, 0.2, 0.20, 15.0, 2.0, None))
        .with_record("B", fundamentals(0.12, 0.9, 0.10, 15.0, 2.0, None))
        .with_record("C", fundamentals(0.27, 0.2, 0.20, 15.0, 2.0, None))
        .with_record("D", fundamentals(0.01, 1.9, 0.01, 15.0, 2.0, None));

    let universe = Universe::new(vec!["A".into(), "B".into(), "C".into(), "D".into()]);
    let mut strategy = QualityStrategy::new();

    let selection = strategy.select_stocks(&universe, as_of(), &port, 2);
    assert_eq!(selection.tickers, vec!["A", "C"]);
}

#[test]
fn missing_ticker_excluded_and_call_succeeds() {
    // X has no data; Y must carry the whole portfolio.
    let port = MockFundamentalsPort::new().with_record("Y", typical_fundamentals());

    let universe = Universe::new(vec!["X".into(), "Y".into()]);
    let mut strategy = QualityStrategy::new();

    let selection = strategy.select_stocks(&universe, as_of(), &port, 2);
    assert_eq!(selection.tickers, vec!["Y"]);

    let weights = strategy.portfolio_weights(&selection);
    assert_eq!(weights.len(), 1);
    assert_relative_eq!(weights["Y"], 1.0, epsilon = 1e-9);
    assert!(!weights.contains_key("X"));
}

#[test]
fn erroring_ticker_excluded_and_call_succeeds() {
    let port = MockFundamentalsPort::new()
        .with_error("BAD", "connection reset")
        .with_record("GOOD", typical_fundamentals());

    let universe = Universe::new(vec!["BAD".into(), "GOOD".into()]);
    let mut strategy = QualityStrategy::new();

    let selection = strategy.select_stocks(&universe, as_of(), &port, 2);
    assert_eq!(selection.tickers, vec!["GOOD"]);
}

#[test]
fn provider_outage_yields_empty_selection_not_panic() {
    let port = MockFundamentalsPort::new()
        .with_error("A", "outage")
        .with_error("B", "outage");

    let universe = Universe::new(vec!["A".into(), "B".into()]);
    let mut strategy = QualityStrategy::new();

    let selection = strategy.select_stocks(&universe, as_of(), &port, 2);
    assert!(selection.is_empty());
    assert!(strategy.portfolio_weights(&selection).is_empty());
}

#[test]
fn value_prefers_cheap_vs_sector_peers() {
    let port = MockFundamentalsPort::new()
        .with_record("CHEAP", fundamentals(0.1, 0.5, 0.1, 8.0, 1.0, Some("Financials")))
        .with_record("FAIR", fundamentals(0.1, 0.5, 0.1, 16.0, 2.0, Some("Financials")))
        .with_record("DEAR", fundamentals(0.1, 0.5, 0.1, 32.0, 4.0, Some("Financials")));

    let universe = Universe::new(vec!["DEAR".into(), "FAIR".into(), "CHEAP".into()]);
    let mut strategy = ValueStrategy::new();

    let selection = strategy.select_stocks(&universe, as_of(), &port, 1);
    assert_eq!(selection.tickers, vec!["CHEAP"]);
}

#[test]
fn value_handles_unknown_sector_without_error() {
    let port = MockFundamentalsPort::new()
        .with_record("NOSEC", fundamentals(0.1, 0.5, 0.1, 8.0, 1.0, None))
        .with_record("A", fundamentals(0.1, 0.5, 0.1, 16.0, 2.0, Some("Energy")))
        .with_record("B", fundamentals(0.1, 0.5, 0.1, 16.0, 2.0, Some("Energy")));

    let universe = Universe::new(vec!["A".into(), "B".into(), "NOSEC".into()]);
    let mut strategy = ValueStrategy::new();

    let selection = strategy.select_stocks(&universe, as_of(), &port, 3);
    assert_eq!(selection.len(), 3);
    assert_eq!(selection.tickers[0], "NOSEC");
}

#[test]
fn buy_and_hold_two_calls_return_identical_selection() {
    let port = MockFundamentalsPort::new();
    let mut strategy = BuyAndHoldStrategy::new();

    let first_universe = Universe::new(vec!["A".into(), "B".into(), "C".into()]);
    let second_universe = Universe::new(vec!["X".into(), "Y".into(), "Z".into()]);

    let first = strategy.select_stocks(&first_universe, as_of(), &port, 2);
    let second = strategy.select_stocks(
        &second_universe,
        NaiveDate::from_ymd_opt(2025, 6, 27).unwrap(),
        &port,
        3,
    );

    assert_eq!(first, second);
    assert_eq!(second.tickers, vec!["A", "B"]);
}

#[test]
fn default_weights_are_equal_and_sum_to_one() {
    let selection = Selection::new(vec!["A".into(), "B".into(), "C".into(), "D".into()]);
    let strategy = QualityStrategy::new();
    let weights = strategy.portfolio_weights(&selection);

    assert_eq!(weights.len(), 4);
    for weight in weights.values() {
        assert_relative_eq!(*weight, 0.25, epsilon = 1e-9);
    }
    let total: f64 = weights.values().sum();
    assert_relative_eq!(total, 1.0, epsilon = 1e-9);
}

#[test]
fn empty_selection_has_empty_weights() {
    assert!(equal_weights(&Selection::default()).is_empty());
}

#[test]
fn default_validate_selection_accepts_everything() {
    let strategy = QualityStrategy::new();
    assert!(strategy.validate_selection(&Selection::default()));
    assert!(strategy.validate_selection(&Selection::new(vec!["A".into(); 100])));
}

proptest! {
    /// len(select) <= top_n for any universe/coverage combination.
    #[test]
    fn selection_never_exceeds_top_n(
        universe_size in 0usize..12,
        covered in 0usize..12,
        top_n in 0usize..8,
    ) {
        let tickers: Vec<String> = (0..universe_size).map(|i| format!("T{i}")).collect();
        let mut port = MockFundamentalsPort::new();
        for ticker in tickers.iter().take(covered) {
            port.data.insert(ticker.clone(), typical_fundamentals());
        }

        let universe = Universe::new(tickers);
        let mut strategy = QualityStrategy::new();
        let selection = strategy.select_stocks(&universe, as_of(), &port, top_n);

        prop_assert!(selection.len() <= top_n);
        prop_assert!(selection.len() <= universe.count());
    }

    /// Non-empty equal-weight maps always sum to 1.0.
    #[test]
    fn equal_weights_always_sum_to_one(size in 1usize..50) {
        let tickers: Vec<String> = (0..size).map(|i| format!("T{i}")).collect();
        let weights = equal_weights(&Selection::new(tickers));

        let total: f64 = weights.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-9);
        prop_assert!(weights.values().all(|w| *w >= 0.0));
    }
}
