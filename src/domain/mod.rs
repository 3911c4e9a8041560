//! Core domain types and logic.

pub mod buy_and_hold;
pub mod config_validation;
pub mod error;
pub mod fundamentals;
pub mod quality;
pub mod scoring;
pub mod strategy;
pub mod universe;
pub mod value;
