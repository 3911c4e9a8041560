//! Port traits consumed by the domain.

pub mod config_port;
pub mod fundamentals_port;
