//! Exchange rate lookup
//!
//! The panel only talks to rates through the [`RateProvider`] trait:
//! - the set of supported currency codes
//! - pairwise conversion of an amount

mod table;

pub use table::RateTable;

use std::collections::BTreeSet;

/// Errors raised by rate providers
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateError {
    #[error("exchange rate not found for {from} -> {to}")]
    RateNotFound { from: String, to: String },

    #[error("invalid rate table: {0}")]
    InvalidTable(String),
}

/// Source of exchange rates for the converter panel
pub trait RateProvider {
    /// Every currency code the provider knows about, including codes
    /// that currently have no rate.
    fn currencies(&self) -> BTreeSet<String>;

    /// Convert `amount` from one currency to another.
    fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, RateError>;
}
