//! Euro-based reference rate table
//!
//! Rates are quoted the way the European Central Bank publishes them:
//! one unit of the base currency buys `rate` units of the quoted currency.
//! Codes with a `null` rate are legacy currencies kept in the published
//! history; they are listed but cannot be converted.

use super::{RateError, RateProvider};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Snapshot shipped with the binary
const BUNDLED_TABLE: &str = include_str!("../../data/eurofxref.json");

/// On-disk shape of a rate table
#[derive(Debug, Deserialize)]
struct RawTable {
    date: NaiveDate,
    #[serde(default = "default_base")]
    base: String,
    rates: BTreeMap<String, Option<f64>>,
}

fn default_base() -> String {
    "EUR".to_string()
}

/// Reference rates for a single date
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    date: NaiveDate,
    base: String,
    rates: BTreeMap<String, Option<f64>>,
}

impl RateTable {
    /// Build a table from explicit rates. The base currency is always
    /// quoted at 1.0.
    pub fn from_rates<I, S>(date: NaiveDate, base: &str, rates: I) -> Result<Self, RateError>
    where
        I: IntoIterator<Item = (S, Option<f64>)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();

        for (code, rate) in rates {
            let code = code.into();
            if let Some(value) = rate {
                if !value.is_finite() || value <= 0.0 {
                    return Err(RateError::InvalidTable(format!(
                        "rate for {} must be a positive number, got {}",
                        code, value
                    )));
                }
            }
            table.insert(code, rate);
        }

        table.insert(base.to_string(), Some(1.0));

        Ok(Self {
            date,
            base: base.to_string(),
            rates: table,
        })
    }

    /// Parse a JSON rate table
    pub fn from_json(content: &str) -> Result<Self, RateError> {
        let raw: RawTable = serde_json::from_str(content)
            .map_err(|e| RateError::InvalidTable(e.to_string()))?;

        Self::from_rates(raw.date, &raw.base, raw.rates)
    }

    /// The snapshot embedded at compile time
    pub fn bundled() -> Result<Self, RateError> {
        Self::from_json(BUNDLED_TABLE)
    }

    /// Load a JSON rate table from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rate table from {:?}", path))?;

        let table = Self::from_json(&content)
            .with_context(|| format!("Failed to parse rate table from {:?}", path))?;

        debug!(
            path = %path.display(),
            date = %table.date,
            currencies = table.rates.len(),
            "Loaded rate table"
        );

        Ok(table)
    }

    /// Reference date of the rates
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied().flatten()
    }
}

impl RateProvider for RateTable {
    fn currencies(&self) -> BTreeSet<String> {
        self.rates.keys().cloned().collect()
    }

    fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, RateError> {
        let not_found = || RateError::RateNotFound {
            from: from.to_string(),
            to: to.to_string(),
        };

        let from_rate = self.rate(from).ok_or_else(not_found)?;
        if from == to {
            return Ok(amount);
        }
        let to_rate = self.rate(to).ok_or_else(not_found)?;

        Ok(amount / from_rate * to_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RateTable {
        RateTable::from_rates(
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            "EUR",
            [("USD", Some(1.08)), ("GBP", Some(0.85)), ("CYP", None)],
        )
        .unwrap()
    }

    #[test]
    fn test_base_is_implied() {
        let table = sample();
        let codes: Vec<String> = table.currencies().into_iter().collect();
        assert_eq!(codes, vec!["CYP", "EUR", "GBP", "USD"]);
        assert_eq!(table.base(), "EUR");
    }

    #[test]
    fn test_convert_from_base() {
        let table = sample();
        let out = table.convert(100.0, "EUR", "USD").unwrap();
        assert!((out - 108.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_cross_rate() {
        let table = sample();
        let out = table.convert(108.0, "USD", "GBP").unwrap();
        assert!((out - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_identity_pair() {
        let table = sample();
        assert_eq!(table.convert(42.0, "USD", "USD").unwrap(), 42.0);
    }

    #[test]
    fn test_missing_rate() {
        let table = sample();
        let err = table.convert(100.0, "EUR", "CYP").unwrap_err();
        assert_eq!(
            err,
            RateError::RateNotFound {
                from: "EUR".into(),
                to: "CYP".into()
            }
        );
        assert!(table.convert(100.0, "CYP", "CYP").is_err());
        assert!(table.convert(100.0, "XXX", "EUR").is_err());
    }

    #[test]
    fn test_rejects_bad_rates() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        assert!(RateTable::from_rates(date, "EUR", [("USD", Some(0.0))]).is_err());
        assert!(RateTable::from_rates(date, "EUR", [("USD", Some(-1.0))]).is_err());
        assert!(RateTable::from_rates(date, "EUR", [("USD", Some(f64::NAN))]).is_err());
    }

    #[test]
    fn test_from_json() {
        let table = RateTable::from_json(
            r#"{ "date": "2024-01-02", "rates": { "USD": 1.1, "LTL": null } }"#,
        )
        .unwrap();
        assert_eq!(table.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(table.base(), "EUR");
        assert!(table.currencies().contains("LTL"));

        assert!(matches!(
            RateTable::from_json("not json"),
            Err(RateError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_bundled_table() {
        let table = RateTable::bundled().unwrap();
        assert!(table.currencies().contains("EUR"));
        assert!(table.currencies().contains("USD"));
        assert_eq!(table.convert(100.0, "EUR", "EUR").unwrap(), 100.0);
        assert!(table.convert(100.0, "EUR", "CYP").is_err());
    }
}
