//! Converter panel state
//!
//! Plain session state for the converter and the behaviours that mutate it:
//! - recompute the output from (amount, source, target)
//! - swap the two selected currencies
//! - switch between the light and dark theme
//!
//! Nothing here knows about the terminal. The UI layer reads
//! [`PanelState`] and calls the operations below from its key handlers.

use crate::config::ThemeName;
use crate::rates::{RateError, RateProvider};
use crate::types::{clamp_amount, to_field_value, Side, DEFAULT_AMOUNT, DEFAULT_CURRENCY};
use tracing::{debug, warn};

/// Mutable session state of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub source: String,
    pub target: String,
    pub amount: u32,
    pub output: u32,
    pub theme: ThemeName,
}

/// Outcome of a recompute trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recompute {
    /// Output field now holds this value
    Updated(u32),
    /// No rate for the pair; output kept its previous value
    RateNotFound,
}

/// The converter panel: supported currencies, current state and the
/// provider used for conversion
pub struct ConverterPanel<P: RateProvider> {
    provider: P,
    currencies: Vec<String>,
    state: PanelState,
}

impl<P: RateProvider> ConverterPanel<P> {
    /// Create a panel with the stock defaults (EUR/EUR, 100, light)
    pub fn new(provider: P) -> Self {
        Self::with_defaults(provider, DEFAULT_CURRENCY, DEFAULT_AMOUNT, ThemeName::Light)
    }

    /// Create a panel with explicit startup values
    ///
    /// Both selectors start on `currency` if the provider supports it,
    /// otherwise on the first code in sorted order. Both amount fields
    /// start on `amount`; no conversion runs until the first trigger.
    pub fn with_defaults(provider: P, currency: &str, amount: u32, theme: ThemeName) -> Self {
        // BTreeSet iterates in lexicographic order
        let currencies: Vec<String> = provider.currencies().into_iter().collect();

        let initial = if currencies.iter().any(|c| c == currency) {
            currency.to_string()
        } else {
            currencies.first().cloned().unwrap_or_default()
        };

        let amount = clamp_amount(amount);

        Self {
            provider,
            currencies,
            state: PanelState {
                source: initial.clone(),
                target: initial,
                amount,
                output: amount,
                theme,
            },
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Supported currency codes, sorted
    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Code currently selected on one side
    pub fn selected(&self, side: Side) -> &str {
        match side {
            Side::Source => &self.state.source,
            Side::Target => &self.state.target,
        }
    }

    /// Position of the selected code in the currency list
    pub fn selected_index(&self, side: Side) -> usize {
        let code = self.selected(side);
        self.currencies.iter().position(|c| c == code).unwrap_or(0)
    }

    /// Run the conversion for the current (amount, source, target)
    ///
    /// On success the output field is updated. A missing rate leaves the
    /// output untouched and emits a single warning.
    pub fn recompute(&mut self) -> Recompute {
        match self.convert_current() {
            Ok(value) => {
                self.state.output = to_field_value(value);
                debug!(
                    amount = self.state.amount,
                    from = %self.state.source,
                    to = %self.state.target,
                    output = self.state.output,
                    "Recomputed conversion"
                );
                Recompute::Updated(self.state.output)
            }
            Err(e) => {
                warn!(
                    from = %self.state.source,
                    to = %self.state.target,
                    error = %e,
                    "exchange rate not found"
                );
                Recompute::RateNotFound
            }
        }
    }

    fn convert_current(&self) -> Result<f64, RateError> {
        self.provider.convert(
            self.state.amount as f64,
            &self.state.source,
            &self.state.target,
        )
    }

    /// Select a currency on one side and recompute
    ///
    /// Codes outside the supported set are ignored.
    pub fn select(&mut self, side: Side, code: &str) -> Option<Recompute> {
        if !self.currencies.iter().any(|c| c == code) {
            debug!(code, side = side.label(), "Ignoring unsupported currency");
            return None;
        }

        match side {
            Side::Source => self.state.source = code.to_string(),
            Side::Target => self.state.target = code.to_string(),
        }

        Some(self.recompute())
    }

    /// Move the selection of one side through the sorted list, wrapping
    /// at both ends
    pub fn step(&mut self, side: Side, delta: isize) -> Option<Recompute> {
        let len = self.currencies.len() as isize;
        if len == 0 {
            return None;
        }

        let current = self.selected_index(side) as isize;
        let idx = (current + delta).rem_euclid(len) as usize;
        let code = self.currencies[idx].clone();

        self.select(side, &code)
    }

    /// Set the input amount (clamped to the field bounds) and recompute
    pub fn set_amount(&mut self, amount: u32) -> Recompute {
        self.state.amount = clamp_amount(amount);
        self.recompute()
    }

    /// Exchange the selected source and target currencies and recompute
    pub fn swap(&mut self) -> Recompute {
        std::mem::swap(&mut self.state.source, &mut self.state.target);
        self.recompute()
    }

    /// Switch the active theme. Does not touch the conversion.
    pub fn set_theme(&mut self, theme: ThemeName) {
        if self.state.theme != theme {
            debug!(theme = theme.as_str(), "Switching theme");
        }
        self.state.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::RateTable;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    fn table() -> RateTable {
        RateTable::from_rates(
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            "EUR",
            [
                ("USD", Some(1.08)),
                ("GBP", Some(0.85)),
                ("JPY", Some(168.36)),
                ("CYP", None),
            ],
        )
        .unwrap()
    }

    /// Counts warning events
    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let panel = ConverterPanel::new(table());
        let state = panel.state();

        assert_eq!(panel.currencies(), &["CYP", "EUR", "GBP", "JPY", "USD"]);
        assert_eq!(state.source, "EUR");
        assert_eq!(state.target, "EUR");
        assert_eq!(state.amount, 100);
        assert_eq!(state.output, 100);
        assert_eq!(state.theme, ThemeName::Light);
    }

    #[test]
    fn test_default_currency_missing() {
        let provider = RateTable::from_rates(
            NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            "USD",
            [("GBP", Some(0.79))],
        )
        .unwrap();
        let panel = ConverterPanel::new(provider);
        assert_eq!(panel.state().source, "GBP");
        assert_eq!(panel.state().target, "GBP");
    }

    #[test]
    fn test_identity_conversion() {
        let mut panel = ConverterPanel::new(table());
        assert_eq!(panel.recompute(), Recompute::Updated(100));
        assert_eq!(panel.state().output, 100);
    }

    #[test]
    fn test_eur_to_usd() {
        let mut panel = ConverterPanel::new(table());
        assert_eq!(panel.select(Side::Target, "USD"), Some(Recompute::Updated(108)));
        assert_eq!(panel.state().output, 108);
    }

    #[test]
    fn test_amount_change_recomputes() {
        let mut panel = ConverterPanel::new(table());
        panel.select(Side::Target, "USD");

        assert_eq!(panel.set_amount(250), Recompute::Updated(270));
        assert_eq!(panel.set_amount(0), Recompute::Updated(1));
        assert_eq!(panel.state().amount, 1);
        assert_eq!(panel.set_amount(5_000_000), Recompute::Updated(1_000_000));
        assert_eq!(panel.state().amount, 1_000_000);
    }

    #[test]
    fn test_output_is_amount_times_rate() {
        let mut panel = ConverterPanel::new(table());
        panel.select(Side::Target, "GBP");

        for amount in [1, 7, 100, 999, 12_345, 1_000_000] {
            let expected = to_field_value(amount as f64 * 0.85);
            assert_eq!(panel.set_amount(amount), Recompute::Updated(expected));
        }
    }

    #[test]
    fn test_swap() {
        let mut panel = ConverterPanel::new(table());
        panel.select(Side::Target, "USD");

        assert_eq!(panel.swap(), Recompute::Updated(93));
        assert_eq!(panel.state().source, "USD");
        assert_eq!(panel.state().target, "EUR");
    }

    #[test]
    fn test_double_swap_round_trip() {
        let mut panel = ConverterPanel::new(table());
        panel.select(Side::Source, "GBP");
        panel.select(Side::Target, "JPY");
        let before = panel.state().clone();

        panel.swap();
        panel.swap();
        assert_eq!(panel.state(), &before);
    }

    #[test]
    fn test_swap_same_currency() {
        let mut panel = ConverterPanel::new(table());
        panel.set_amount(42);

        assert_eq!(panel.swap(), Recompute::Updated(42));
        assert_eq!(panel.state().source, "EUR");
        assert_eq!(panel.state().target, "EUR");
    }

    #[test]
    fn test_missing_rate_keeps_output() {
        let mut panel = ConverterPanel::new(table());
        panel.select(Side::Target, "USD");
        assert_eq!(panel.state().output, 108);

        assert_eq!(panel.select(Side::Target, "CYP"), Some(Recompute::RateNotFound));
        assert_eq!(panel.state().target, "CYP");
        assert_eq!(panel.state().output, 108);

        assert_eq!(panel.set_amount(500), Recompute::RateNotFound);
        assert_eq!(panel.state().amount, 500);
        assert_eq!(panel.state().output, 108);
    }

    #[test]
    fn test_missing_rate_logs_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let mut panel = ConverterPanel::new(table());
            panel.select(Side::Target, "USD");
            assert_eq!(count.load(Ordering::SeqCst), 0);

            panel.select(Side::Target, "CYP");
        });

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsupported_code_ignored() {
        let mut panel = ConverterPanel::new(table());
        assert_eq!(panel.select(Side::Source, "XXX"), None);
        assert_eq!(panel.state().source, "EUR");
    }

    #[test]
    fn test_step_wraps() {
        let mut panel = ConverterPanel::new(table());

        panel.step(Side::Source, 1);
        assert_eq!(panel.state().source, "GBP");

        panel.step(Side::Source, -3);
        assert_eq!(panel.state().source, "USD");

        panel.step(Side::Source, 1);
        assert_eq!(panel.state().source, "CYP");
    }

    #[test]
    fn test_theme_does_not_recompute() {
        let mut panel = ConverterPanel::new(table());
        panel.select(Side::Target, "USD");
        let output = panel.state().output;

        panel.set_theme(ThemeName::Dark);
        assert_eq!(panel.state().theme, ThemeName::Dark);
        assert_eq!(panel.state().output, output);

        panel.set_theme(ThemeName::Light);
        assert_eq!(panel.state().theme, ThemeName::Light);
    }
}
