//! Core data types for fxpanel
//!
//! Shared small types used by both the panel state and the UI layer.

/// Lowest value an amount field accepts
pub const MIN_AMOUNT: u32 = 1;

/// Highest value an amount field accepts
pub const MAX_AMOUNT: u32 = 1_000_000;

/// Amount shown in both fields at startup
pub const DEFAULT_AMOUNT: u32 = 100;

/// Currency preselected in both selectors when available
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Keep an amount inside the field bounds
pub fn clamp_amount(amount: u32) -> u32 {
    amount.clamp(MIN_AMOUNT, MAX_AMOUNT)
}

/// Round a converted value into something the output field can show
pub fn to_field_value(value: f64) -> u32 {
    if !value.is_finite() || value <= MIN_AMOUNT as f64 {
        return MIN_AMOUNT;
    }
    let rounded = value.round();
    if rounded >= MAX_AMOUNT as f64 {
        MAX_AMOUNT
    } else {
        clamp_amount(rounded as u32)
    }
}

/// Which widget of the row has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Source,
    Amount,
    Target,
    Swap,
    LightTheme,
    DarkTheme,
}

impl Focus {
    pub fn all() -> &'static [Focus] {
        &[
            Focus::Source,
            Focus::Amount,
            Focus::Target,
            Focus::Swap,
            Focus::LightTheme,
            Focus::DarkTheme,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Focus::Source => 0,
            Focus::Amount => 1,
            Focus::Target => 2,
            Focus::Swap => 3,
            Focus::LightTheme => 4,
            Focus::DarkTheme => 5,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        Self::all().get(idx).copied().unwrap_or_default()
    }

    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % Self::all().len())
    }

    pub fn prev(&self) -> Self {
        let len = Self::all().len();
        Self::from_index((self.index() + len - 1) % len)
    }
}

/// Which of the two currency selectors an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Source => "From",
            Side::Target => "To",
        }
    }
}
