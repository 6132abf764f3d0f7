//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (pesos, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Argentine pesos, the store's currency.
    #[must_use]
    pub const fn ars(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::ARS)
    }

    /// Format for display, e.g. `$29.99`.
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}{:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    ARS,
    USD,
}

impl CurrencyCode {
    /// Display symbol. Both currencies use `$` locally.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::ARS | Self::USD => "$",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ARS => "ARS",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_two_places() {
        assert_eq!(Price::ars(Decimal::new(2999, 2)).display(), "$29.99");
        assert_eq!(Price::ars(Decimal::from(40)).to_string(), "$40.00");
    }

    #[test]
    fn test_default_currency_is_ars() {
        assert_eq!(CurrencyCode::default().code(), "ARS");
    }
}
