use std::fmt;

use rust_decimal::Decimal;

use crate::error::TableError;

/// Composite `(name, code)` key identifying a currency in a rate table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyKey {
    pub name: String,
    pub code: String,
}

impl CurrencyKey {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Renders the selection label, e.g. `euro, EUR`.
impl fmt::Display for CurrencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name, self.code)
    }
}

/// Price of one unit of a foreign currency in home-currency units.
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    pub key: CurrencyKey,
    pub mid: Decimal,
}

impl RateEntry {
    pub fn new(key: CurrencyKey, mid: Decimal) -> Result<Self, TableError> {
        if key.name.trim().is_empty() {
            return Err(TableError::BlankField("currency name"));
        }
        if key.code.trim().is_empty() {
            return Err(TableError::BlankField("currency code"));
        }
        if mid <= Decimal::ZERO {
            return Err(TableError::NonPositiveRate {
                code: key.code,
                mid,
            });
        }

        Ok(Self { key, mid })
    }
}
