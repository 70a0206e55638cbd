use rust_decimal::Decimal;
use thiserror::Error;

use crate::exchange_rate::CurrencyKey;

/// The rate table could not be built from either the remote source or the cache.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Exchange rate data unavailable: {reason}")]
    DataUnavailable { reason: String },
}

/// Recoverable validation failures of a single conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Please enter an amount greater than 0")]
    NonPositiveAmount,

    #[error("Unknown currency: {0}")]
    UnknownCurrency(CurrencyKey),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Mid rate for {code} must be greater than 0, got {mid}")]
    NonPositiveRate { code: String, mid: Decimal },

    #[error("Rate record has a blank {0}")]
    BlankField(&'static str),
}
