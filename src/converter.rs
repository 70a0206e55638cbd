use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ConversionError;
use crate::exchange_rate::CurrencyKey;
use crate::rate_table::RateTable;

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub from: CurrencyKey,
    pub to: CurrencyKey,
}

impl ConversionRequest {
    pub fn new(amount: Decimal, from: CurrencyKey, to: CurrencyKey) -> Self {
        Self { amount, from, to }
    }

    /// Builds a request from raw user text such as `"12,50"`.
    pub fn parse(
        amount: &str,
        from: CurrencyKey,
        to: CurrencyKey,
    ) -> Result<Self, ConversionError> {
        Ok(Self::new(parse_amount(amount)?, from, to))
    }

    pub fn from_f64(
        amount: f64,
        from: CurrencyKey,
        to: CurrencyKey,
    ) -> Result<Self, ConversionError> {
        Ok(Self::new(amount_from_f64(amount)?, from, to))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: Decimal,
    pub from_code: String,
    pub converted_amount: Decimal,
    pub to_code: String,
}

/// `10.00 PLN = 2.33 EUR`
impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            self.amount, self.from_code, self.converted_amount, self.to_code
        )
    }
}

pub fn parse_amount(input: &str) -> Result<Decimal, ConversionError> {
    let normalized = input.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| ConversionError::InvalidAmount)
}

pub fn amount_from_f64(amount: f64) -> Result<Decimal, ConversionError> {
    if !amount.is_finite() {
        return Err(ConversionError::InvalidAmount);
    }
    Decimal::try_from(amount).map_err(|_| ConversionError::InvalidAmount)
}

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts `request.amount` from one currency to another through their
/// home-currency mid rates.
///
/// The amount is rounded to two places before conversion and the result is
/// rounded to two places again.
pub fn convert(
    table: &RateTable,
    request: &ConversionRequest,
) -> Result<Conversion, ConversionError> {
    if request.amount <= Decimal::ZERO {
        return Err(ConversionError::NonPositiveAmount);
    }

    let from_rate = table
        .get(&request.from)
        .ok_or_else(|| ConversionError::UnknownCurrency(request.from.clone()))?;
    let to_rate = table
        .get(&request.to)
        .ok_or_else(|| ConversionError::UnknownCurrency(request.to.clone()))?;

    let amount = round2(request.amount);
    let converted = from_rate
        .checked_div(to_rate)
        .and_then(|ratio| ratio.checked_mul(amount))
        .ok_or(ConversionError::InvalidAmount)?;

    Ok(Conversion {
        amount,
        from_code: request.from.code.clone(),
        converted_amount: round2(converted),
        to_code: request.to.code.clone(),
    })
}

/// Exchanges the source and target selections.
pub fn swap<T>(from: T, to: T) -> (T, T) {
    (to, from)
}
