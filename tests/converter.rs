use kantor::{
    ConversionError, ConversionRequest, CurrencyKey, RateEntry, RateTable, TableInfo, convert, swap,
};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

fn home() -> CurrencyKey {
    CurrencyKey::new("home", "HOME")
}

fn key(code: &str) -> CurrencyKey {
    CurrencyKey::new(format!("currency {}", code), code)
}

fn table_with(rates: &[(&str, Decimal)]) -> RateTable {
    RateTable::build(
        home(),
        rates
            .iter()
            .map(|(code, mid)| RateEntry::new(key(code), *mid).unwrap()),
        TableInfo::default(),
    )
}

fn sample_table() -> RateTable {
    RateTable::build(
        home(),
        vec![
            RateEntry::new(CurrencyKey::new("Euro", "EUR"), dec!(4.30)).unwrap(),
            RateEntry::new(CurrencyKey::new("Dollar", "USD"), dec!(4.00)).unwrap(),
        ],
        TableInfo::default(),
    )
}

#[test]
fn home_to_euro_scenario() {
    let request = ConversionRequest::new(dec!(10), home(), CurrencyKey::new("Euro", "EUR"));
    let result = convert(&sample_table(), &request).unwrap();

    assert_eq!(result.converted_amount, dec!(2.33));
    assert_eq!(result.to_string(), "10.00 HOME = 2.33 EUR");
}

#[test]
fn zero_amount_scenario() {
    let request = ConversionRequest::new(dec!(0), home(), CurrencyKey::new("Euro", "EUR"));
    assert_eq!(
        convert(&sample_table(), &request),
        Err(ConversionError::NonPositiveAmount)
    );
}

#[test]
fn conversions_leave_the_table_untouched() {
    let table = sample_table();
    let before: Vec<RateEntry> = table.entries().to_vec();

    let eur = CurrencyKey::new("Euro", "EUR");
    let _ = convert(&table, &ConversionRequest::new(dec!(-1), home(), eur.clone()));
    let _ = convert(&table, &ConversionRequest::new(dec!(5), key("XYZ"), eur.clone()));
    let _ = convert(&table, &ConversionRequest::new(dec!(5), home(), eur));

    assert_eq!(table.entries(), before.as_slice());
}

/// The selection swap exchanges source and target. The desktop form this
/// replaces re-set each selection to its own value, which left both unchanged;
/// the exchange is the behaviour kept here.
#[test]
fn swap_exchanges_instead_of_leaving_selection_unchanged() {
    let eur = CurrencyKey::new("Euro", "EUR");
    let (from, to) = swap(home(), eur.clone());

    assert_ne!((from.clone(), to.clone()), (home(), eur.clone()));
    assert_eq!((from, to), (eur, home()));
}

#[test]
fn swapped_conversion_inverts_direction() {
    let table = sample_table();
    let (from, to) = swap(home(), CurrencyKey::new("Dollar", "USD"));

    let result = convert(&table, &ConversionRequest::new(dec!(2), from, to)).unwrap();
    assert_eq!(result.to_string(), "2.00 USD = 8.00 HOME");
}

fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000_000).prop_map(|units| Decimal::new(units, 4))
}

fn amount() -> impl Strategy<Value = Decimal> {
    (1i64..=100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn home_rate_is_exactly_one(r1 in rate(), r2 in rate()) {
        let table = table_with(&[("AAA", r1), ("BBB", r2)]);
        prop_assert_eq!(table.get(&home()), Some(Decimal::ONE));
        prop_assert_eq!(table.keys().next(), Some(&home()));
    }

    #[test]
    fn identity_conversion_returns_rounded_amount(
        raw in (1i64..=1_000_000_000).prop_map(|v| Decimal::new(v, 4)),
        r in rate(),
    ) {
        let table = table_with(&[("AAA", r)]);
        for currency in [home(), key("AAA")] {
            let request = ConversionRequest::new(raw, currency.clone(), currency);
            let result = convert(&table, &request).unwrap();
            prop_assert_eq!(result.converted_amount, result.amount);
            prop_assert_eq!(result.amount, raw.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero));
        }
    }

    #[test]
    fn round_trip_recovers_amount(a in amount(), r1 in rate(), r2 in rate()) {
        let table = table_with(&[("AAA", r1), ("BBB", r2)]);

        let there = convert(&table, &ConversionRequest::new(a, key("AAA"), key("BBB"))).unwrap();
        prop_assume!(there.converted_amount > Decimal::ZERO);
        let back = convert(&table, &ConversionRequest::new(there.converted_amount, key("BBB"), key("AAA"))).unwrap();

        // Each leg rounds to half a cent; the first leg's error is scaled by
        // the reverse rate ratio.
        let tolerance = dec!(0.005) * (r2 / r1) + dec!(0.005);
        prop_assert!((back.converted_amount - a).abs() <= tolerance,
            "{} -> {} -> {} (tolerance {})", a, there.converted_amount, back.converted_amount, tolerance);
    }

    #[test]
    fn round_trip_within_a_cent_toward_weaker_currency(a in amount(), x in rate(), y in rate()) {
        // Converting into the currency with the smaller mid rate first keeps
        // the first leg's rounding error from being scaled up on the way back.
        let (strong, weak) = if x >= y { (x, y) } else { (y, x) };
        let table = table_with(&[("AAA", strong), ("BBB", weak)]);

        let there = convert(&table, &ConversionRequest::new(a, key("AAA"), key("BBB"))).unwrap();
        let back = convert(&table, &ConversionRequest::new(there.converted_amount, key("BBB"), key("AAA"))).unwrap();
        prop_assert!((back.converted_amount - a).abs() <= dec!(0.01));
    }

    #[test]
    fn non_positive_amounts_are_rejected(cents in -100_000_000i64..=0) {
        let table = table_with(&[("AAA", dec!(4.3))]);
        let request = ConversionRequest::new(Decimal::new(cents, 2), home(), key("AAA"));
        prop_assert_eq!(convert(&table, &request), Err(ConversionError::NonPositiveAmount));
    }

    #[test]
    fn non_numeric_text_is_invalid(text in "[a-zA-Z ]{0,12}") {
        prop_assert_eq!(
            ConversionRequest::parse(&text, home(), key("AAA")),
            Err(ConversionError::InvalidAmount)
        );
    }

    #[test]
    fn unknown_currency_never_converts(a in amount(), code in "[A-Z]{3}") {
        prop_assume!(code != "AAA");
        let table = table_with(&[("AAA", dec!(4.3))]);
        let missing = CurrencyKey::new("missing", code);

        prop_assert_eq!(
            convert(&table, &ConversionRequest::new(a, missing.clone(), key("AAA"))),
            Err(ConversionError::UnknownCurrency(missing.clone()))
        );
        prop_assert_eq!(
            convert(&table, &ConversionRequest::new(a, home(), missing.clone())),
            Err(ConversionError::UnknownCurrency(missing))
        );
    }
}
