use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
pub struct Rate {
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Mid")]
    pub mid: String,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Rates {
    #[serde(rename = "Rate", default)]
    pub rate: Vec<Rate>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ExchangeRatesTable {
    #[serde(rename = "No", default)]
    pub no: Option<String>,
    #[serde(rename = "EffectiveDate", default)]
    pub effective_date: Option<String>,
    #[serde(rename = "Rates", default)]
    pub rates: Rates,
}

/// Root of the table document, e.g.
/// `https://api.nbp.pl/api/exchangerates/tables/a?format=xml`.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ArrayOfExchangeRatesTable {
    #[serde(rename = "ExchangeRatesTable", default)]
    pub tables: Vec<ExchangeRatesTable>,
}
