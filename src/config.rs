use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::exchange_rate::CurrencyKey;

pub const DEFAULT_RATES_URL: &str = "https://api.nbp.pl/api/exchangerates/tables/a?format=xml";
pub const DEFAULT_CACHE_PATH: &str = "exchange_rate.xml";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HOME_NAME: &str = "polski złoty";
pub const DEFAULT_HOME_CODE: &str = "PLN";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rates_url: String,
    pub cache_path: PathBuf,
    pub timeout: Duration,
    pub home: CurrencyKey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_url: DEFAULT_RATES_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            home: CurrencyKey::new(DEFAULT_HOME_NAME, DEFAULT_HOME_CODE),
        }
    }
}

impl Config {
    /// Reads `KANTOR_*` variables, loading a `.env` file first if there is one.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout = match var("KANTOR_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => defaults.timeout,
        };

        Ok(Self {
            rates_url: var("KANTOR_RATES_URL").unwrap_or(defaults.rates_url),
            cache_path: var("KANTOR_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_path),
            timeout,
            home: CurrencyKey::new(
                var("KANTOR_HOME_NAME").unwrap_or(defaults.home.name),
                var("KANTOR_HOME_CODE").unwrap_or(defaults.home.code),
            ),
        })
    }
}

pub fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid timeout '{}'", raw))?;
    if secs == 0 {
        anyhow::bail!("Timeout must be at least one second");
    }

    Ok(Duration::from_secs(secs))
}
