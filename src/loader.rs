use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use reqwest::Client;
use rust_decimal::Decimal;

use crate::config::Config;
use crate::error::LoadError;
use crate::exchange_rate::{CurrencyKey, RateEntry};
use crate::rate_table::{RateTable, TableInfo};
use crate::rates_document::ArrayOfExchangeRatesTable;

/// Fetches the daily table, keeping the last good download on disk as a
/// fallback for when the network is unavailable.
pub struct RateTableLoader {
    client: Client,
    url: String,
    cache_path: PathBuf,
    home: CurrencyKey,
}

impl RateTableLoader {
    pub fn new(
        url: impl Into<String>,
        cache_path: impl Into<PathBuf>,
        timeout: Duration,
        home: CurrencyKey,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Can't build HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
            cache_path: cache_path.into(),
            home,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.rates_url.clone(),
            config.cache_path.clone(),
            config.timeout,
            config.home.clone(),
        )
    }

    pub async fn load(&self) -> Result<RateTable, LoadError> {
        let (text, from_cache) = match load_xml(&self.client, &self.url).await {
            Ok(bytes) => {
                if let Err(err) = tokio::fs::write(&self.cache_path, &bytes).await {
                    warn!(
                        "Can't write cache {}: {}",
                        self.cache_path.display(),
                        err
                    );
                } else {
                    debug!("Cached {} bytes to {}", bytes.len(), self.cache_path.display());
                }
                let text = String::from_utf8(bytes)
                    .context("Downloaded table is not valid UTF-8")
                    .map_err(unavailable)?;
                (text, false)
            }
            Err(err) => {
                warn!("Can't download {}: {:#}; using cached table", self.url, err);
                let text = read_cache(&self.cache_path)
                    .await
                    .with_context(|| format!("download failed ({:#})", err))
                    .map_err(unavailable)?;
                (text, true)
            }
        };

        let table = parse_document(&text, self.home.clone()).map_err(unavailable)?;

        if from_cache && let Some(date) = table.info().effective_date {
            warn_if_stale(date, Utc::now().date_naive());
        }
        info!(
            "Loaded {} rates from table {}",
            table.len() - 1,
            table.info().no.as_deref().unwrap_or("?")
        );

        Ok(table)
    }
}

fn unavailable(err: anyhow::Error) -> LoadError {
    LoadError::DataUnavailable {
        reason: format!("{:#}", err),
    }
}

async fn load_xml(client: &Client, url: &str) -> Result<Vec<u8>> {
    debug!("Downloading {}", url);
    let resp = client.get(url).send().await?;
    debug!("{} answered {}", url, resp.status());
    if !resp.status().is_success() {
        anyhow::bail!("Can't download the file: {}", resp.status());
    }

    let bytes = resp.bytes().await?;

    Ok(bytes.to_vec())
}

async fn read_cache(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Can't read cache {}", path.display()))
}

/// Returns the age in days of a table older than `today`, warning about it.
fn warn_if_stale(effective: NaiveDate, today: NaiveDate) -> Option<i64> {
    let age = (today - effective).num_days();
    if age <= 0 {
        return None;
    }

    warn!("Cached table is from {} ({} days old)", effective, age);
    Some(age)
}

/// Parses a table document into a `RateTable` with `home` injected first.
pub fn parse_document(text: &str, home: CurrencyKey) -> Result<RateTable> {
    let doc: ArrayOfExchangeRatesTable =
        quick_xml::de::from_str(text).context("Malformed rate table document")?;
    let table = doc
        .tables
        .into_iter()
        .next()
        .context("Document contains no exchange rate table")?;

    if table.rates.rate.is_empty() {
        anyhow::bail!("Exchange rate table has no rates");
    }

    let mut entries = Vec::with_capacity(table.rates.rate.len());
    for rate in table.rates.rate {
        let mid = Decimal::from_str(&normalize_decimal_string(&rate.mid))
            .with_context(|| format!("Invalid mid rate '{}' for {}", rate.mid, rate.code))?;
        let key = CurrencyKey::new(rate.currency.trim(), rate.code.trim());
        entries.push(RateEntry::new(key, mid)?);
    }

    let info = TableInfo {
        no: table.no.map(|no| no.trim().to_string()),
        effective_date: table.effective_date.and_then(|raw| parse_date(&raw)),
    };

    Ok(RateTable::build(home, entries, info))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("Ignoring effective date '{}': {}", raw, err);
            None
        }
    }
}

fn normalize_decimal_string(s: &str) -> String {
    s.trim().replace(',', ".")
}
