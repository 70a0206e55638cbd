use std::collections::HashMap;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use crate::exchange_rate::{CurrencyKey, RateEntry};

/// Identification of the published table a `RateTable` was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInfo {
    pub no: Option<String>,
    pub effective_date: Option<NaiveDate>,
}

/// Mid rates keyed by currency, in insertion order with the home currency first.
///
/// Built once per load and never mutated afterwards; conversions borrow it.
#[derive(Debug, Clone)]
pub struct RateTable {
    entries: Vec<RateEntry>,
    index: HashMap<CurrencyKey, usize>,
    info: TableInfo,
}

impl RateTable {
    /// Builds a table with `home` at rate 1 followed by `entries` in order.
    ///
    /// A repeated key keeps its first position and takes the later rate.
    /// Entries repeating the home key are dropped.
    pub fn build(
        home: CurrencyKey,
        entries: impl IntoIterator<Item = RateEntry>,
        info: TableInfo,
    ) -> Self {
        let mut table = Self {
            entries: vec![RateEntry {
                key: home.clone(),
                mid: Decimal::ONE,
            }],
            index: HashMap::from([(home, 0)]),
            info,
        };

        for entry in entries {
            match table.index.get(&entry.key).copied() {
                Some(0) => warn!("Ignoring rate {} for home currency {}", entry.mid, entry.key),
                Some(pos) => table.entries[pos].mid = entry.mid,
                None => {
                    table.index.insert(entry.key.clone(), table.entries.len());
                    table.entries.push(entry);
                }
            }
        }

        table
    }

    pub fn home(&self) -> &CurrencyKey {
        &self.entries[0].key
    }

    pub fn get(&self, key: &CurrencyKey) -> Option<Decimal> {
        self.index.get(key).map(|&pos| self.entries[pos].mid)
    }

    pub fn contains(&self, key: &CurrencyKey) -> bool {
        self.index.contains_key(key)
    }

    /// Currency keys in table order. The iterator is cheap to clone and can be
    /// restarted by calling `keys` again.
    pub fn keys(&self) -> impl Iterator<Item = &CurrencyKey> + Clone {
        self.entries.iter().map(|entry| &entry.key)
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    /// Case-insensitive lookup of the first key with the given code.
    pub fn find_by_code(&self, code: &str) -> Option<&CurrencyKey> {
        let code = code.trim();
        self.keys().find(|key| key.code.eq_ignore_ascii_case(code))
    }

    pub fn info(&self) -> &TableInfo {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the home entry is present in every table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
