pub mod config;
pub mod converter;
pub mod error;
pub mod exchange_rate;
pub mod loader;
pub mod rate_table;
pub mod rates_document;

pub use converter::{Conversion, ConversionRequest, convert, swap};
pub use error::{ConversionError, LoadError, TableError};
pub use exchange_rate::{CurrencyKey, RateEntry};
pub use loader::RateTableLoader;
pub use rate_table::{RateTable, TableInfo};
