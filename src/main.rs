use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::error;

use kantor::config::Config;
use kantor::converter::parse_amount;
use kantor::{
    ConversionError, ConversionRequest, CurrencyKey, RateTable, RateTableLoader, convert, swap,
};

#[derive(Parser, Debug)]
#[command(name = "kantor", version, about = "Convert amounts with the daily NBP exchange rate table")]
struct Cli {
    /// Exchange rate table URL
    #[arg(long)]
    url: Option<String>,

    /// File holding the last downloaded table
    #[arg(long)]
    cache: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List currencies in table order
    List,

    /// Convert an amount between two currencies
    Convert {
        #[arg(default_value = "1", allow_hyphen_values = true)]
        amount: String,

        /// Source currency code (defaults to the home currency)
        #[arg(long)]
        from: Option<String>,

        /// Target currency code
        #[arg(long)]
        to: Option<String>,

        /// Exchange source and target before converting
        #[arg(long)]
        swap: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = apply_overrides(Config::from_env()?, &cli);

    let loader = RateTableLoader::from_config(&config)?;
    let table = match loader.load().await {
        Ok(table) => table,
        Err(err) => {
            error!("{}", err);
            return Ok(ExitCode::from(1));
        }
    };

    match cli.command {
        Command::List => {
            list(&table);
            Ok(ExitCode::SUCCESS)
        }
        Command::Convert {
            amount,
            from,
            to,
            swap: swapped,
        } => match run_convert(&table, &amount, from.as_deref(), to.as_deref(), swapped) {
            Ok(line) => {
                println!("{}", line);
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                eprintln!("{}", err);
                Ok(ExitCode::from(2))
            }
        },
    }
}

fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(url) = &cli.url {
        config.rates_url = url.clone();
    }
    if let Some(cache) = &cli.cache {
        config.cache_path = cache.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    config
}

fn list(table: &RateTable) {
    let info = table.info();
    if let Some(no) = &info.no {
        match info.effective_date {
            Some(date) => println!("Table {} ({})", no, date),
            None => println!("Table {}", no),
        }
    }
    for key in table.keys() {
        println!("{}", key);
    }
}

/// Codes missing from the table resolve to a key `convert` will reject.
fn resolve(table: &RateTable, code: &str) -> CurrencyKey {
    table
        .find_by_code(code)
        .cloned()
        .unwrap_or_else(|| CurrencyKey::new("?", code.trim()))
}

/// Initial selection of the conversion form: home currency to the third entry.
fn default_selection(table: &RateTable) -> (CurrencyKey, CurrencyKey) {
    let from = table.home().clone();
    let to = table
        .keys()
        .nth(2)
        .or_else(|| table.keys().last())
        .cloned()
        .unwrap_or_else(|| from.clone());
    (from, to)
}

fn run_convert(
    table: &RateTable,
    amount: &str,
    from: Option<&str>,
    to: Option<&str>,
    swapped: bool,
) -> Result<String, ConversionError> {
    let amount = parse_amount(amount)?;
    let (default_from, default_to) = default_selection(table);
    let from = match from {
        Some(code) => resolve(table, code),
        None => default_from,
    };
    let to = match to {
        Some(code) => resolve(table, code),
        None => default_to,
    };
    let (from, to) = if swapped { swap(from, to) } else { (from, to) };

    let conversion = convert(table, &ConversionRequest::new(amount, from, to))?;
    Ok(conversion.to_string())
}
