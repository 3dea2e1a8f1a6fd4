//! Ticker universes the collector measures breadth over.
//!
//! Universes come from CSV files under the configured data directory:
//! a crypto ticker list, per-index constituent lists, and per-sector-ETF
//! constituent lists. A missing file is logged and skipped so one absent
//! export never stops collection for the rest.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// A named set of tickers breadth is computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    pub name: String,
    pub tickers: Vec<String>,
}

const ETF_TICKERS: [&str; 11] = [
    "XLB", "XLC", "XLE", "XLF", "XLI", "XLK", "XLP", "XLRE", "XLU", "XLV", "XLY",
];

const INDEX_FILES: [(&str, &str); 4] = [
    ("dji", "idx_dji.csv"),
    ("ndx", "idx_ndx.csv"),
    ("rut", "idx_rut.csv"),
    ("sp500", "idx_sp500.csv"),
];

/// Loads every universe found under `data_dir`.
pub fn load_universes(data_dir: &Path) -> Vec<Universe> {
    let mut universes = Vec::new();

    for (name, filename) in INDEX_FILES {
        let path = data_dir.join("idx_data").join(filename);
        match load_ticker_file(&path, "Ticker") {
            Ok(tickers) => universes.push(Universe {
                name: name.to_owned(),
                tickers,
            }),
            Err(error) => warn!(path = %path.display(), %error, "index data file skipped"),
        }
    }

    let cryptos_path = data_dir.join("polygon_cryptos.csv");
    match load_ticker_file(&cryptos_path, "ticker") {
        Ok(tickers) => universes.push(Universe {
            name: "Cryptos".to_owned(),
            tickers,
        }),
        Err(error) => warn!(path = %cryptos_path.display(), %error, "crypto data file skipped"),
    }

    for etf in ETF_TICKERS {
        let path = data_dir.join("etf_data").join(format!("{etf}.csv"));
        match load_ticker_file(&path, "Ticker") {
            Ok(tickers) => universes.push(Universe {
                name: etf.to_owned(),
                tickers,
            }),
            Err(error) => warn!(path = %path.display(), %error, "ETF data file skipped"),
        }
    }

    universes
}

fn load_ticker_file(path: &Path, column: &str) -> anyhow::Result<Vec<String>> {
    let file = File::open(path)?;
    read_ticker_column(file, column)
}

/// Extracts one named column from CSV data, in row order.
pub fn read_ticker_column<R: Read>(reader: R, column: &str) -> anyhow::Result<Vec<String>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?;
    let index = headers
        .iter()
        .position(|header| header == column)
        .ok_or_else(|| anyhow::anyhow!("CSV is missing a {column:?} column"))?;

    let mut tickers = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if let Some(ticker) = record.get(index) {
            if !ticker.is_empty() {
                tickers.push(ticker.to_owned());
            }
        }
    }
    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_column_in_row_order() {
        let csv = "No.,Ticker,Company\n1,AAPL,Apple\n2,MSFT,Microsoft\n";
        let tickers = read_ticker_column(csv.as_bytes(), "Ticker").expect("column parses");
        assert_eq!(tickers, ["AAPL", "MSFT"]);
    }

    #[test]
    fn lowercase_crypto_column_is_distinct() {
        let csv = "ticker,name\nX:BTCUSD,Bitcoin\nX:ETHUSD,Ethereum\n";
        let tickers = read_ticker_column(csv.as_bytes(), "ticker").expect("column parses");
        assert_eq!(tickers, ["X:BTCUSD", "X:ETHUSD"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "symbol,name\nAAPL,Apple\n";
        let result = read_ticker_column(csv.as_bytes(), "Ticker");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Ticker"));
    }

    #[test]
    fn empty_cells_are_dropped() {
        let csv = "Ticker\nAAPL\n\nMSFT\n";
        let tickers = read_ticker_column(csv.as_bytes(), "Ticker").expect("column parses");
        assert_eq!(tickers, ["AAPL", "MSFT"]);
    }

    #[test]
    fn missing_files_are_skipped_not_fatal() {
        let universes = load_universes(Path::new("/nonexistent/breadth-data"));
        assert!(universes.is_empty());
    }
}
