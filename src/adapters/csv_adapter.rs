//! CSV file market data adapter and transaction exporter.
//!
//! Reads `stocks.csv`, `holdings.csv` and `transactions.csv` from a base
//! directory. Column names match the record field names; transaction type
//! and status are upper-case (`BUY`, `COMPLETED`) and trade dates RFC 3339.

use chrono::SecondsFormat;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::error::MockstreetError;
use crate::domain::holding::Holding;
use crate::domain::stock::Stock;
use crate::domain::transaction::Transaction;
use crate::ports::export_port::ExportPort;
use crate::ports::market_data_port::MarketDataPort;

pub const STOCKS_FILE: &str = "stocks.csv";
pub const HOLDINGS_FILE: &str = "holdings.csv";
pub const TRANSACTIONS_FILE: &str = "transactions.csv";

pub const EXPORT_HEADER: [&str; 9] = [
    "Trade ID",
    "Symbol",
    "Type",
    "Quantity",
    "Price",
    "Total Amount",
    "Date",
    "Status",
    "Fees",
];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn read_records<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>, MockstreetError> {
        let path = self.base_path.join(file_name);
        let file = File::open(&path).map_err(|e| MockstreetError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let mut records = Vec::new();
        for (line, result) in rdr.deserialize().enumerate() {
            let record: T = result.map_err(|e| MockstreetError::Data {
                reason: format!("{} row {}: {}", path.display(), line + 1, e),
            })?;
            records.push(record);
        }

        tracing::debug!(path = %path.display(), rows = records.len(), "loaded csv");
        Ok(records)
    }
}

impl MarketDataPort for CsvAdapter {
    fn stocks(&self) -> Result<Vec<Stock>, MockstreetError> {
        self.read_records(STOCKS_FILE)
    }

    fn holdings(&self) -> Result<Vec<Holding>, MockstreetError> {
        self.read_records(HOLDINGS_FILE)
    }

    fn transactions(&self) -> Result<Vec<Transaction>, MockstreetError> {
        self.read_records(TRANSACTIONS_FILE)
    }
}

/// Write the history export format to any writer.
pub fn write_transactions<W: Write>(
    writer: W,
    transactions: &[Transaction],
) -> Result<(), MockstreetError> {
    let to_data_error = |e: csv::Error| MockstreetError::Data {
        reason: format!("CSV write error: {}", e),
    };

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADER).map_err(to_data_error)?;
    for t in transactions {
        wtr.write_record([
            t.trade_id.clone(),
            t.symbol.clone(),
            t.trade_type.to_string(),
            t.qty.to_string(),
            t.price.to_string(),
            t.total_amount.to_string(),
            t.trade_date.to_rfc3339_opts(SecondsFormat::Secs, true),
            t.status.to_string(),
            t.fees.to_string(),
        ])
        .map_err(to_data_error)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes transaction exports as CSV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl ExportPort for CsvExporter {
    fn export_transactions(
        &self,
        transactions: &[Transaction],
        output_path: &Path,
    ) -> Result<(), MockstreetError> {
        let file = File::create(output_path)?;
        write_transactions(file, transactions)?;
        tracing::debug!(
            path = %output_path.display(),
            rows = transactions.len(),
            "exported transactions"
        );
        Ok(())
    }
}
