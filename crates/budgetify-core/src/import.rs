//! Session transaction files
//!
//! Two layouts are accepted:
//! - a JSON array of transaction objects (`id` optional)
//! - a CSV file with the header `type,amount,category,date,description`
//!
//! The first row that fails validation aborts the whole load.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::models::{NewTransaction, Transaction, TransactionId, TransactionType};
use crate::validation::{parse_amount, parse_date, validate_transaction};

const CSV_HEADER: [&str; 5] = ["type", "amount", "category", "date", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFormat {
    Json,
    Csv,
}

impl SessionFormat {
    /// Pick the format from the file extension, falling back to sniffing
    /// the first non-blank character of the content
    pub fn detect(path: &Path, contents: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()) {
            Some(ext) if ext == "json" => Self::Json,
            Some(ext) if ext == "csv" => Self::Csv,
            _ if contents.trim_start().starts_with('[') => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Value of the named column, empty when the column or cell is missing
fn field<'r>(record: &'r StringRecord, columns: &[String], name: &str) -> &'r str {
    columns
        .iter()
        .position(|c| c == name)
        .and_then(|idx| record.get(idx))
        .unwrap_or("")
}

fn row_error(row: usize, err: Error) -> Error {
    Error::Import(format!("row {}: {}", row, err))
}

/// Parse a JSON array of transactions
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let rows: Vec<Transaction> = serde_json::from_reader(reader)?;
    let mut transactions = Vec::with_capacity(rows.len());
    for (i, tx) in rows.into_iter().enumerate() {
        let input = NewTransaction::from(&tx);
        validate_transaction(&input).map_err(|e| row_error(i + 1, e))?;
        // Same normalization as CSV rows, keeping the stored id
        transactions.push(input.into_transaction(tx.id));
    }
    debug!("Parsed {} transactions from JSON", transactions.len());
    Ok(transactions)
}

/// Parse CSV rows into transactions with freshly generated ids
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    for required in &CSV_HEADER[..4] {
        if !columns.iter().any(|c| c == required) {
            return Err(Error::Import(format!(
                "missing column '{}' (expected header: {})",
                required,
                CSV_HEADER.join(",")
            )));
        }
    }

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result?;

        let kind: TransactionType = field(&record, &columns, "type")
            .parse()
            .map_err(|e: String| row_error(row, Error::invalid_field("type", e)))?;
        let amount =
            parse_amount(field(&record, &columns, "amount")).map_err(|e| row_error(row, e))?;
        let date = parse_date(field(&record, &columns, "date")).map_err(|e| row_error(row, e))?;
        let description = Some(field(&record, &columns, "description").to_string())
            .filter(|d| !d.is_empty());

        let input = NewTransaction {
            kind,
            amount,
            category: field(&record, &columns, "category").to_string(),
            date,
            description,
        };
        validate_transaction(&input).map_err(|e| row_error(row, e))?;
        transactions.push(input.into_transaction(TransactionId::new()));
    }

    debug!("Parsed {} transactions from CSV", transactions.len());
    Ok(transactions)
}

/// Read a session file into a ledger
pub fn load_session_file(path: &Path) -> Result<Ledger> {
    let contents = fs::read_to_string(path)?;
    let transactions = match SessionFormat::detect(path, &contents) {
        SessionFormat::Json => parse_json(contents.as_bytes())?,
        SessionFormat::Csv => parse_csv(contents.as_bytes())?,
    };
    Ledger::from_transactions(transactions)
}
