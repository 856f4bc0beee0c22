//! Operation script reading
//!
//! An operation script is a CSV file listing deposits, withdrawals and
//! transfers to apply to a loaded store:
//!
//! ```text
//! type,account,counterparty,amount
//! deposit,ACC001,,1000
//! withdraw,ACC001,,500
//! transfer,ACC001,ACC002,2000
//! ```
//!
//! `OperationReader` streams the file one record at a time. Records that
//! fail to deserialize or convert are yielded as `ParseError`s carrying the
//! line number, so callers can skip them and carry on.

use crate::io::account_file::open_file;
use crate::types::{LedgerError, OperationRecord, OperationType};
use csv::{Position, ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the script columns: type, account, counterparty, amount.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvOperation {
    #[serde(rename = "type")]
    pub op_type: String,
    pub account: String,
    pub counterparty: Option<String>,
    pub amount: String,
}

/// Convert a CsvOperation to an OperationRecord
///
/// This function:
/// - Parses the operation type (case-insensitive)
/// - Parses the amount into a Decimal
/// - Requires a counterparty for transfers and ignores it otherwise
///
/// Amount sign is not checked here; the account operations own that rule.
pub fn convert_csv_operation(csv_operation: CsvOperation) -> Result<OperationRecord, String> {
    let op_type = match csv_operation.op_type.to_lowercase().as_str() {
        "deposit" => OperationType::Deposit,
        "withdraw" | "withdrawal" => OperationType::Withdraw,
        "transfer" => OperationType::Transfer,
        _ => {
            return Err(format!(
                "Invalid operation type '{}' for account {}",
                csv_operation.op_type, csv_operation.account
            ))
        }
    };

    let amount = Decimal::from_str(csv_operation.amount.trim()).map_err(|_| {
        format!(
            "Invalid amount '{}' for account {}",
            csv_operation.amount, csv_operation.account
        )
    })?;

    let counterparty = csv_operation
        .counterparty
        .filter(|counterparty| !counterparty.trim().is_empty());

    let counterparty = match op_type {
        OperationType::Transfer => {
            if counterparty.is_none() {
                return Err(format!(
                    "Transfer from account {} requires a counterparty",
                    csv_operation.account
                ));
            }
            counterparty
        }
        OperationType::Deposit | OperationType::Withdraw => None,
    };

    Ok(OperationRecord {
        op_type,
        account: csv_operation.account,
        counterparty,
        amount,
    })
}

/// Streaming reader over an operation script
///
/// Line numbers come from the CSV parser, so blank lines and quoted fields
/// spanning several lines are counted.
#[derive(Debug)]
pub struct OperationReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Option<StringRecord>,
    record: StringRecord,
}

impl<R: Read> OperationReader<R> {
    /// Wrap any byte source containing a script (header row required)
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        OperationReader {
            reader,
            headers: None,
            record: StringRecord::new(),
        }
    }
}

impl OperationReader<File> {
    /// Open a script file
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        Ok(OperationReader::from_reader(open_file(path)?))
    }
}

fn csv_parse_error(error: csv::Error) -> LedgerError {
    LedgerError::ParseError {
        line: error.position().map(Position::line),
        message: format!("CSV parse error: {}", error),
    }
}

impl<R: Read> Iterator for OperationReader<R> {
    type Item = Result<OperationRecord, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.headers.is_none() {
            match self.reader.headers() {
                Ok(headers) => self.headers = Some(headers.clone()),
                Err(e) => {
                    // Records can't be matched to columns; let each one fail
                    self.headers = Some(StringRecord::new());
                    return Some(Err(csv_parse_error(e)));
                }
            }
        }

        match self.reader.read_record(&mut self.record) {
            Ok(false) => return None,
            Ok(true) => {}
            Err(e) => return Some(Err(csv_parse_error(e))),
        }

        let position = self.record.position().cloned();
        let result = self
            .record
            .deserialize::<CsvOperation>(self.headers.as_ref())
            .map_err(|e| format!("CSV parse error: {}", e))
            .and_then(convert_csv_operation)
            .map_err(|message| LedgerError::ParseError {
                line: position.as_ref().map(Position::line),
                message,
            });

        Some(result)
    }
}
