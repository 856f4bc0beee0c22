//! Account seed file handling
//!
//! Reads and writes the plain-text account list (`accounts.txt`):
//!
//! ```text
//! ACC001 张三 5000
//! ACC002 李四 8000
//! ACC003 王五 3000
//! ```
//!
//! One account per line, three whitespace-separated fields:
//! account number, holder name, balance. There is no header row. Blank lines
//! and lines starting with `#` are ignored.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `load_accounts`
//! - Malformed lines are yielded as `ParseError`s by `AccountReader` and
//!   skipped (with a warning) by the loaders
//! - Lines reusing an account number already loaded are skipped the same way

use crate::core::AccountStore;
use crate::types::account::check_name;
use crate::types::{Account, LedgerError};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use std::str::FromStr;

/// Parse one seed line into an account
///
/// # Errors
///
/// Returns a `ParseError` carrying `line_num` if the line does not have
/// exactly three fields or the balance is not a decimal number.
pub fn parse_account_line(line: &str, line_num: u64) -> Result<Account, LedgerError> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    let [account_number, name, balance] = fields.as_slice() else {
        return Err(LedgerError::parse_error(
            line_num,
            format!("expected 3 fields, found {}", fields.len()),
        ));
    };

    let balance = Decimal::from_str(balance).map_err(|_| {
        LedgerError::parse_error(line_num, format!("invalid balance '{}'", balance))
    })?;

    Ok(Account::new(*account_number, *name, balance))
}

pub(crate) fn open_file(path: &Path) -> Result<File, LedgerError> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LedgerError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LedgerError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        },
    })
}

/// Streaming reader over an account seed source
///
/// Yields one `Result<Account, LedgerError>` per non-blank, non-comment line.
/// Line numbers in errors are 1-based and count every physical line. A line
/// that is not valid UTF-8 is a `ParseError` for that line only.
pub struct AccountReader<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
    line_num: u64,
}

impl<R: BufRead> AccountReader<R> {
    /// Wrap a buffered source
    pub fn new(reader: R) -> Self {
        AccountReader {
            reader,
            buf: Vec::new(),
            line_num: 0,
        }
    }
}

impl AccountReader<BufReader<File>> {
    /// Open a seed file
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path does not exist, `IoError` for anything
    /// else that stops the file from opening.
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        Ok(AccountReader::new(BufReader::new(open_file(path)?)))
    }
}

impl<R: BufRead> Iterator for AccountReader<R> {
    type Item = Result<Account, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_num += 1;

            let Ok(line) = std::str::from_utf8(&self.buf) else {
                return Some(Err(LedgerError::parse_error(
                    self.line_num,
                    "invalid UTF-8",
                )));
            };

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            return Some(parse_account_line(trimmed, self.line_num));
        }
    }
}

/// Load accounts from any buffered source
///
/// Malformed and duplicate lines are logged and skipped; the rest load in
/// file order.
///
/// # Errors
///
/// Only I/O failures while reading abort the load.
pub fn load_accounts_from<R: BufRead>(reader: R) -> Result<AccountStore, LedgerError> {
    let mut store = AccountStore::new();
    let mut skipped = 0usize;

    for result in AccountReader::new(reader) {
        let outcome = result.and_then(|account| store.try_add(account));
        match outcome {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                log::warn!("Skipping account record: {}", e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "Loaded {} accounts ({} records skipped)",
        store.len(),
        skipped
    );
    Ok(store)
}

/// Load accounts from a seed file
pub fn load_accounts(path: &Path) -> Result<AccountStore, LedgerError> {
    load_accounts_from(BufReader::new(open_file(path)?))
}

/// Write accounts in seed-file format
///
/// Balances are written at full precision so the output reloads exactly.
///
/// # Errors
///
/// `InvalidName` if any holder name is empty or contains whitespace; nothing
/// is written in that case. I/O failures are returned as `IoError`.
pub fn write_accounts(accounts: &[Account], output: &mut dyn Write) -> Result<(), LedgerError> {
    check_names(accounts)?;

    for account in accounts {
        writeln!(
            output,
            "{} {} {}",
            account.account_number(),
            account.name(),
            account.balance()
        )?;
    }
    output.flush()?;
    Ok(())
}

fn check_names(accounts: &[Account]) -> Result<(), LedgerError> {
    accounts
        .iter()
        .try_for_each(|account| check_name(account.account_number(), account.name()))
}

/// Write a snapshot of the store to a seed file, replacing it
///
/// An existing file is left alone if any name cannot be written.
pub fn save_accounts(path: &Path, store: &AccountStore) -> Result<(), LedgerError> {
    check_names(store.accounts())?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_accounts(store.accounts(), &mut writer)?;
    log::info!("Wrote {} accounts to {}", store.len(), path.display());
    Ok(())
}
