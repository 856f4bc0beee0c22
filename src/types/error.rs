//! Error types for the account ledger
//!
//! This module defines all error types that can occur while operating on
//! accounts, loading seed files and writing reports.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Non-positive amounts, insufficient funds, self-transfers
//! - **Naming Errors**: Holder names the seed format cannot carry
//! - **Lookup Errors**: Unknown or duplicate account numbers
//! - **Parsing Errors**: Malformed seed lines or operation records
//! - **File I/O Errors**: File not found, permission denied, etc.
//!
//! None of these are fatal to the in-memory state: an operation that fails
//! leaves every account exactly as it was.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
///
/// Each variant carries enough context to produce a useful diagnostic line
/// on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Amount is zero or negative
    ///
    /// This is a recoverable error - the operation is rejected.
    #[error("Invalid amount {amount} for account {account}: amount must be positive")]
    InvalidAmount {
        /// Account the operation targeted
        account: String,
        /// The rejected amount
        amount: Decimal,
    },

    /// Insufficient funds for a withdrawal or outgoing transfer
    ///
    /// This is a recoverable error - the account state remains unchanged.
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account being debited
        account: String,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// Transfer whose source and destination share an account number
    ///
    /// This is a recoverable error - neither side is touched.
    #[error("Cannot transfer from account {account} to itself")]
    SelfTransfer {
        /// The account number used on both sides
        account: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// This is a recoverable error - the operation is rejected
    /// to maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account number
        account: String,
    },

    /// No account with the given number exists in the store
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The account number that was looked up
        account: String,
    },

    /// An account with the same number is already present
    #[error("Duplicate account number {account}")]
    DuplicateAccount {
        /// The duplicated account number
        account: String,
    },

    /// Holder name that cannot be stored in a seed line
    ///
    /// Names must be non-empty and free of whitespace.
    #[error("Invalid name '{name}' for account {account}")]
    InvalidName {
        /// Account the name belongs to
        account: String,
        /// The rejected name
        name: String,
    },

    /// A seed line or operation record could not be parsed
    ///
    /// This is a recoverable error - the record is skipped
    /// and loading continues with the next one.
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(account: &str, amount: Decimal) -> Self {
        LedgerError::InvalidAmount {
            account: account.to_string(),
            amount,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account: account.to_string(),
            balance,
            requested,
        }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(account: &str) -> Self {
        LedgerError::SelfTransfer {
            account: account.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        LedgerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(account: &str) -> Self {
        LedgerError::DuplicateAccount {
            account: account.to_string(),
        }
    }

    /// Create an InvalidName error
    pub fn invalid_name(account: &str, name: &str) -> Self {
        LedgerError::InvalidName {
            account: account.to_string(),
            name: name.to_string(),
        }
    }

    /// Create a ParseError tied to a line number
    pub fn parse_error(line: u64, message: impl Into<String>) -> Self {
        LedgerError::ParseError {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Whether a driver should log this error and carry on
    ///
    /// Everything except file-level I/O failures is scoped to a single
    /// operation or record.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LedgerError::FileNotFound { .. } | LedgerError::IoError { .. }
        )
    }
}
