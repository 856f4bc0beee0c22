//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: The Account entity and its operations
//! - `record`: History records, operation records and sort order
//! - `error`: Error types for the ledger

pub mod account;
pub mod error;
pub mod record;

pub use account::Account;
pub use error::LedgerError;
pub use record::{
    format_money, HistoryRecord, OperationRecord, OperationType, SortOrder, TransactionKind,
    TIMESTAMP_FORMAT,
};
