//! Account Ledger Library
//! # Overview
//!
//! This library models bank accounts with deposits, withdrawals, transfers and
//! a per-account transaction history, loads accounts from a plain-text seed
//! file and writes per-account transaction reports.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, HistoryRecord, LedgerError, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::store`] - Ordered account collection with lookup, transfers and sorting
//!   - [`core::engine`] - Applies operation records to a store
//! - [`io`] - Seed file loading, operation scripts and report output
//! - [`pipeline`] - A full load → apply → report run
//!
//! # Account Operations
//!
//! - **Deposit**: Credit a positive amount
//! - **Withdraw**: Debit a positive amount no larger than the balance
//! - **Transfer**: Debit one account and credit another, all or nothing;
//!   transfers to an account with the same number are rejected
//!
//! Every successful operation appends one history record; every failed one
//! leaves balances and histories untouched.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use core::{AccountRepository, AccountStore, LedgerEngine};
pub use io::{load_accounts, write_transaction_report, ReportMode};
pub use types::{
    Account, HistoryRecord, LedgerError, OperationRecord, OperationType, SortOrder,
    TransactionKind,
};
