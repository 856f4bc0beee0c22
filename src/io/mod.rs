//! I/O module
//!
//! Handles reading seed data and operation scripts, and writing reports.
//!
//! # Components
//!
//! - `account_file` - `accounts.txt` reading, loading and snapshots
//! - `operations` - CSV operation script reader
//! - `report` - `transactions.log` report and CSV balance summary

pub mod account_file;
pub mod operations;
pub mod report;

pub use account_file::{load_accounts, load_accounts_from, save_accounts, AccountReader};
pub use operations::OperationReader;
pub use report::{
    write_balance_summary, write_report_file, write_transaction_report, ReportMode,
};
