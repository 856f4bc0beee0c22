use crate::io::ReportMode;
use crate::types::SortOrder;
use clap::Parser;
use std::path::PathBuf;

/// Load accounts, apply operations and write a transaction report
#[derive(Parser, Debug)]
#[command(name = "ledger")]
#[command(about = "Load accounts, apply operations and write a transaction report", long_about = None)]
pub struct CliArgs {
    /// Account seed file (`<account> <name> <balance>` per line)
    #[arg(
        value_name = "ACCOUNTS",
        default_value = "accounts.txt",
        help = "Path to the account seed file"
    )]
    pub accounts_file: PathBuf,

    /// Operation script to apply after loading
    #[arg(
        long = "ops",
        value_name = "PATH",
        help = "CSV operation script (type,account,counterparty,amount)"
    )]
    pub ops_file: Option<PathBuf>,

    /// Transaction report destination
    #[arg(
        long = "log",
        value_name = "PATH",
        default_value = "transactions.log",
        help = "Path of the transaction report"
    )]
    pub log_file: PathBuf,

    /// Append to the report instead of overwriting it
    #[arg(long = "append", help = "Append to an existing report instead of overwriting it")]
    pub append: bool,

    /// Balance ordering for the report and summary
    #[arg(
        long = "sort",
        value_name = "ORDER",
        help = "Sort accounts by balance before reporting: 'asc' or 'desc'"
    )]
    pub sort: Option<SortOrder>,

    /// Where to write the final account state
    #[arg(
        long = "snapshot",
        value_name = "PATH",
        help = "Write final balances back out in seed-file format"
    )]
    pub snapshot_file: Option<PathBuf>,
}

impl CliArgs {
    /// Report write mode selected by `--append`
    pub fn report_mode(&self) -> ReportMode {
        if self.append {
            ReportMode::Append
        } else {
            ReportMode::Overwrite
        }
    }
}
