//! Account Ledger CLI
//!
//! Loads accounts, applies an optional operation script and writes the
//! transaction report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.txt
//! cargo run -- accounts.txt --ops ops.csv --sort asc > balances.csv
//! cargo run -- accounts.txt --ops ops.csv --log transactions.log --append
//! RUST_LOG=info cargo run -- accounts.txt --snapshot final.txt
//! ```
//!
//! The report goes to `--log` (default `transactions.log`, overwritten unless
//! `--append` is given) and a CSV balance summary goes to stdout. Diagnostics
//! go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (seed file not found, report not writable, etc.)

use account_ledger::cli;
use account_ledger::pipeline;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = pipeline::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
