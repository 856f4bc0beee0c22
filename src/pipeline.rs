//! Ledger run pipeline
//!
//! Orchestrates one session of the ledger:
//! 1. Load accounts from the seed file into an `AccountStore`
//! 2. Apply the operation script (if any) through the `LedgerEngine`
//! 3. Sort the store by balance (if requested)
//! 4. Write the transaction report and optional snapshot
//! 5. Write the CSV balance summary to the given output
//!
//! Malformed records and rejected operations are logged and skipped. Only
//! file-level I/O failures stop the run.

use crate::cli::CliArgs;
use crate::core::{AccountStore, LedgerEngine};
use crate::io::{
    load_accounts, save_accounts, write_balance_summary, write_report_file, OperationReader,
};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Counts gathered over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Accounts in the store after loading
    pub accounts: usize,
    /// Operations applied successfully
    pub applied: usize,
    /// Operations rejected or unparseable
    pub rejected: usize,
}

/// Run the full pipeline described by `args`, writing the summary to `output`
///
/// # Errors
///
/// Returns an error if the seed file, script, report or snapshot cannot be
/// opened or written.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<RunSummary, LedgerError> {
    let store = load_accounts(&args.accounts_file)?;
    let mut summary = RunSummary {
        accounts: store.len(),
        ..RunSummary::default()
    };

    let mut store = match &args.ops_file {
        Some(path) => apply_operations(store, path, &mut summary)?,
        None => store,
    };

    if let Some(order) = args.sort {
        store.sort_by_balance(order);
    }

    write_report_file(&args.log_file, store.accounts(), args.report_mode())?;

    if let Some(path) = &args.snapshot_file {
        save_accounts(path, &store)?;
    }

    write_balance_summary(store.accounts(), output)?;

    log::info!(
        "Run complete: {} accounts, {} operations applied, {} rejected",
        summary.accounts,
        summary.applied,
        summary.rejected
    );
    Ok(summary)
}

fn apply_operations(
    store: AccountStore,
    path: &Path,
    summary: &mut RunSummary,
) -> Result<AccountStore, LedgerError> {
    let reader = OperationReader::open(path)?;
    let mut engine = LedgerEngine::new(store);
    let mut unparsed = 0;

    for result in reader {
        match result {
            Ok(record) => match engine.process(record) {
                Ok(()) => {}
                Err(e @ LedgerError::InsufficientFunds { .. }) => {
                    log::warn!("余额不足，操作失败！{}", e);
                }
                Err(e) => log::warn!("Operation rejected: {}", e),
            },
            Err(e) => {
                log::warn!("Skipping operation record: {}", e);
                unparsed += 1;
            }
        }
    }

    summary.applied = engine.applied();
    summary.rejected = engine.rejected() + unparsed;
    Ok(engine.into_inner())
}
