//! Ledger engine
//!
//! This module provides the LedgerEngine that applies operation records
//! (deposits, withdrawals and transfers) to the accounts held by an
//! [`AccountRepository`].
//!
//! The engine enforces:
//! - Accounts must exist before they can be operated on
//! - Transfers name a counterparty
//! - Account-level rules (positive amounts, sufficient funds, no self-transfer)
//!   via the Account operations themselves

use crate::core::traits::AccountRepository;
use crate::types::{Account, LedgerError, OperationRecord, OperationType};
use chrono::{Local, NaiveDateTime};

/// Applies operation records to a repository of accounts
///
/// Failed operations leave every account unchanged and are reported back to
/// the caller; the engine keeps counts of both outcomes.
pub struct LedgerEngine<R: AccountRepository> {
    repository: R,
    applied: usize,
    rejected: usize,
}

impl<R: AccountRepository> LedgerEngine<R> {
    /// Create an engine over the given repository
    pub fn new(repository: R) -> Self {
        LedgerEngine {
            repository,
            applied: 0,
            rejected: 0,
        }
    }

    /// Apply a single operation, stamped with the current local time
    pub fn process(&mut self, record: OperationRecord) -> Result<(), LedgerError> {
        self.process_at(record, Local::now().naive_local())
    }

    /// Apply a single operation with an explicit timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account (or transfer counterparty) does not exist
    /// - A transfer has no counterparty
    /// - The account operation fails (invalid amount, insufficient funds, etc.)
    pub fn process_at(
        &mut self,
        record: OperationRecord,
        at: NaiveDateTime,
    ) -> Result<(), LedgerError> {
        let result = match record.op_type {
            OperationType::Deposit => self
                .repository
                .account_mut(&record.account)
                .and_then(|account| account.deposit_at(record.amount, at)),
            OperationType::Withdraw => self
                .repository
                .account_mut(&record.account)
                .and_then(|account| account.withdraw_at(record.amount, at)),
            OperationType::Transfer => self.process_transfer(&record, at),
        };

        match &result {
            Ok(()) => {
                self.applied += 1;
                log::debug!(
                    "Applied {:?} of {} on account {}",
                    record.op_type,
                    record.amount,
                    record.account
                );
            }
            Err(_) => self.rejected += 1,
        }

        result
    }

    fn process_transfer(
        &mut self,
        record: &OperationRecord,
        at: NaiveDateTime,
    ) -> Result<(), LedgerError> {
        let counterparty = record.counterparty.as_deref().ok_or_else(|| {
            LedgerError::ParseError {
                line: None,
                message: format!(
                    "transfer from account {} requires a counterparty",
                    record.account
                ),
            }
        })?;

        self.repository
            .transfer_between(&record.account, counterparty, record.amount, at)
    }

    /// Accounts in the repository's current order
    pub fn accounts(&self) -> &[Account] {
        self.repository.all_accounts()
    }

    /// Number of operations applied successfully
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Number of operations rejected
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Give the repository back
    pub fn into_inner(self) -> R {
        self.repository
    }
}
