//! Core traits for account access
//!
//! This module defines the trait abstraction the ledger engine works against,
//! so the engine does not depend on how accounts are held.

use crate::types::{Account, LedgerError};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Trait for looking up and mutating accounts by number
pub trait AccountRepository {
    /// Get a mutable reference to an account, or `AccountNotFound`
    fn account_mut(&mut self, account_number: &str) -> Result<&mut Account, LedgerError>;

    /// Transfer funds between two accounts held by the repository
    fn transfer_between(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        at: NaiveDateTime,
    ) -> Result<(), LedgerError>;

    /// All accounts in their current order
    fn all_accounts(&self) -> &[Account];
}
