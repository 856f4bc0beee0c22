//! Account store module
//!
//! This module provides the `AccountStore`, an ordered collection that owns
//! every account loaded for a session.
//!
//! The AccountStore is responsible for:
//! - Keeping accounts in insertion order (the order of the seed file)
//! - Looking accounts up by account number, handing out mutable references
//!   so operations performed through the store persist
//! - Moving funds between two accounts it owns
//! - Sorting accounts by balance for reporting

use crate::core::traits::AccountRepository;
use crate::types::{Account, LedgerError, SortOrder};
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;

/// Ordered collection of accounts
///
/// Lookups are linear scans returning the first match. `add` does not check
/// for duplicate account numbers; use `try_add` where uniqueness matters.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: Vec<Account>,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        AccountStore {
            accounts: Vec::new(),
        }
    }

    /// Create a store from existing accounts, keeping their order
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        AccountStore { accounts }
    }

    /// Append an account
    ///
    /// Duplicates are accepted as-is; `find` will then only ever return the
    /// first of them.
    pub fn add(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Append an account unless its number is already taken
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` and leaves the store unchanged if an account
    /// with the same number exists.
    pub fn try_add(&mut self, account: Account) -> Result<(), LedgerError> {
        if self.contains(account.account_number()) {
            return Err(LedgerError::duplicate_account(account.account_number()));
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Find the first account with the given number
    pub fn find(&self, account_number: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|account| account.account_number() == account_number)
    }

    /// Find the first account with the given number, mutably
    pub fn find_mut(&mut self, account_number: &str) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.account_number() == account_number)
    }

    /// Like `find_mut`, but a miss is an `AccountNotFound` error
    pub fn get_mut(&mut self, account_number: &str) -> Result<&mut Account, LedgerError> {
        self.find_mut(account_number)
            .ok_or_else(|| LedgerError::account_not_found(account_number))
    }

    /// Whether an account with the given number exists
    pub fn contains(&self, account_number: &str) -> bool {
        self.find(account_number).is_some()
    }

    /// Sort accounts by balance
    ///
    /// The sort is stable in both directions: accounts with equal balances
    /// keep their relative order.
    pub fn sort_by_balance(&mut self, order: SortOrder) {
        match order {
            SortOrder::Ascending => self.accounts.sort_by(|a, b| a.balance().cmp(&b.balance())),
            SortOrder::Descending => {
                self.accounts.sort_by(|a, b| b.balance().cmp(&a.balance()))
            }
        }
    }

    /// Transfer funds between two accounts in the store, stamped now
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        self.transfer_at(from, to, amount, Local::now().naive_local())
    }

    /// Transfer funds between two accounts in the store
    ///
    /// # Errors
    ///
    /// - `SelfTransfer` if `from == to` (checked before any lookup)
    /// - `AccountNotFound` if either account is missing
    /// - Any error from [`Account::transfer_at`]
    pub fn transfer_at(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        at: NaiveDateTime,
    ) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::self_transfer(from));
        }

        let from_idx = self
            .position(from)
            .ok_or_else(|| LedgerError::account_not_found(from))?;
        let to_idx = self
            .position(to)
            .ok_or_else(|| LedgerError::account_not_found(to))?;

        // Distinct numbers imply distinct indices
        let (source, target) = if from_idx < to_idx {
            let (left, right) = self.accounts.split_at_mut(to_idx);
            (&mut left[from_idx], &mut right[0])
        } else {
            let (left, right) = self.accounts.split_at_mut(from_idx);
            (&mut right[0], &mut left[to_idx])
        };

        source.transfer_at(target, amount, at)
    }

    /// Iterate over accounts in store order
    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    /// All accounts in store order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn position(&self, account_number: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|account| account.account_number() == account_number)
    }
}

impl AccountRepository for AccountStore {
    fn account_mut(&mut self, account_number: &str) -> Result<&mut Account, LedgerError> {
        self.get_mut(account_number)
    }

    fn transfer_between(
        &mut self,
        from: &str,
        to: &str,
        amount: Decimal,
        at: NaiveDateTime,
    ) -> Result<(), LedgerError> {
        self.transfer_at(from, to, amount, at)
    }

    fn all_accounts(&self) -> &[Account] {
        self.accounts()
    }
}

impl IntoIterator for AccountStore {
    type Item = Account;
    type IntoIter = std::vec::IntoIter<Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.into_iter()
    }
}

impl<'a> IntoIterator for &'a AccountStore {
    type Item = &'a Account;
    type IntoIter = std::slice::Iter<'a, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.accounts.iter()
    }
}

impl FromIterator<Account> for AccountStore {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        AccountStore::with_accounts(iter.into_iter().collect())
    }
}
