//! Account type for the account ledger
//!
//! This module defines the Account structure: an identified, named balance
//! with an append-only history of every balance-changing event.
//!
//! # Invariants
//!
//! - `balance == initial + deposits - withdrawals - transfers out + transfers in`
//! - Every successful balance change appends exactly one history record
//! - A failed operation changes neither the balance nor the history
//!
//! # Copy Semantics
//!
//! `Account` owns its history as a `Vec`, so `clone()` produces a fully
//! independent copy and `clone_from()` replaces the destination's history
//! rather than extending it.

use super::error::LedgerError;
use super::record::{HistoryRecord, TransactionKind};
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, Sub};

/// A bank account with balance and transaction history
///
/// Equality compares account numbers only; two accounts with the same number
/// but different balances are equal.
#[derive(Debug, Clone)]
pub struct Account {
    /// Opaque account identifier, immutable after creation
    account_number: String,

    /// Display name of the holder
    name: String,

    /// Current balance
    ///
    /// May start negative if the seed data says so; no operation will push it
    /// below zero.
    balance: Decimal,

    /// Balance-changing events in chronological order
    history: Vec<HistoryRecord>,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Reject holder names a whitespace-separated seed line cannot carry
pub(crate) fn check_name(account_number: &str, name: &str) -> Result<(), LedgerError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(LedgerError::invalid_name(account_number, name));
    }
    Ok(())
}

impl Account {
    /// Create a new account with an empty history
    ///
    /// `initial_balance` is taken as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use account_ledger::Account;
    /// use rust_decimal::Decimal;
    ///
    /// let account = Account::new("ACC001", "张三", Decimal::new(5000, 0));
    /// assert_eq!(account.to_string(), "ACC001 (张三): $5000");
    /// assert!(account.history().is_empty());
    /// ```
    pub fn new(
        account_number: impl Into<String>,
        name: impl Into<String>,
        initial_balance: Decimal,
    ) -> Self {
        Account {
            account_number: account_number.into(),
            name: name.into(),
            balance: initial_balance,
            history: Vec::new(),
        }
    }

    /// The account number
    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    /// The holder's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// History records, oldest first
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Change the holder's display name
    ///
    /// # Errors
    ///
    /// `InvalidName` if the name is empty or contains whitespace, since it
    /// could not be written back to a seed line. The old name is kept.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), LedgerError> {
        let name = name.into();
        check_name(&self.account_number, &name)?;
        self.name = name;
        Ok(())
    }

    /// Deposit funds, stamped with the current local time
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `ArithmeticOverflow` if the balance cannot hold the result
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        self.deposit_at(amount, now())
    }

    /// Deposit funds with an explicit timestamp
    ///
    /// Increases the balance by `amount` and appends a `存入` record.
    pub fn deposit_at(&mut self, amount: Decimal, at: NaiveDateTime) -> Result<(), LedgerError> {
        self.validate_amount(amount)?;
        self.balance = self.credited(amount, "deposit")?;
        self.history
            .push(HistoryRecord::new(at, TransactionKind::Deposit, amount));
        Ok(())
    }

    /// Withdraw funds, stamped with the current local time
    ///
    /// Nothing is printed here. On `InsufficientFunds` the account is left
    /// untouched and the caller is responsible for showing the `余额不足`
    /// notice to the user (the pipeline logs it as a warning).
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount` exceeds the balance
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        self.withdraw_at(amount, now())
    }

    /// Withdraw funds with an explicit timestamp
    ///
    /// Decreases the balance by `amount` and appends a `取出` record.
    pub fn withdraw_at(&mut self, amount: Decimal, at: NaiveDateTime) -> Result<(), LedgerError> {
        self.validate_amount(amount)?;
        self.balance = self.debited(amount)?;
        self.history
            .push(HistoryRecord::new(at, TransactionKind::Withdrawal, amount));
        Ok(())
    }

    /// Transfer funds to another account, stamped with the current local time
    ///
    /// # Errors
    ///
    /// - `SelfTransfer` if `other` has the same account number
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount` exceeds this account's balance
    /// - `ArithmeticOverflow` if `other` cannot hold the credit
    pub fn transfer(&mut self, other: &mut Account, amount: Decimal) -> Result<(), LedgerError> {
        self.transfer_at(other, amount, now())
    }

    /// Transfer funds to another account with an explicit timestamp
    ///
    /// Both new balances are computed before either account is touched, so
    /// the debit and credit happen together or not at all. Transfers between
    /// two accounts carrying the same number are rejected, which also covers
    /// a copy of an account being used as its own counterparty.
    pub fn transfer_at(
        &mut self,
        other: &mut Account,
        amount: Decimal,
        at: NaiveDateTime,
    ) -> Result<(), LedgerError> {
        if self == other {
            return Err(LedgerError::self_transfer(&self.account_number));
        }
        self.validate_amount(amount)?;

        let new_balance = self.debited(amount)?;
        let other_balance = other.credited(amount, "transfer")?;

        self.balance = new_balance;
        self.history.push(HistoryRecord::new(
            at,
            TransactionKind::TransferOut {
                to: other.account_number.clone(),
            },
            amount,
        ));

        other.balance = other_balance;
        other.history.push(HistoryRecord::new(
            at,
            TransactionKind::TransferIn {
                from: self.account_number.clone(),
            },
            amount,
        ));

        Ok(())
    }

    /// Render the history one record per line
    pub fn show_transaction_history(&self) -> String {
        self.history
            .iter()
            .map(|record| format!("{}\n", record))
            .collect()
    }

    fn validate_amount(&self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(&self.account_number, amount));
        }
        Ok(())
    }

    fn credited(&self, amount: Decimal, operation: &str) -> Result<Decimal, LedgerError> {
        self.balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow(operation, &self.account_number))
    }

    fn debited(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        if self.balance < amount {
            return Err(LedgerError::insufficient_funds(
                &self.account_number,
                self.balance,
                amount,
            ));
        }
        // amount <= balance, so this cannot underflow
        Ok(self.balance - amount)
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.account_number == other.account_number
    }
}

impl Eq for Account {}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): ${}", self.account_number, self.name, self.balance)
    }
}

/// `account + amount` deposits and hands the account back
impl Add<Decimal> for Account {
    type Output = Result<Account, LedgerError>;

    fn add(mut self, amount: Decimal) -> Self::Output {
        self.deposit(amount)?;
        Ok(self)
    }
}

/// `account - amount` withdraws and hands the account back
impl Sub<Decimal> for Account {
    type Output = Result<Account, LedgerError>;

    fn sub(mut self, amount: Decimal) -> Self::Output {
        self.withdraw(amount)?;
        Ok(self)
    }
}
