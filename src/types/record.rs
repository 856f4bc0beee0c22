//! History and operation record types for the account ledger
//!
//! This module defines the records appended to an account's history, the
//! operation records read from operation scripts, and the ordering used
//! when sorting a store by balance.

use chrono::NaiveDateTime;
use clap::ValueEnum;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Timestamp layout used in history records and reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render a currency amount with exactly two decimal places
///
/// Half-cents round away from zero.
pub fn format_money(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Kind of balance-changing event recorded in an account's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Funds credited by a deposit
    Deposit,

    /// Funds debited by a withdrawal
    Withdrawal,

    /// Funds debited by a transfer to another account
    TransferOut {
        /// Account number of the receiving account
        to: String,
    },

    /// Funds credited by a transfer from another account
    TransferIn {
        /// Account number of the sending account
        from: String,
    },
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "存入"),
            TransactionKind::Withdrawal => write!(f, "取出"),
            TransactionKind::TransferOut { to } => write!(f, "转账给{}", to),
            TransactionKind::TransferIn { from } => write!(f, "收到{}转账", from),
        }
    }
}

/// One entry of an account's history
///
/// Records are immutable once appended. Rendering follows the
/// `transactions.log` line layout:
///
/// ```text
/// 2025-12-22 10:00 - 存入 $1000.00
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    /// When the event happened (local time, minute precision when rendered)
    pub timestamp: NaiveDateTime,

    /// What happened
    pub kind: TransactionKind,

    /// Magnitude of the balance change (always positive)
    pub amount: Decimal,
}

impl HistoryRecord {
    /// Create a new history record
    pub fn new(timestamp: NaiveDateTime, kind: TransactionKind, amount: Decimal) -> Self {
        HistoryRecord {
            timestamp,
            kind,
            amount,
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ${}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind,
            format_money(self.amount)
        )
    }
}

/// Operation types accepted in operation scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Credit the account
    Deposit,

    /// Debit the account (requires sufficient balance)
    Withdraw,

    /// Move funds from the account to a counterparty
    Transfer,
}

/// A single operation read from an operation script
///
/// `counterparty` is only meaningful (and required) for transfers.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// The operation to perform
    pub op_type: OperationType,

    /// Account the operation applies to (the debited side for transfers)
    pub account: String,

    /// Receiving account for transfers
    pub counterparty: Option<String>,

    /// Operation amount
    pub amount: Decimal,
}

/// Direction for sorting accounts by balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Smallest balance first
    #[value(name = "asc")]
    Ascending,

    /// Largest balance first
    #[value(name = "desc")]
    Descending,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use rstest::rstest;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 22)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[rstest]
    #[case::deposit(TransactionKind::Deposit, Decimal::new(1000, 0), "2025-12-22 10:00 - 存入 $1000.00")]
    #[case::withdrawal(TransactionKind::Withdrawal, Decimal::new(500, 0), "2025-12-22 10:00 - 取出 $500.00")]
    #[case::transfer_out(
        TransactionKind::TransferOut { to: "ACC002".to_string() },
        Decimal::new(2000, 0),
        "2025-12-22 10:00 - 转账给ACC002 $2000.00"
    )]
    #[case::transfer_in(
        TransactionKind::TransferIn { from: "ACC001".to_string() },
        Decimal::new(2000, 0),
        "2025-12-22 10:00 - 收到ACC001转账 $2000.00"
    )]
    #[case::rounds_to_cents(TransactionKind::Deposit, Decimal::new(12345, 3), "2025-12-22 10:00 - 存入 $12.35")]
    fn test_history_record_display(
        #[case] kind: TransactionKind,
        #[case] amount: Decimal,
        #[case] expected: &str,
    ) {
        let record = HistoryRecord::new(at(10, 0), kind, amount);
        assert_eq!(record.to_string(), expected);
    }

    #[rstest]
    #[case(Decimal::new(5000, 0), "5000.00")]
    #[case(Decimal::new(35, 1), "3.50")]
    #[case(Decimal::new(1005, 3), "1.01")]
    #[case(Decimal::new(-25, 1), "-2.50")]
    fn test_format_money(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_money(amount), expected);
    }

    #[test]
    fn test_timestamp_has_minute_precision() {
        let timestamp = at(10, 15).with_second(42).unwrap();
        let record = HistoryRecord::new(timestamp, TransactionKind::Withdrawal, Decimal::ONE);
        assert!(record.to_string().starts_with("2025-12-22 10:15 - "));
    }
}
