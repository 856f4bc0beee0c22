//! Report output
//!
//! Writes the per-account transaction report (`transactions.log`) and the
//! CSV balance summary printed at the end of a run.
//!
//! A report block looks like:
//!
//! ```text
//! 账户：ACC001 (张三)
//! 余额：$3500.00
//! 交易记录：
//! 2025-12-22 10:00 - 存入 $1000.00
//! 2025-12-22 10:15 - 取出 $500.00
//! 2025-12-22 10:30 - 转账给ACC002 $2000.00
//! ```
//!
//! Nothing in this module mutates an account.

use crate::types::{format_money, Account, LedgerError};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// What to do with an existing report file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Truncate the file and write this run's report only
    #[default]
    Overwrite,

    /// Keep earlier runs and add this run's blocks at the end
    Append,
}

/// Write one account's report block
pub fn write_transaction_report(
    output: &mut dyn Write,
    account: &Account,
) -> Result<(), LedgerError> {
    writeln!(
        output,
        "账户：{} ({})",
        account.account_number(),
        account.name()
    )?;
    writeln!(output, "余额：${}", format_money(account.balance()))?;
    writeln!(output, "交易记录：")?;
    for record in account.history() {
        writeln!(output, "{}", record)?;
    }
    Ok(())
}

/// Write report blocks for every account, separated by blank lines
pub fn write_transaction_reports(
    output: &mut dyn Write,
    accounts: &[Account],
) -> Result<(), LedgerError> {
    for (i, account) in accounts.iter().enumerate() {
        if i > 0 {
            writeln!(output)?;
        }
        write_transaction_report(output, account)?;
    }
    output.flush()?;
    Ok(())
}

/// Write the report for `accounts` to a file
///
/// The file is created if missing. The handle is closed before returning,
/// whether or not writing succeeded.
pub fn write_report_file(
    path: &Path,
    accounts: &[Account],
    mode: ReportMode,
) -> Result<(), LedgerError> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        ReportMode::Overwrite => options.write(true).truncate(true),
        ReportMode::Append => options.append(true),
    };

    let file = options.open(path).map_err(|e| LedgerError::IoError {
        message: format!("Failed to open report '{}': {}", path.display(), e),
    })?;
    let mut writer = BufWriter::new(file);

    if mode == ReportMode::Append && path.metadata()?.len() > 0 {
        writeln!(writer)?;
    }
    write_transaction_reports(&mut writer, accounts)?;

    log::info!(
        "Wrote transaction report for {} accounts to {}",
        accounts.len(),
        path.display()
    );
    Ok(())
}

/// Row of the CSV balance summary
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    account: &'a str,
    name: &'a str,
    balance: String,
    transactions: usize,
}

/// Write account balances as CSV
///
/// Columns: account, name, balance, transactions. Accounts are written in the
/// order given (sort the store first for a sorted summary).
pub fn write_balance_summary(
    accounts: &[Account],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    for account in accounts {
        writer.serialize(SummaryRow {
            account: account.account_number(),
            name: account.name(),
            balance: format_money(account.balance()),
            transactions: account.history().len(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::tempdir;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 22)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn sample_accounts() -> Vec<Account> {
        let mut acc1 = Account::new("ACC001", "张三", dec(5000));
        let mut acc2 = Account::new("ACC002", "李四", dec(8000));
        acc1.deposit_at(dec(1000), at(10, 0)).unwrap();
        acc1.withdraw_at(dec(500), at(10, 15)).unwrap();
        acc1.transfer_at(&mut acc2, dec(2000), at(10, 30)).unwrap();
        vec![acc1, acc2]
    }

    #[test]
    fn test_single_account_report_block() {
        let accounts = sample_accounts();
        let mut output = Vec::new();

        write_transaction_report(&mut output, &accounts[0]).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "账户：ACC001 (张三)\n\
             余额：$3500.00\n\
             交易记录：\n\
             2025-12-22 10:00 - 存入 $1000.00\n\
             2025-12-22 10:15 - 取出 $500.00\n\
             2025-12-22 10:30 - 转账给ACC002 $2000.00\n"
        );
    }

    #[test]
    fn test_report_for_account_without_history() {
        let account = Account::new("ACC003", "王五", Decimal::new(30005, 1));
        let mut output = Vec::new();

        write_transaction_report(&mut output, &account).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "账户：ACC003 (王五)\n余额：$3000.50\n交易记录：\n"
        );
    }

    #[test]
    fn test_writing_report_does_not_alter_account() {
        let accounts = sample_accounts();
        let before = format!("{:?}", accounts[0]);

        write_transaction_report(&mut Vec::new(), &accounts[0]).unwrap();

        assert_eq!(format!("{:?}", accounts[0]), before);
    }

    #[test]
    fn test_reports_are_separated_by_blank_line() {
        let accounts = sample_accounts();
        let mut output = Vec::new();

        write_transaction_reports(&mut output, &accounts).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("转账给ACC002 $2000.00\n\n账户：ACC002 (李四)\n"));
        assert!(text.ends_with("2025-12-22 10:30 - 收到ACC001转账 $2000.00\n"));
    }

    #[test]
    fn test_report_file_overwrite_replaces_previous_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.log");
        let accounts = sample_accounts();

        write_report_file(&path, &accounts, ReportMode::Overwrite).unwrap();
        write_report_file(&path, &accounts[..1], ReportMode::Overwrite).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("账户：").count(), 1);
    }

    #[test]
    fn test_report_file_append_keeps_previous_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transactions.log");
        let accounts = sample_accounts();

        write_report_file(&path, &accounts[..1], ReportMode::Append).unwrap();
        write_report_file(&path, &accounts[..1], ReportMode::Append).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("账户：ACC001").count(), 2);
        assert!(!text.starts_with('\n'));
        assert!(text.contains("$2000.00\n\n账户：ACC001"));
    }

    #[test]
    fn test_report_file_in_missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("transactions.log");

        let result = write_report_file(&path, &sample_accounts(), ReportMode::Overwrite);

        assert!(matches!(result, Err(LedgerError::IoError { .. })));
    }

    #[test]
    fn test_balance_summary_csv() {
        let accounts = sample_accounts();
        let mut output = Vec::new();

        write_balance_summary(&accounts, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,name,balance,transactions\n\
             ACC001,张三,3500.00,3\n\
             ACC002,李四,10000.00,1\n"
        );
    }
}
