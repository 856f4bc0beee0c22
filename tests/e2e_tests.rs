//! End-to-end integration tests
//!
//! These tests validate the complete ledger pipeline using predefined
//! fixtures. Each fixture test:
//! 1. Loads accounts.txt from a fixture directory
//! 2. Applies ops.csv (when the fixture has one)
//! 3. Writes the transaction report to a temporary directory
//! 4. Compares the CSV balance summary with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - The deposit / withdraw / transfer walkthrough
//! - A run with no operations
//! - Insufficient funds on withdrawals and transfers
//! - Malformed seed lines, duplicate accounts and bad operation records

#[cfg(test)]
mod tests {
    use account_ledger::cli::CliArgs;
    use account_ledger::pipeline;
    use account_ledger::{load_accounts, write_transaction_report, Account, AccountStore, SortOrder};
    use clap::Parser;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn fixture_dir(fixture_name: &str) -> PathBuf {
        Path::new("tests/fixtures").join(fixture_name)
    }

    /// Build CLI arguments for a fixture, with the report inside `out_dir`
    fn fixture_args(fixture_name: &str, out_dir: &TempDir, extra: &[&str]) -> CliArgs {
        let dir = fixture_dir(fixture_name);
        let accounts_path = dir.join("accounts.txt");
        let ops_path = dir.join("ops.csv");
        let log_path = out_dir.path().join("transactions.log");

        assert!(
            accounts_path.exists(),
            "Accounts file not found: {}",
            accounts_path.display()
        );

        let mut argv = vec![
            "ledger".to_string(),
            accounts_path.display().to_string(),
            "--log".to_string(),
            log_path.display().to_string(),
        ];
        if ops_path.exists() {
            argv.push("--ops".to_string());
            argv.push(ops_path.display().to_string());
        }
        argv.extend(extra.iter().map(|s| s.to_string()));

        CliArgs::try_parse_from(argv).expect("Fixture arguments should parse")
    }

    /// Run a fixture and compare the balance summary with expected.csv
    fn run_test_fixture(fixture_name: &str) {
        let out_dir = TempDir::new().expect("Failed to create temp dir");
        let args = fixture_args(fixture_name, &out_dir, &[]);
        let expected_path = fixture_dir(fixture_name).join("expected.csv");

        let mut output = Vec::new();
        pipeline::run(&args, &mut output)
            .unwrap_or_else(|e| panic!("Failed to run fixture {}: {}", fixture_name, e));

        let actual_output = String::from_utf8(output).expect("Summary should be UTF-8");
        let expected_output = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
            panic!(
                "Failed to read expected file {}: {}",
                expected_path.display(),
                e
            )
        });

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("walkthrough")]
    #[case("seed_only")]
    #[case("insufficient_funds")]
    #[case("malformed_data")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }

    #[test]
    fn test_walkthrough_report_contents() {
        let out_dir = TempDir::new().unwrap();
        let args = fixture_args("walkthrough", &out_dir, &[]);

        pipeline::run(&args, &mut Vec::new()).unwrap();

        let report = fs::read_to_string(out_dir.path().join("transactions.log")).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "账户：ACC001 (张三)");
        assert_eq!(lines[1], "余额：$3500.00");
        assert_eq!(lines[2], "交易记录：");
        assert!(lines[3].ends_with(" - 存入 $1000.00"));
        assert!(lines[4].ends_with(" - 取出 $500.00"));
        assert!(lines[5].ends_with(" - 转账给ACC002 $2000.00"));
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "账户：ACC002 (李四)");
        assert_eq!(lines[8], "余额：$10000.00");
        assert!(lines[10].ends_with(" - 收到ACC001转账 $2000.00"));
        assert!(report.ends_with("账户：ACC003 (王五)\n余额：$3000.00\n交易记录：\n"));
    }

    #[rstest]
    #[case::ascending("asc", &["ACC003", "ACC001", "ACC002"])]
    #[case::descending("desc", &["ACC002", "ACC001", "ACC003"])]
    fn test_sorted_seed_summary(#[case] order: &str, #[case] expected: &[&str]) {
        let out_dir = TempDir::new().unwrap();
        let args = fixture_args("seed_only", &out_dir, &["--sort", order]);
        let mut output = Vec::new();

        pipeline::run(&args, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let numbers: Vec<&str> = text
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').next())
            .collect();
        assert_eq!(numbers, expected);
    }

    #[test]
    fn test_append_mode_accumulates_runs() {
        let out_dir = TempDir::new().unwrap();
        let args = fixture_args("seed_only", &out_dir, &["--append"]);

        pipeline::run(&args, &mut Vec::new()).unwrap();
        pipeline::run(&args, &mut Vec::new()).unwrap();

        let report = fs::read_to_string(out_dir.path().join("transactions.log")).unwrap();
        assert_eq!(report.matches("账户：ACC001 (张三)").count(), 2);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let out_dir = TempDir::new().unwrap();
        let snapshot = out_dir.path().join("final.txt");
        let args = fixture_args(
            "walkthrough",
            &out_dir,
            &["--snapshot", &snapshot.display().to_string()],
        );

        pipeline::run(&args, &mut Vec::new()).unwrap();
        let store = load_accounts(&snapshot).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(
            store.find("ACC001").map(Account::balance),
            Some(Decimal::new(3500, 0))
        );
        assert_eq!(
            store.find("ACC002").map(Account::balance),
            Some(Decimal::new(10000, 0))
        );
    }

    #[test]
    fn test_library_walkthrough() {
        let mut store: AccountStore = load_accounts(&fixture_dir("walkthrough").join("accounts.txt")).unwrap();

        assert_eq!(store.find("ACC002").unwrap().name(), "李四");
        assert!(store.find("ACC999").is_none());

        let acc1 = store.find_mut("ACC001").unwrap();
        acc1.deposit(Decimal::new(1000, 0)).unwrap();
        acc1.withdraw(Decimal::new(500, 0)).unwrap();
        store
            .transfer("ACC001", "ACC002", Decimal::new(2000, 0))
            .unwrap();

        let mut report = Vec::new();
        write_transaction_report(&mut report, store.find("ACC001").unwrap()).unwrap();
        let report = String::from_utf8(report).unwrap();
        assert_eq!(report.lines().count(), 6);

        store.sort_by_balance(SortOrder::Ascending);
        let numbers: Vec<&str> = store.iter().map(Account::account_number).collect();
        assert_eq!(numbers, vec!["ACC003", "ACC001", "ACC002"]);
    }
}
