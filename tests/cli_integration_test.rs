//! CLI integration tests: each command run against a journal file on disk.

mod common;

use clap::Parser;
use common::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tradejournal::cli::{self, Cli};

fn run(args: &[&str]) -> ExitCode {
    let mut argv = vec!["tradejournal"];
    argv.extend_from_slice(args);
    cli::run(Cli::try_parse_from(argv).unwrap())
}

fn same_code(a: ExitCode, b: ExitCode) -> bool {
    format!("{a:?}") == format!("{b:?}")
}

fn add_args<'a>(data: &'a str, gain: &'a str, status: &'a str, balance: &'a str) -> Vec<&'a str> {
    vec![
        "--data",
        data,
        "add",
        "--date",
        "2024-01-15",
        "--instrument",
        "EURUSD",
        "--trade-type",
        "Buy",
        "--lot-size",
        "1.0",
        "--entry",
        "1.10",
        "--exit",
        "1.12",
        "--tp",
        "1.15",
        "--sl",
        "1.08",
        "--status",
        status,
        "--gain",
        gain,
        "--balance",
        balance,
        "--condition",
        "breakout",
    ]
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

mod commands {
    use super::*;

    #[test]
    fn add_writes_record() {
        let (_dir, path) = temp_store();
        let code = run(&add_args(path_str(&path), "200", "Win", "10200"));
        assert!(same_code(code, ExitCode::SUCCESS));

        let journal = cli::open_journal(&path).unwrap();
        assert_eq!(journal.records(), &[eurusd_win()]);
    }

    #[test]
    fn add_zero_gain_fails_with_validation_code() {
        let (_dir, path) = temp_store();
        let code = run(&add_args(path_str(&path), "0", "BE", "10200"));
        assert!(same_code(code, ExitCode::from(3)));
        assert!(!path.exists());
    }

    #[test]
    fn add_non_finite_gain_fails_with_validation_code() {
        let (_dir, path) = temp_store();
        for gain in ["NaN", "inf"] {
            let code = run(&add_args(path_str(&path), gain, "Win", "10200"));
            assert!(same_code(code, ExitCode::from(3)));
        }
        assert!(!path.exists());
    }

    #[test]
    fn edit_replaces_fields() {
        let (_dir, path) = temp_store();
        let data = path_str(&path);
        run(&add_args(data, "200", "Win", "10200"));
        run(&add_args(data, "-50", "Loss", "10150"));

        let code = run(&[
            "--data", data, "edit", "1", "--gain", "-75", "--balance", "10125",
        ]);
        assert!(same_code(code, ExitCode::SUCCESS));

        let journal = cli::open_journal(&path).unwrap();
        let edited = journal.get(1).unwrap();
        assert_eq!(edited.gain, -75.0);
        assert_eq!(edited.account_balance, 10_125.0);
        assert_eq!(edited.status, TradeStatus::Loss);
        assert_eq!(journal.get(0).unwrap(), &eurusd_win());
    }

    #[test]
    fn edit_missing_trade_number() {
        let (_dir, path) = temp_store();
        let data = path_str(&path);
        run(&add_args(data, "200", "Win", "10200"));

        let code = run(&["--data", data, "edit", "5", "--gain", "10"]);
        assert!(same_code(code, ExitCode::from(4)));
    }

    #[test]
    fn edit_to_blank_instrument_rejected() {
        let (_dir, path) = temp_store();
        let data = path_str(&path);
        run(&add_args(data, "200", "Win", "10200"));
        let before = fs::read_to_string(&path).unwrap();

        let code = run(&["--data", data, "edit", "0", "--instrument", "  "]);
        assert!(same_code(code, ExitCode::from(3)));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn clear_twice_succeeds() {
        let (_dir, path) = temp_store();
        let data = path_str(&path);
        run(&add_args(data, "200", "Win", "10200"));

        assert!(same_code(run(&["--data", data, "clear"]), ExitCode::SUCCESS));
        assert!(same_code(run(&["--data", data, "clear"]), ExitCode::SUCCESS));
        assert!(!path.exists());
    }

    #[test]
    fn list_and_stats_on_empty_journal() {
        let (_dir, path) = temp_store();
        let data = path_str(&path);
        assert!(same_code(run(&["--data", data, "list"]), ExitCode::SUCCESS));
        assert!(same_code(run(&["--data", data, "stats"]), ExitCode::SUCCESS));
    }

    #[test]
    fn malformed_file_fails_with_load_code() {
        let (_dir, path) = temp_store();
        fs::write(&path, "date,open,high,low,close\n").unwrap();
        let code = run(&["--data", path_str(&path), "stats"]);
        assert!(same_code(code, ExitCode::from(5)));
    }
}

mod config {
    use super::*;

    fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn data_file_from_config() {
        let (_dir, path) = temp_store();
        let ini = write_temp_ini(&format!("[journal]\ndata_file = {}\n", path.display()));
        let config = ini.path().to_str().unwrap();

        let mut args = vec!["--config", config];
        args.extend(add_args(path_str(&path), "200", "Win", "10200").into_iter().skip(2));
        assert!(same_code(run(&args), ExitCode::SUCCESS));

        assert_eq!(cli::open_journal(&path).unwrap().len(), 1);
    }

    #[test]
    fn missing_config_file_fails_with_config_code() {
        let code = run(&["--config", "/nonexistent/journal.ini", "list"]);
        assert!(same_code(code, ExitCode::from(2)));
    }

    #[test]
    fn chronological_setting_accepted() {
        let (_dir, path) = temp_store();
        let data = path_str(&path);
        run(&add_args(data, "200", "Win", "10200"));
        let ini = write_temp_ini("[stats]\nchronological = yes\n");

        let code = run(&["--config", ini.path().to_str().unwrap(), "--data", data, "stats"]);
        assert!(same_code(code, ExitCode::SUCCESS));
    }

    #[test]
    fn unreadable_chronological_value_fails_with_config_code() {
        let (_dir, path) = temp_store();
        let data = path_str(&path);
        run(&add_args(data, "200", "Win", "10200"));
        let ini = write_temp_ini("[stats]\nchronological = maybe\n");

        let code = run(&["--config", ini.path().to_str().unwrap(), "--data", data, "stats"]);
        assert!(same_code(code, ExitCode::from(2)));
    }
}
