#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::RefCell;
use std::path::PathBuf;
use tempfile::TempDir;
use tradejournal::adapters::csv_adapter::CsvTradeStore;
use tradejournal::domain::error::JournalError;
pub use tradejournal::domain::trade::{TradeRecord, TradeStatus, TradeType};
use tradejournal::ports::trade_store_port::TradeStorePort;

/// In-memory store that can be told to fail the next write or remove.
#[derive(Default)]
pub struct MockTradeStore {
    pub saved: RefCell<Vec<TradeRecord>>,
    pub fail_reason: RefCell<Option<String>>,
}

impl MockTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TradeRecord>) -> Self {
        Self {
            saved: RefCell::new(records),
            fail_reason: RefCell::new(None),
        }
    }

    pub fn fail_with(&self, reason: &str) {
        *self.fail_reason.borrow_mut() = Some(reason.to_string());
    }

    fn check(&self) -> Result<(), JournalError> {
        match self.fail_reason.borrow().as_ref() {
            Some(reason) => Err(std::io::Error::other(reason.clone()).into()),
            None => Ok(()),
        }
    }
}

impl TradeStorePort for &MockTradeStore {
    fn read_all(&self) -> Result<Vec<TradeRecord>, JournalError> {
        Ok(self.saved.borrow().clone())
    }

    fn write_all(&self, records: &[TradeRecord]) -> Result<(), JournalError> {
        self.check()?;
        *self.saved.borrow_mut() = records.to_vec();
        Ok(())
    }

    fn remove(&self) -> Result<(), JournalError> {
        self.check()?;
        self.saved.borrow_mut().clear();
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// The EURUSD breakout trade used throughout the scenarios.
pub fn eurusd_win() -> TradeRecord {
    TradeRecord {
        date: date(2024, 1, 15),
        instrument: "EURUSD".into(),
        trade_type: TradeType::Buy,
        lot_size: 1.0,
        entry: 1.10,
        exit: 1.12,
        take_profit: 1.15,
        stop_loss: 1.08,
        status: TradeStatus::Win,
        gain: 200.0,
        account_balance: 10_200.0,
        entry_condition: "breakout".into(),
    }
}

pub fn eurusd_loss() -> TradeRecord {
    TradeRecord {
        date: date(2024, 1, 16),
        status: TradeStatus::Loss,
        gain: -50.0,
        account_balance: 10_150.0,
        entry_condition: "failed retest".into(),
        ..eurusd_win()
    }
}

pub fn make_trade(instrument: &str, status: TradeStatus, gain: f64, balance: f64) -> TradeRecord {
    TradeRecord {
        instrument: instrument.into(),
        status,
        gain,
        account_balance: balance,
        ..eurusd_win()
    }
}

pub fn temp_store() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trades.csv");
    (dir, path)
}

pub fn csv_store(path: &PathBuf) -> CsvTradeStore {
    CsvTradeStore::new(path.clone())
}
