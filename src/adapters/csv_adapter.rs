//! CSV file trade store.

use crate::domain::error::JournalError;
use crate::domain::trade::{TradeRecord, TradeStatus, TradeType};
use crate::ports::trade_store_port::TradeStorePort;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub const HEADER: [&str; 12] = [
    "Date",
    "Instrument",
    "Trade Type",
    "Lot Size",
    "Entry",
    "Exit",
    "TP",
    "SL",
    "Status",
    "Gain",
    "Account Balance",
    "Entry Condition",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize)]
struct TradeRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Instrument")]
    instrument: String,
    #[serde(rename = "Trade Type")]
    trade_type: TradeType,
    #[serde(rename = "Lot Size")]
    lot_size: f64,
    #[serde(rename = "Entry")]
    entry: f64,
    #[serde(rename = "Exit")]
    exit: f64,
    #[serde(rename = "TP")]
    take_profit: f64,
    #[serde(rename = "SL")]
    stop_loss: f64,
    #[serde(rename = "Status")]
    status: TradeStatus,
    #[serde(rename = "Gain")]
    gain: f64,
    #[serde(rename = "Account Balance")]
    account_balance: f64,
    #[serde(rename = "Entry Condition")]
    entry_condition: String,
}

impl From<&TradeRecord> for TradeRow {
    fn from(r: &TradeRecord) -> Self {
        TradeRow {
            date: r.date.format(DATE_FORMAT).to_string(),
            instrument: r.instrument.clone(),
            trade_type: r.trade_type,
            lot_size: r.lot_size,
            entry: r.entry,
            exit: r.exit,
            take_profit: r.take_profit,
            stop_loss: r.stop_loss,
            status: r.status,
            gain: r.gain,
            account_balance: r.account_balance,
            entry_condition: r.entry_condition.clone(),
        }
    }
}

impl TradeRow {
    fn into_record(self) -> Result<TradeRecord, String> {
        Ok(TradeRecord {
            date: parse_date(&self.date)?,
            instrument: self.instrument,
            trade_type: self.trade_type,
            lot_size: self.lot_size,
            entry: self.entry,
            exit: self.exit,
            take_profit: self.take_profit,
            stop_loss: self.stop_loss,
            status: self.status,
            gain: self.gain,
            account_balance: self.account_balance,
            entry_condition: self.entry_condition,
        })
    }
}

/// Parses a calendar date. ISO dates are the norm; a trailing time part and
/// slash-separated dates are accepted.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(d);
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y/%m/%d")
        .map_err(|_| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

pub struct CsvTradeStore {
    path: PathBuf,
}

impl CsvTradeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_error(&self, reason: impl Into<String>) -> JournalError {
        JournalError::Load {
            path: self.path.display().to_string(),
            reason: reason.into(),
        }
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl TradeStorePort for CsvTradeStore {
    fn read_all(&self) -> Result<Vec<TradeRecord>, JournalError> {
        let content = match fs::read(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no journal file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(content.as_slice());

        let headers = rdr
            .headers()
            .map_err(|e| self.load_error(format!("CSV parse error: {e}")))?;
        let found: Vec<&str> = headers.iter().collect();
        if found != HEADER {
            return Err(self.load_error(format!(
                "unexpected columns [{}] (expected [{}])",
                found.join(", "),
                HEADER.join(", ")
            )));
        }

        let mut records = Vec::new();
        for (i, result) in rdr.deserialize::<TradeRow>().enumerate() {
            let row = result.map_err(|e| self.load_error(format!("CSV parse error: {e}")))?;
            let record = row
                .into_record()
                .map_err(|reason| self.load_error(format!("row {}: {}", i + 1, reason)))?;
            records.push(record);
        }

        Ok(records)
    }

    fn write_all(&self, records: &[TradeRecord]) -> Result<(), JournalError> {
        // Removed on drop unless persisted.
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            wtr.write_record(HEADER).map_err(io::Error::from)?;
            for record in records {
                wtr.serialize(TradeRow::from(record))
                    .map_err(io::Error::from)?;
            }
            wtr.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        debug!(path = %self.path.display(), count = records.len(), "wrote journal file");
        Ok(())
    }

    fn remove(&self) -> Result<(), JournalError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
