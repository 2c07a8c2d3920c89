//! The trade journal repository.
//!
//! Holds the most recently loaded sequence of records and persists every
//! mutation through a [`TradeStorePort`] as a full rewrite. A record's trade
//! number is its position in that sequence.

use tracing::{debug, info, warn};

use super::error::JournalError;
use super::trade::{JournalEntry, TradeRecord};
use super::validation::validate;
use crate::ports::trade_store_port::TradeStorePort;

pub struct Journal<P: TradeStorePort> {
    store: P,
    records: Vec<TradeRecord>,
}

impl<P: TradeStorePort> Journal<P> {
    /// Opens the journal and loads whatever the store currently holds.
    pub fn open(store: P) -> Result<Self, JournalError> {
        let mut journal = Journal {
            store,
            records: Vec::new(),
        };
        journal.load()?;
        Ok(journal)
    }

    /// Re-reads the backing store, replacing the in-memory sequence.
    ///
    /// On error the previously loaded sequence is kept.
    pub fn load(&mut self) -> Result<&[TradeRecord], JournalError> {
        let records = self.store.read_all()?;
        debug!(count = records.len(), "loaded trade journal");
        self.records = records;
        Ok(&self.records)
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&TradeRecord, JournalError> {
        self.records
            .get(index)
            .ok_or(JournalError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.records
            .iter()
            .enumerate()
            .map(|(trade_number, record)| JournalEntry {
                trade_number,
                record: record.clone(),
            })
            .collect()
    }

    pub fn append(&mut self, candidate: TradeRecord) -> Result<JournalEntry, JournalError> {
        if let Err(e) = validate(&candidate) {
            warn!(fields = ?e.fields, "rejected new trade");
            return Err(e.into());
        }

        let mut next = self.records.clone();
        next.push(candidate);
        self.commit(next)?;

        let trade_number = self.records.len() - 1;
        let record = self.records[trade_number].clone();
        info!(
            trade_number,
            instrument = %record.instrument,
            "trade added"
        );
        Ok(JournalEntry {
            trade_number,
            record,
        })
    }

    /// Replaces the record at `index` with `candidate`.
    ///
    /// The index is checked before the candidate is validated.
    pub fn update_at(
        &mut self,
        index: usize,
        candidate: TradeRecord,
    ) -> Result<JournalEntry, JournalError> {
        if index >= self.records.len() {
            return Err(JournalError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        if let Err(e) = validate(&candidate) {
            warn!(trade_number = index, fields = ?e.fields, "rejected trade update");
            return Err(e.into());
        }

        let mut next = self.records.clone();
        next[index] = candidate;
        self.commit(next)?;

        info!(trade_number = index, "trade updated");
        Ok(JournalEntry {
            trade_number: index,
            record: self.records[index].clone(),
        })
    }

    pub fn clear_all(&mut self) -> Result<(), JournalError> {
        self.store.remove()?;
        let cleared = self.records.len();
        self.records.clear();
        info!(cleared, "all trades deleted");
        Ok(())
    }

    fn commit(&mut self, next: Vec<TradeRecord>) -> Result<(), JournalError> {
        self.store.write_all(&next)?;
        debug!(count = next.len(), "rewrote trade journal");
        self.records = next;
        Ok(())
    }
}
