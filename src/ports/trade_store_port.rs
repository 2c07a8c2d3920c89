//! Trade persistence port trait.

use crate::domain::error::JournalError;
use crate::domain::trade::TradeRecord;

/// Whole-file persistence for the journal. Every write replaces the stored
/// sequence completely.
pub trait TradeStorePort {
    /// Returns an empty sequence when nothing has been stored yet.
    fn read_all(&self) -> Result<Vec<TradeRecord>, JournalError>;

    fn write_all(&self, records: &[TradeRecord]) -> Result<(), JournalError>;

    /// Must succeed when the store is already empty or absent.
    fn remove(&self) -> Result<(), JournalError>;
}
