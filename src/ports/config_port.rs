//! Configuration access port trait.

use crate::domain::error::JournalError;

pub trait ConfigPort {
    /// Trimmed value of `key`; blank values read as absent.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// `Ok(None)` when the key is absent, `ConfigInvalid` when it is present
    /// but not a boolean.
    fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>, JournalError>;
}
