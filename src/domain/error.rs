//! Domain error types.

/// A write candidate that failed the required-field rule.
///
/// `fields` lists every offending column in file order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error(
    "all required fields must be filled and non-zero (invalid: {})",
    .fields.join(", ")
)]
pub struct ValidationError {
    pub fields: Vec<&'static str>,
}

/// Top-level error type for tradejournal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("trade number {index} does not exist ({len} trades recorded)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to load {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) => 1,
            JournalError::ConfigParse { .. } | JournalError::ConfigInvalid { .. } => 2,
            JournalError::Validation(_) => 3,
            JournalError::IndexOutOfRange { .. } => 4,
            JournalError::Load { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
