//! Write-boundary validation for trade records.
//!
//! A zero numeric value is treated as "not filled in", as is NaN or an
//! infinity. Negative values pass.

use super::error::ValidationError;
use super::trade::TradeRecord;

pub fn validate(candidate: &TradeRecord) -> Result<(), ValidationError> {
    let mut fields = Vec::new();

    if candidate.instrument.trim().is_empty() {
        fields.push("Instrument");
    }

    let numeric = [
        ("Lot Size", candidate.lot_size),
        ("Entry", candidate.entry),
        ("Exit", candidate.exit),
        ("TP", candidate.take_profit),
        ("SL", candidate.stop_loss),
        ("Gain", candidate.gain),
        ("Account Balance", candidate.account_balance),
    ];
    for (name, value) in numeric {
        if value == 0.0 || !value.is_finite() {
            fields.push(name);
        }
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { fields })
    }
}
