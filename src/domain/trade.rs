//! Trade record types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeType {
    Buy,
    Sell,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Buy => f.pad("Buy"),
            TradeType::Sell => f.pad("Sell"),
        }
    }
}

impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Buy" | "buy" => Ok(TradeType::Buy),
            "Sell" | "sell" => Ok(TradeType::Sell),
            other => Err(format!("unknown trade type '{other}' (expected Buy or Sell)")),
        }
    }
}

/// Outcome of a trade. Break-even is stored as `BE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Win,
    Loss,
    #[serde(rename = "BE")]
    BreakEven,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Win => f.pad("Win"),
            TradeStatus::Loss => f.pad("Loss"),
            TradeStatus::BreakEven => f.pad("BE"),
        }
    }
}

impl FromStr for TradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Win" | "win" => Ok(TradeStatus::Win),
            "Loss" | "loss" => Ok(TradeStatus::Loss),
            "BE" | "be" | "BreakEven" => Ok(TradeStatus::BreakEven),
            other => Err(format!("unknown status '{other}' (expected Win, Loss or BE)")),
        }
    }
}

/// One logged trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub instrument: String,
    pub trade_type: TradeType,
    pub lot_size: f64,
    pub entry: f64,
    pub exit: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
    pub status: TradeStatus,
    /// Realized profit or loss in account currency.
    pub gain: f64,
    /// Account equity immediately after the trade.
    pub account_balance: f64,
    pub entry_condition: String,
}

impl TradeRecord {
    pub fn is_win(&self) -> bool {
        self.status == TradeStatus::Win
    }

    pub fn is_loss(&self) -> bool {
        self.status == TradeStatus::Loss
    }

    pub fn is_breakeven(&self) -> bool {
        self.status == TradeStatus::BreakEven
    }
}

/// A stored record together with its positional trade number.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub trade_number: usize,
    pub record: TradeRecord,
}
