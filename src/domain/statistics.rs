//! Performance statistics over the journal.
//!
//! Every function is pure and works on records in stored order unless the
//! name says otherwise.

use super::trade::TradeRecord;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub balance: f64,
}

pub fn total_trades(records: &[TradeRecord]) -> usize {
    records.len()
}

pub fn win_count(records: &[TradeRecord]) -> usize {
    records.iter().filter(|r| r.is_win()).count()
}

pub fn loss_count(records: &[TradeRecord]) -> usize {
    records.iter().filter(|r| r.is_loss()).count()
}

pub fn breakeven_count(records: &[TradeRecord]) -> usize {
    records.iter().filter(|r| r.is_breakeven()).count()
}

/// Percentage of winning trades, rounded to two decimals. `0.0` when empty.
pub fn win_rate(records: &[TradeRecord]) -> f64 {
    let total = total_trades(records);
    if total == 0 {
        return 0.0;
    }
    round2(win_count(records) as f64 / total as f64 * 100.0)
}

/// Account balance after each trade, in stored order.
pub fn equity_curve(records: &[TradeRecord]) -> Vec<EquityPoint> {
    records
        .iter()
        .map(|r| EquityPoint {
            date: r.date,
            balance: r.account_balance,
        })
        .collect()
}

/// Like [`equity_curve`] but ordered by trade date. Trades on the same date
/// keep their stored order.
pub fn chronological_equity_curve(records: &[TradeRecord]) -> Vec<EquityPoint> {
    let mut curve = equity_curve(records);
    curve.sort_by_key(|p| p.date);
    curve
}

pub fn profit_loss_series(records: &[TradeRecord]) -> Vec<f64> {
    records.iter().map(|r| r.gain).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Headline numbers for the statistics view.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
    pub win_rate: f64,
    pub net_gain: f64,
    pub final_balance: Option<f64>,
}

impl Summary {
    pub fn compute(records: &[TradeRecord]) -> Self {
        Summary {
            total_trades: total_trades(records),
            wins: win_count(records),
            losses: loss_count(records),
            breakevens: breakeven_count(records),
            win_rate: win_rate(records),
            net_gain: records.iter().map(|r| r.gain).sum(),
            final_balance: records.last().map(|r| r.account_balance),
        }
    }
}
