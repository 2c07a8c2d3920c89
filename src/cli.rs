//! CLI definition and dispatch.
//!
//! Each invocation is one request: open the journal from disk, apply the
//! command, persist, render.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::{self, CsvTradeStore};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::JournalError;
use crate::domain::journal::Journal;
use crate::domain::statistics::{self, Summary};
use crate::domain::trade::{JournalEntry, TradeRecord, TradeStatus, TradeType};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_DATA_FILE: &str = "trades.csv";

#[derive(Parser, Debug)]
#[command(name = "tradejournal", about = "Personal trading journal")]
pub struct Cli {
    /// INI config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Journal CSV file (overrides [journal] data_file)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new trade
    Add(AddArgs),
    /// Show the trade history
    List,
    /// Replace fields of an existing trade
    Edit(EditArgs),
    /// Delete all trades
    Clear,
    /// Show performance statistics
    Stats {
        /// Order the equity curve by trade date instead of entry order
        #[arg(long)]
        chronological: bool,
    },
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    csv_adapter::parse_date(s)
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Trade date, defaults to today
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub instrument: String,
    #[arg(long)]
    pub trade_type: TradeType,
    #[arg(long, allow_negative_numbers = true)]
    pub lot_size: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub entry: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub exit: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub tp: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub sl: f64,
    #[arg(long)]
    pub status: TradeStatus,
    /// Realized gain or loss in account currency
    #[arg(long, allow_negative_numbers = true)]
    pub gain: f64,
    /// Account balance after the trade
    #[arg(long, allow_negative_numbers = true)]
    pub balance: f64,
    #[arg(long, default_value = "")]
    pub condition: String,
}

impl AddArgs {
    pub fn into_record(self, today: NaiveDate) -> TradeRecord {
        TradeRecord {
            date: self.date.unwrap_or(today),
            instrument: self.instrument,
            trade_type: self.trade_type,
            lot_size: self.lot_size,
            entry: self.entry,
            exit: self.exit,
            take_profit: self.tp,
            stop_loss: self.sl,
            status: self.status,
            gain: self.gain,
            account_balance: self.balance,
            entry_condition: self.condition,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Trade number as shown by `list`
    pub trade_number: usize,
    #[arg(long, value_parser = parse_date_arg)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub instrument: Option<String>,
    #[arg(long)]
    pub trade_type: Option<TradeType>,
    #[arg(long, allow_negative_numbers = true)]
    pub lot_size: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub entry: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub exit: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub tp: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub sl: Option<f64>,
    #[arg(long)]
    pub status: Option<TradeStatus>,
    #[arg(long, allow_negative_numbers = true)]
    pub gain: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub balance: Option<f64>,
    #[arg(long)]
    pub condition: Option<String>,
}

impl EditArgs {
    /// Builds the full replacement record: given fields over the current one.
    pub fn apply(self, current: &TradeRecord) -> TradeRecord {
        TradeRecord {
            date: self.date.unwrap_or(current.date),
            instrument: self.instrument.unwrap_or_else(|| current.instrument.clone()),
            trade_type: self.trade_type.unwrap_or(current.trade_type),
            lot_size: self.lot_size.unwrap_or(current.lot_size),
            entry: self.entry.unwrap_or(current.entry),
            exit: self.exit.unwrap_or(current.exit),
            take_profit: self.tp.unwrap_or(current.take_profit),
            stop_loss: self.sl.unwrap_or(current.stop_loss),
            status: self.status.unwrap_or(current.status),
            gain: self.gain.unwrap_or(current.gain),
            account_balance: self.balance.unwrap_or(current.account_balance),
            entry_condition: self
                .condition
                .unwrap_or_else(|| current.entry_condition.clone()),
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match cli.config.as_ref().map(load_config).transpose() {
        Ok(c) => c,
        Err(e) => return report(&e),
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);
    let data_path = resolve_data_path(cli.data.as_deref(), config_port);

    let result = match cli.command {
        Command::Add(args) => run_add(&data_path, args),
        Command::List => run_list(&data_path),
        Command::Edit(args) => run_edit(&data_path, args),
        Command::Clear => run_clear(&data_path),
        Command::Stats { chronological } => resolve_chronological(chronological, config_port)
            .and_then(|chronological| run_stats(&data_path, chronological)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(err: &JournalError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, JournalError> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// `--data` wins over `[journal] data_file`, which wins over the default.
pub fn resolve_data_path(data: Option<&Path>, config: Option<&dyn ConfigPort>) -> PathBuf {
    if let Some(p) = data {
        return p.to_path_buf();
    }
    config
        .and_then(|c| c.get_string("journal", "data_file"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}

/// `--chronological` or `[stats] chronological`. A malformed config value is
/// an error even when the flag is given.
pub fn resolve_chronological(
    flag: bool,
    config: Option<&dyn ConfigPort>,
) -> Result<bool, JournalError> {
    let configured = match config {
        Some(c) => c.get_bool("stats", "chronological")?.unwrap_or(false),
        None => false,
    };
    Ok(flag || configured)
}

pub fn open_journal(path: &Path) -> Result<Journal<CsvTradeStore>, JournalError> {
    Journal::open(CsvTradeStore::new(path.to_path_buf()))
}

fn run_add(path: &Path, args: AddArgs) -> Result<(), JournalError> {
    let mut journal = open_journal(path)?;
    let today = chrono::Local::now().date_naive();
    let entry = journal.append(args.into_record(today))?;
    eprintln!("Trade saved successfully (trade number {})", entry.trade_number);
    Ok(())
}

fn run_list(path: &Path) -> Result<(), JournalError> {
    let journal = open_journal(path)?;
    if journal.is_empty() {
        eprintln!("No trades recorded yet.");
        return Ok(());
    }
    print!("{}", HistoryTable(&journal.entries()));
    Ok(())
}

fn run_edit(path: &Path, args: EditArgs) -> Result<(), JournalError> {
    let mut journal = open_journal(path)?;
    let index = args.trade_number;
    let candidate = args.apply(journal.get(index)?);
    journal.update_at(index, candidate)?;
    eprintln!("Trade {} updated successfully", index);
    Ok(())
}

fn run_clear(path: &Path) -> Result<(), JournalError> {
    let mut journal = open_journal(path)?;
    journal.clear_all()?;
    eprintln!("All trade data deleted.");
    Ok(())
}

fn run_stats(path: &Path, chronological: bool) -> Result<(), JournalError> {
    let journal = open_journal(path)?;
    if journal.is_empty() {
        eprintln!("No trades recorded yet.");
        return Ok(());
    }
    print!(
        "{}",
        StatsReport {
            records: journal.records(),
            chronological,
        }
    );
    Ok(())
}

/// The history table, one row per trade with its trade number.
pub struct HistoryTable<'a>(pub &'a [JournalEntry]);

impl fmt::Display for HistoryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5}  {:<10}  {:<10}  {:<4}  {:>8}  {:>10}  {:>10}  {:>10}  {:>10}  {:<4}  {:>10}  {:>12}  {}",
            "#", "Date", "Instrument", "Type", "Lots", "Entry", "Exit", "TP", "SL", "Stat", "Gain",
            "Balance", "Entry Condition"
        )?;
        for e in self.0 {
            let r = &e.record;
            writeln!(
                f,
                "{:>5}  {:<10}  {:<10}  {:<4}  {:>8}  {:>10}  {:>10}  {:>10}  {:>10}  {:<4}  {:>10.2}  {:>12.2}  {}",
                e.trade_number,
                r.date,
                r.instrument,
                r.trade_type,
                r.lot_size,
                r.entry,
                r.exit,
                r.take_profit,
                r.stop_loss,
                r.status,
                r.gain,
                r.account_balance,
                r.entry_condition
            )?;
        }
        Ok(())
    }
}

/// Summary block, balance curve and per-trade P/L.
pub struct StatsReport<'a> {
    pub records: &'a [TradeRecord],
    pub chronological: bool,
}

impl fmt::Display for StatsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let records = self.records;
        let summary = Summary::compute(records);
        let curve = if self.chronological {
            statistics::chronological_equity_curve(records)
        } else {
            statistics::equity_curve(records)
        };

        writeln!(f, "=== Performance Statistics ===")?;
        writeln!(f, "Total Trades:     {}", summary.total_trades)?;
        writeln!(f, "Wins:             {}", summary.wins)?;
        writeln!(f, "Losses:           {}", summary.losses)?;
        writeln!(f, "Break-even:       {}", summary.breakevens)?;
        writeln!(f, "Win Rate %:       {:.2}", summary.win_rate)?;
        writeln!(f, "Net Gain:         {:.2}", summary.net_gain)?;
        if let Some(balance) = summary.final_balance {
            writeln!(f, "Final Balance:    {:.2}", balance)?;
        }

        writeln!(f, "\n=== Account Balance Curve ===")?;
        for point in &curve {
            writeln!(f, "  {}  {:>12.2}", point.date, point.balance)?;
        }

        writeln!(f, "\n=== Profit / Loss Per Trade ===")?;
        for (n, gain) in statistics::profit_loss_series(records).iter().enumerate() {
            let sign = if *gain >= 0.0 { "+" } else { "" };
            writeln!(f, "  {:>5}  {}{:.2}", n, sign, gain)?;
        }
        Ok(())
    }
}
