//! Command model and argument parsing
//!
//! clap collects raw strings; this layer turns them into typed commands so
//! dispatch never sees an unparsed amount or date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

use flowest::simulator::IncomeRow;
use flowest::utils::parse_decimal_br;

/// Parsed command ready for dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Simulate(SimulateArgs),
    Income { rows: Vec<IncomeRow> },
    TickersSearch { query: String },
    Simulations { action: SimulationsAction },
    Config { action: ConfigAction },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulateArgs {
    pub holdings: Vec<HoldingSpec>,
    pub file: Option<PathBuf>,
    pub contribution: Option<Decimal>,
    pub goal: Option<Decimal>,
    pub years: Option<i32>,
    pub start: Option<NaiveDate>,
    pub every: u32,
    pub export: Option<PathBuf>,
}

/// `TICKER:QUANTITY:PRICE[:YIELD]` from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldingSpec {
    pub ticker: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub dividend_yield: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationsAction {
    List { query: Option<String> },
    Show { id: String },
    Run { id: String, start: Option<NaiveDate>, every: u32 },
    Save { file: PathBuf, title: Option<String>, id: Option<String> },
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    Path,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CommandParseError {
    pub message: String,
}

impl CommandParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse an amount argument, naming the argument in the error
pub fn parse_amount(name: &str, value: &str) -> Result<Decimal, CommandParseError> {
    parse_decimal_br(value)
        .ok_or_else(|| CommandParseError::new(format!("Invalid {} '{}'", name, value)))
}

/// Split a `:`-separated spec, rejecting empty fields
fn split_spec<'a>(
    spec: &'a str,
    usage: &str,
    expected: std::ops::RangeInclusive<usize>,
) -> Result<Vec<&'a str>, CommandParseError> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    if !expected.contains(&parts.len()) || parts.iter().any(|p| p.is_empty()) {
        return Err(CommandParseError::new(format!(
            "Invalid '{}'. Use {}",
            spec, usage
        )));
    }
    Ok(parts)
}

/// Parse `TICKER:QUANTITY:PRICE[:YIELD]`
pub fn parse_holding_spec(spec: &str) -> Result<HoldingSpec, CommandParseError> {
    let parts = split_spec(spec, "TICKER:QUANTITY:PRICE[:YIELD]", 3..=4)?;
    Ok(HoldingSpec {
        ticker: parts[0].to_ascii_uppercase(),
        quantity: parse_amount("quantity", parts[1])?,
        unit_price: parse_amount("price", parts[2])?,
        dividend_yield: parts
            .get(3)
            .map(|y| parse_amount("dividend yield", y))
            .transpose()?,
    })
}

/// Parse `TICKER:VALUE:YIELD`
pub fn parse_income_row(spec: &str) -> Result<IncomeRow, CommandParseError> {
    let parts = split_spec(spec, "TICKER:VALUE:YIELD", 3..=3)?;
    Ok(IncomeRow::new(
        parts[0],
        parse_amount("invested value", parts[1])?,
        parse_amount("dividend yield", parts[2])?,
    ))
}

/// Parse the first simulated month: `YYYY-MM` or `YYYY-MM-DD` (the day is dropped)
pub fn parse_start_month(s: &str) -> Result<NaiveDate, CommandParseError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d"))
        .map(flowest::simulator::projection::month_start)
        .map_err(|_| CommandParseError::new(format!("Invalid month '{}'. Use YYYY-MM or YYYY-MM-DD", s)))
}
