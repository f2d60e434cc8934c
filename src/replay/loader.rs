//! CSV ingestion for LOBSTER message and reference orderbook files.
//!
//! Message files are headerless with six columns per row:
//! `Time, Type, OrderID, Size, Price, Direction`. Extra columns are
//! ignored. Reference orderbook files carry `4·N` columns in groups of
//! `(AskPrice_i, AskSize_i, BidPrice_i, BidSize_i)` for levels `1..=N`,
//! with sentinel prices marking absent levels.

use super::error::ReplayError;
use crate::orderbook::{EventKind, MarketEvent, Side};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

/// Sentinel price for an absent ask level in reference files.
pub const ASK_ABSENT_PRICE: i64 = 9_999_999_999;

/// Sentinel price for an absent bid level in reference files.
pub const BID_ABSENT_PRICE: i64 = -9_999_999_999;

/// One level of a reference orderbook row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLevel {
    /// Ask price, or [`ASK_ABSENT_PRICE`]
    pub ask_price: i64,
    /// Size at the ask level (0 when absent)
    pub ask_size: u64,
    /// Bid price, or [`BID_ABSENT_PRICE`]
    pub bid_price: i64,
    /// Size at the bid level (0 when absent)
    pub bid_size: u64,
}

impl ReferenceLevel {
    /// Whether the ask slot holds a real level.
    #[must_use]
    #[inline]
    pub fn ask_present(&self) -> bool {
        self.ask_price != ASK_ABSENT_PRICE
    }

    /// Whether the bid slot holds a real level.
    #[must_use]
    #[inline]
    pub fn bid_present(&self) -> bool {
        self.bid_price != BID_ABSENT_PRICE
    }
}

fn open(path: &Path) -> Result<File, ReplayError> {
    File::open(path).map_err(|err| ReplayError::Io {
        message: err.to_string(),
        path: Some(path.to_path_buf()),
    })
}

fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: usize,
) -> Result<T, ReplayError> {
    let raw = record.get(index).unwrap_or("").trim();
    if raw.is_empty() {
        return Err(ReplayError::MalformedRow {
            line,
            message: format!("blank {name} cell"),
        });
    }
    raw.parse().map_err(|_| ReplayError::MalformedRow {
        line,
        message: format!("cannot parse {name} from {raw:?}"),
    })
}

fn parse_message_row(record: &csv::StringRecord, line: usize) -> Result<MarketEvent, ReplayError> {
    if record.len() < 6 {
        return Err(ReplayError::MalformedRow {
            line,
            message: format!("expected at least 6 columns, got {}", record.len()),
        });
    }

    let timestamp: f64 = parse_field(record, 0, "Time", line)?;
    let type_code: i64 = parse_field(record, 1, "Type", line)?;
    let order_id: u64 = parse_field(record, 2, "OrderID", line)?;
    let size: u64 = parse_field(record, 3, "Size", line)?;
    let price: i64 = parse_field(record, 4, "Price", line)?;
    let direction: i64 = parse_field(record, 5, "Direction", line)?;

    let kind = EventKind::from_lobster(type_code)?;
    let side = Side::from_lobster(direction)?;
    Ok(MarketEvent::new(timestamp, kind, order_id, size, price, side))
}

/// Read a LOBSTER message file into typed events, in file order.
///
/// # Errors
/// [`ReplayError::Io`] when the file cannot be opened,
/// [`ReplayError::MalformedRow`] for short rows, blank cells or
/// unparseable values, and [`ReplayError::Book`] for type or direction
/// codes outside the LOBSTER schema.
pub fn read_message_file(path: impl AsRef<Path>) -> Result<Vec<MarketEvent>, ReplayError> {
    let file = open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut events = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        events.push(parse_message_row(&record, index + 1)?);
    }
    Ok(events)
}

/// Read a LOBSTER reference orderbook file: one `Vec<ReferenceLevel>`
/// per message row, levels ordered best-first.
///
/// # Errors
/// [`ReplayError::MalformedReferenceFile`] when the column count is not
/// a positive multiple of 4, plus the same I/O and row errors as
/// [`read_message_file`].
pub fn read_orderbook_file(path: impl AsRef<Path>) -> Result<Vec<Vec<ReferenceLevel>>, ReplayError> {
    let file = open(path.as_ref())?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows: Vec<Vec<ReferenceLevel>> = Vec::new();
    let mut expected_columns: Option<usize> = None;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 1;

        let columns = record.len();
        match expected_columns {
            None => {
                if columns == 0 || columns % 4 != 0 {
                    return Err(ReplayError::MalformedReferenceFile { columns });
                }
                expected_columns = Some(columns);
            }
            Some(expected) if columns != expected => {
                return Err(ReplayError::MalformedRow {
                    line,
                    message: format!("expected {expected} columns, got {columns}"),
                });
            }
            Some(_) => {}
        }

        let mut levels = Vec::with_capacity(columns / 4);
        for slot in 0..columns / 4 {
            let base = slot * 4;
            levels.push(ReferenceLevel {
                ask_price: parse_field(&record, base, "AskPrice", line)?,
                ask_size: parse_field(&record, base + 1, "AskSize", line)?,
                bid_price: parse_field(&record, base + 2, "BidPrice", line)?,
                bid_size: parse_field(&record, base + 3, "BidSize", line)?,
            });
        }
        rows.push(levels);
    }

    Ok(rows)
}
