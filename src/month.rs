//! Selecting records by the calendar month they were sold in.

use serde::Deserialize;
use time::Month;

use crate::{Error, record::TransactionRecord};

/// The query string of the endpoints that report on a single month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The zero-padded month number, e.g. "03".
    pub month: Option<String>,
}

impl MonthQuery {
    /// The requested month.
    ///
    /// # Errors
    /// Returns [Error::MissingMonth] if the month is missing or empty.
    pub fn required_month(&self) -> Result<&str, Error> {
        self.month
            .as_deref()
            .filter(|month| !month.is_empty())
            .ok_or(Error::MissingMonth)
    }
}

/// Keep the records sold in `month`, regardless of the year.
///
/// `month` must be the zero-padded month number, e.g. "03" for March. Any
/// other spelling ("3", "March") matches nothing, as do records without a
/// valid sale date.
pub fn filter_by_month(records: Vec<TransactionRecord>, month: &str) -> Vec<TransactionRecord> {
    records
        .into_iter()
        .filter(|record| sold_in_month(record, month))
        .collect()
}

/// Whether `record` was sold in `month` (zero-padded, e.g. "07").
pub fn sold_in_month(record: &TransactionRecord, month: &str) -> bool {
    record
        .sale_date()
        .is_some_and(|date| month_number(date.month()) == month)
}

/// The zero-padded number of `month`, e.g. "09" for September.
pub fn month_number(month: Month) -> String {
    format!("{:02}", month as u8)
}

/// All twelve months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];
