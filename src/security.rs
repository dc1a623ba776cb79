//! Security return records and extraction from review sheet rows
//!
//! The review sheet is an unordered list of securities, one per row. A
//! security is located by a case-insensitive match on a key column (name or
//! ticker), and its six return fields are read from consecutive cells
//! starting at the data column.

use crate::cell::{CellValue, Column};
use crate::error::{Result, SummaryError};
use std::collections::HashMap;

/// One of the six return horizons, in summary-sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    YearToDate,
    MonthToDate,
    QuarterToDate,
    OneYear,
    ThreeYear,
    FiveYear,
}

impl Metric {
    /// All metrics in the order they are laid out, top to bottom.
    pub const ALL: [Metric; 6] = [
        Metric::YearToDate,
        Metric::MonthToDate,
        Metric::QuarterToDate,
        Metric::OneYear,
        Metric::ThreeYear,
        Metric::FiveYear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::YearToDate => "YTD",
            Metric::MonthToDate => "MTD",
            Metric::QuarterToDate => "QTD",
            Metric::OneYear => "1Y",
            Metric::ThreeYear => "3Y",
            Metric::FiveYear => "5Y",
        }
    }
}

/// Return data for a single security
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityReturn {
    /// Name or ticker, upper-cased
    pub name: String,
    pub year_to_date: f64,
    pub month_to_date: f64,
    pub quarter_to_date: f64,
    pub one_year: f64,
    pub three_year: f64,
    pub five_year: f64,
}

impl SecurityReturn {
    /// Build a record from the six values in metric order.
    pub fn new(name: impl Into<String>, values: [f64; 6]) -> Self {
        let [ytd, mtd, qtd, one, three, five] = values;
        Self {
            name: name.into(),
            year_to_date: ytd,
            month_to_date: mtd,
            quarter_to_date: qtd,
            one_year: one,
            three_year: three,
            five_year: five,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::YearToDate => self.year_to_date,
            Metric::MonthToDate => self.month_to_date,
            Metric::QuarterToDate => self.quarter_to_date,
            Metric::OneYear => self.one_year,
            Metric::ThreeYear => self.three_year,
            Metric::FiveYear => self.five_year,
        }
    }

    /// The six values in metric order.
    pub fn values(&self) -> [f64; 6] {
        Metric::ALL.map(|m| self.get(m))
    }
}

/// Map lowercased key-column text to its first row index.
fn build_lookup(rows: &[Vec<CellValue>], key_column: Column) -> HashMap<String, usize> {
    let mut lookup = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        if let Some(key) = row.get(key_column.index()).and_then(CellValue::lookup_key) {
            lookup.entry(key).or_insert(idx);
        }
    }
    lookup
}

/// Resolve each name to its review row and read its six return fields.
///
/// Names are matched case-insensitively against `key_column`; duplicate keys
/// resolve to the first matching row. Return cells that are not numbers
/// (text, booleans, blanks, or cells past the end of a short row) read as 0.0.
/// Records come back in the order of `names`.
///
/// # Errors
/// `SummaryError::SecurityNotFound` for the first name with no matching row.
pub fn extract<I>(
    rows: &[Vec<CellValue>],
    names: I,
    key_column: Column,
    value_start_column: Column,
) -> Result<Vec<SecurityReturn>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let lookup = build_lookup(rows, key_column);
    let start = value_start_column.index();

    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            let row_idx = *lookup.get(&name.to_lowercase()).ok_or_else(|| {
                SummaryError::SecurityNotFound {
                    name: name.to_string(),
                    column: key_column.letter(),
                }
            })?;
            let row = &rows[row_idx];

            let values: [f64; 6] = std::array::from_fn(|i| {
                let cell = row.get(start + i).unwrap_or(&CellValue::Empty);
                if !matches!(cell, CellValue::Number(_) | CellValue::Empty) {
                    log::debug!(
                        "{}: non-numeric {} value {:?} read as 0.0",
                        name,
                        Metric::ALL[i].label(),
                        cell
                    );
                }
                cell.as_return()
            });

            Ok(SecurityReturn::new(name.to_uppercase(), values))
        })
        .collect()
}
