//! Cell values and single-letter cell addressing.

use crate::error::{Result, SummaryError};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Scalar value of a worksheet cell, as loaded from the review sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Numeric value, or 0.0 for anything that is not a number.
    pub fn as_return(&self) -> f64 {
        match self {
            CellValue::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// Lowercased text used to match names, `None` for non-text cells.
    pub fn lookup_key(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => Some(s.to_lowercase()),
            _ => None,
        }
    }
}

/// A single spreadsheet column letter, `A` through `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u8);

impl Column {
    /// Column from a zero-based index (0 = A). Indices past Z wrap.
    pub fn from_index(idx: usize) -> Self {
        Column((idx % 26) as u8)
    }

    /// Zero-based index (A = 0).
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// Column `n` letters to the right, wrapping Z back around to A.
    pub fn offset(self, n: usize) -> Self {
        Self::from_index(self.index() + n)
    }
}

impl FromStr for Column {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Ok(Column(c.to_ascii_uppercase() as u8 - b'A'))
            }
            _ => Err(SummaryError::InvalidColumn(s.to_string())),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Address of one destination cell (1-based row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub column: Column,
    pub row: u32,
}

impl CellRef {
    pub fn new(column: Column, row: u32) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_return_coerces_non_numbers() {
        assert_eq!(CellValue::Number(4.25).as_return(), 4.25);
        assert_eq!(CellValue::Number(-3.0).as_return(), -3.0);
        assert_eq!(CellValue::Text("N/A".to_string()).as_return(), 0.0);
        assert_eq!(CellValue::Bool(true).as_return(), 0.0);
        assert_eq!(CellValue::Empty.as_return(), 0.0);
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(
            CellValue::Text("VbTlX".to_string()).lookup_key(),
            Some("vbtlx".to_string())
        );
        assert_eq!(CellValue::Number(12.0).lookup_key(), None);
        assert_eq!(CellValue::Empty.lookup_key(), None);
    }

    #[test]
    fn test_column_parse() {
        assert_eq!("A".parse::<Column>().unwrap().index(), 0);
        assert_eq!("o".parse::<Column>().unwrap().index(), 14);
        assert_eq!(" D ".parse::<Column>().unwrap().letter(), 'D');
        assert!("AA".parse::<Column>().is_err());
        assert!("".parse::<Column>().is_err());
        assert!("3".parse::<Column>().is_err());
    }

    #[test]
    fn test_column_offset_wraps() {
        let b: Column = "B".parse().unwrap();
        assert_eq!(b.offset(2).letter(), 'D');
        let y: Column = "Y".parse().unwrap();
        assert_eq!(y.offset(1).letter(), 'Z');
        assert_eq!(y.offset(2).letter(), 'A');
        assert_eq!(y.offset(3).letter(), 'B');
    }

    #[test]
    fn test_cell_ref_display() {
        let c: Column = "h".parse().unwrap();
        assert_eq!(CellRef::new(c, 12).to_string(), "H12");
    }
}
