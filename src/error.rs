//! Error types for extraction, layout and writing.

use thiserror::Error;

/// Result type for summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors raised while resolving securities or laying out the summary.
#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    /// A requested name or ticker has no row in the review sheet
    #[error("Security '{name}' not found in review column {column}")]
    SecurityNotFound {
        /// Name as requested (original case)
        name: String,
        /// Key column that was searched
        column: char,
    },

    /// Records and positions do not pair up one-to-one
    #[error("{group}: {records} securities but {positions} positions")]
    LengthMismatch {
        /// Group being written
        group: String,
        /// Number of extracted records
        records: usize,
        /// Number of configured positions
        positions: usize,
    },

    /// A comparison needs at least one security
    #[error("Comparison group '{0}' has no securities")]
    EmptyGroup(String),

    /// Column is not a single letter A-Z
    #[error("Invalid column '{0}': expected a single letter A-Z")]
    InvalidColumn(String),

    /// Rows are 1-based and must leave room for six metric rows
    #[error("Invalid row {row} for {owner}: expected 1 to 1048571")]
    InvalidRow {
        /// Security or group the row belongs to
        owner: String,
        /// Offending row
        row: u32,
    },

    /// No comparison anchor configured for a security set
    #[error("No comparison position configured for security set '{0}'")]
    MissingAnchor(String),
}
