//! Settings file describing where securities live and where their returns go.

use crate::cell::Column;
use crate::error::SummaryError;
use crate::summary_writer::Placement;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Comparison set written from `bond_tickers`.
pub const BONDS: &str = "bonds";
/// Comparison set written from `international_security_tickers`.
pub const INTERNATIONAL: &str = "international_securities";
/// Comparison set written from `domestic_security_tickers`.
pub const DOMESTIC: &str = "domestic_securities";

const COMPARISON_SETS: [&str; 3] = [BONDS, INTERNATIONAL, DOMESTIC];

/// Highest anchor row that still leaves room for six metric rows on a sheet.
pub const MAX_ANCHOR_ROW: u32 = 1_048_576 - 5;

/// Destination of a security looked up by full name.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedPosition {
    pub name: String,
    pub row: u32,
    pub column: Column,
}

/// Destination of a security looked up by ticker.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPosition {
    pub ticker: String,
    pub row: u32,
    pub column: Column,
}

/// Top-left cell of a best/worst comparison block.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonPosition {
    pub security_set: String,
    pub row: u32,
    pub column: Column,
}

fn default_name_column() -> Column {
    Column::from_index(3)
}

fn default_ticker_column() -> Column {
    Column::from_index(2)
}

fn default_data_start_column() -> Column {
    Column::from_index(14)
}

/// Contents of `settings.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Prefix prepended to both workbook names (include the trailing separator)
    #[serde(default)]
    pub report_path: String,
    /// Review sheet to read; the first sheet when absent
    #[serde(default)]
    pub review_sheet: Option<String>,
    /// Review column holding full security names (default D)
    #[serde(default = "default_name_column")]
    pub name_column: Column,
    /// Review column holding tickers (default C)
    #[serde(default = "default_ticker_column")]
    pub ticker_column: Column,
    /// First of the six review return columns (default O)
    #[serde(default = "default_data_start_column")]
    pub data_start_column: Column,
    pub bond_tickers: Vec<String>,
    pub international_security_tickers: Vec<String>,
    pub domestic_security_tickers: Vec<String>,
    pub total_return_positions: Vec<NamedPosition>,
    pub index_positions: Vec<TickerPosition>,
    pub comparison_positions: Vec<ComparisonPosition>,
}

impl Settings {
    /// Read and validate a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> std::result::Result<(), SummaryError> {
        let rows = self
            .total_return_positions
            .iter()
            .map(|p| (p.name.as_str(), p.row))
            .chain(self.index_positions.iter().map(|p| (p.ticker.as_str(), p.row)))
            .chain(
                self.comparison_positions
                    .iter()
                    .map(|p| (p.security_set.as_str(), p.row)),
            );
        for (owner, row) in rows {
            if row == 0 || row > MAX_ANCHOR_ROW {
                return Err(SummaryError::InvalidRow {
                    owner: owner.to_string(),
                    row,
                });
            }
        }

        for set in COMPARISON_SETS {
            self.comparison_anchor(set)?;
        }
        for position in &self.comparison_positions {
            if !COMPARISON_SETS.contains(&position.security_set.as_str()) {
                log::warn!(
                    "Ignoring comparison position for unknown security set '{}'",
                    position.security_set
                );
            }
        }

        Ok(())
    }

    /// Anchor of the named comparison set (first match wins).
    pub fn comparison_anchor(&self, set: &str) -> std::result::Result<Placement, SummaryError> {
        self.comparison_positions
            .iter()
            .find(|p| p.security_set == set)
            .map(|p| Placement {
                row: p.row,
                column: p.column,
            })
            .ok_or_else(|| SummaryError::MissingAnchor(set.to_string()))
    }

    /// Tickers configured for a comparison set.
    pub fn comparison_tickers(&self, set: &str) -> &[String] {
        match set {
            BONDS => &self.bond_tickers,
            INTERNATIONAL => &self.international_security_tickers,
            DOMESTIC => &self.domestic_security_tickers,
            _ => &[],
        }
    }

    pub fn total_return_names(&self) -> Vec<&str> {
        self.total_return_positions
            .iter()
            .map(|p| p.name.as_str())
            .collect()
    }

    pub fn total_return_placements(&self) -> Vec<Placement> {
        self.total_return_positions
            .iter()
            .map(|p| Placement {
                row: p.row,
                column: p.column,
            })
            .collect()
    }

    pub fn index_tickers(&self) -> Vec<&str> {
        self.index_positions.iter().map(|p| p.ticker.as_str()).collect()
    }

    pub fn index_placements(&self) -> Vec<Placement> {
        self.index_positions
            .iter()
            .map(|p| Placement {
                row: p.row,
                column: p.column,
            })
            .collect()
    }
}

/// All comparison sets in the order they are written.
pub fn comparison_sets() -> [&'static str; 3] {
    COMPARISON_SETS
}
