//! Portfolio Summary
//!
//! Transfers security returns from a portfolio review workbook into the
//! fixed layout of a portfolio summary workbook.
//!
//! This library provides:
//! - `security`: Name/ticker resolution and return extraction from review rows
//! - `summary_writer`: Individual and best/worst comparison layouts
//! - `workbook`: Review sheet loading and in-place summary editing
//! - `settings`: The `settings.json` layout description
//! - `pipeline`: The full transfer as run by the CLI
//!
//! Binaries:
//! - `sumgen`: Interactive transfer tool

pub mod cell;
pub mod error;
pub mod pipeline;
pub mod security;
pub mod settings;
pub mod summary_writer;
pub mod workbook;

pub use cell::{CellRef, CellValue, Column};
pub use error::SummaryError;
pub use security::{extract, Metric, SecurityReturn};
pub use settings::Settings;
pub use summary_writer::{write_comparison, write_individual, CellSink, Placement};
