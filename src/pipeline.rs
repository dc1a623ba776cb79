//! Pipeline functions for programmatic use by the CLI.
//!
//! Runs the fixed transfer: read the review sheet, resolve the five security
//! groups, write individual returns and group comparisons into the summary
//! workbook, then save it in place.

use crate::cell::CellValue;
use crate::security::{extract, Metric, SecurityReturn};
use crate::settings::{comparison_sets, Settings};
use crate::summary_writer::{best_and_worst, write_comparison, write_individual, CellSink};
use crate::workbook::{read_sheet_rows, SummaryWorkbook};
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Resolve a workbook name against the report path prefix.
///
/// The prefix is prepended as-is, so it needs a trailing separator to act
/// as a directory. `.xlsx` is appended unless the name already ends in
/// `.xlsx` or `.xlsm`.
pub fn resolve_workbook_path(report_path: &str, file: &str) -> PathBuf {
    let file = file.trim();
    let lower = file.to_lowercase();
    if lower.ends_with(".xlsx") || lower.ends_with(".xlsm") {
        PathBuf::from(format!("{}{}", report_path, file))
    } else {
        PathBuf::from(format!("{}{}.xlsx", report_path, file))
    }
}

/// Best year-to-date performer of a comparison group.
#[derive(Debug, Clone)]
pub struct GroupLeader {
    pub group: String,
    pub securities: usize,
    pub best: String,
    pub best_ytd: f64,
}

/// Outcome of a transfer run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary_path: PathBuf,
    pub review_rows: usize,
    pub total_returns: usize,
    pub indexes: usize,
    pub leaders: Vec<GroupLeader>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary written: {}", self.summary_path.display())?;
        writeln!(f, "  Review rows: {}", self.review_rows)?;
        writeln!(f, "  Total returns: {}", self.total_returns)?;
        write!(f, "  Indexes: {}", self.indexes)?;
        for leader in &self.leaders {
            write!(
                f,
                "\n  {} ({}): best YTD {} ({})",
                leader.group, leader.securities, leader.best, leader.best_ytd
            )?;
        }
        Ok(())
    }
}

/// Security groups resolved from the review sheet.
#[derive(Debug, Clone)]
pub struct ExtractedGroups {
    pub total_returns: Vec<SecurityReturn>,
    pub indexes: Vec<SecurityReturn>,
    /// Comparison groups keyed by security set, in write order
    pub comparisons: Vec<(&'static str, Vec<SecurityReturn>)>,
}

/// Resolve all five groups against the review rows.
pub fn extract_groups(settings: &Settings, rows: &[Vec<CellValue>]) -> Result<ExtractedGroups> {
    let total_returns = extract(
        rows,
        settings.total_return_names(),
        settings.name_column,
        settings.data_start_column,
    )
    .context("Failed to resolve total return securities")?;

    let indexes = extract(
        rows,
        settings.index_tickers(),
        settings.ticker_column,
        settings.data_start_column,
    )
    .context("Failed to resolve index securities")?;

    let mut comparisons = Vec::new();
    for set in comparison_sets() {
        let records = extract(
            rows,
            settings.comparison_tickers(set),
            settings.ticker_column,
            settings.data_start_column,
        )
        .with_context(|| format!("Failed to resolve {}", set))?;
        comparisons.push((set, records));
    }

    Ok(ExtractedGroups {
        total_returns,
        indexes,
        comparisons,
    })
}

/// Write every group into `sink`, returning the per-group YTD leaders.
pub fn write_groups(
    sink: &mut impl CellSink,
    settings: &Settings,
    groups: &ExtractedGroups,
) -> Result<Vec<GroupLeader>> {
    write_individual(
        sink,
        "total returns",
        &groups.total_returns,
        &settings.total_return_placements(),
    )?;
    write_individual(sink, "indexes", &groups.indexes, &settings.index_placements())?;

    let mut leaders = Vec::new();
    for (set, records) in &groups.comparisons {
        write_comparison(sink, set, records, settings.comparison_anchor(set)?)?;
        if let Some((best, _)) = best_and_worst(records, Metric::YearToDate) {
            leaders.push(GroupLeader {
                group: set.to_string(),
                securities: records.len(),
                best: best.name.clone(),
                best_ytd: best.year_to_date,
            });
        }
    }

    Ok(leaders)
}

/// Transfer returns from the review workbook into the summary workbook.
///
/// The summary is saved only after every security resolved and every cell
/// was written; any failure leaves it untouched.
pub fn run(settings: &Settings, review_path: &Path, summary_path: &Path) -> Result<RunReport> {
    log::info!("Reading review workbook {}", review_path.display());
    let rows = read_sheet_rows(review_path, settings.review_sheet.as_deref())?;
    let groups = extract_groups(settings, &rows)?;

    log::info!("Writing summary workbook {}", summary_path.display());
    let mut summary = SummaryWorkbook::open(summary_path)?;
    let leaders = write_groups(summary.sheet_mut(), settings, &groups)?;
    let saved = summary.save()?;

    Ok(RunReport {
        summary_path: saved,
        review_rows: rows.len(),
        total_returns: groups.total_returns.len(),
        indexes: groups.indexes.len(),
        leaders,
    })
}
