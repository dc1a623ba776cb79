//! Writing extracted returns into the summary layout
//!
//! Two layouts are supported:
//! - individual: a security's six returns written down one column
//! - comparison: per metric, the best and worst security of a group written
//!   across four columns (best name, best value, worst name, worst value)

use crate::cell::{CellRef, Column};
use crate::error::{Result, SummaryError};
use crate::security::{Metric, SecurityReturn};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Destination for summary cell writes.
pub trait CellSink {
    fn set_number(&mut self, cell: CellRef, value: f64);
    fn set_text(&mut self, cell: CellRef, value: &str);
}

/// Value recorded by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Written {
    Number(f64),
    Text(String),
}

/// In-memory sink keyed by A1 coordinate.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub cells: BTreeMap<String, Written>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coordinate: &str) -> Option<&Written> {
        self.cells.get(coordinate)
    }
}

impl CellSink for RecordingSink {
    fn set_number(&mut self, cell: CellRef, value: f64) {
        self.cells.insert(cell.to_string(), Written::Number(value));
    }

    fn set_text(&mut self, cell: CellRef, value: &str) {
        self.cells
            .insert(cell.to_string(), Written::Text(value.to_string()));
    }
}

/// Destination of a security's six returns (top cell of the column).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub row: u32,
    pub column: Column,
}

/// Write each record's returns vertically at its paired placement.
///
/// Records and placements are paired by index.
///
/// # Errors
/// `SummaryError::LengthMismatch` if the two lists differ in length; nothing
/// is written in that case.
pub fn write_individual(
    sink: &mut impl CellSink,
    group: &str,
    records: &[SecurityReturn],
    placements: &[Placement],
) -> Result<()> {
    if records.len() != placements.len() {
        return Err(SummaryError::LengthMismatch {
            group: group.to_string(),
            records: records.len(),
            positions: placements.len(),
        });
    }

    for (record, placement) in records.iter().zip(placements) {
        for (offset, value) in record.values().into_iter().enumerate() {
            sink.set_number(
                CellRef::new(placement.column, placement.row + offset as u32),
                value,
            );
        }
        log::debug!(
            "{}: wrote {} at {}{}",
            group,
            record.name,
            placement.column,
            placement.row
        );
    }

    Ok(())
}

/// Best and worst records of a group for one metric.
///
/// Equal maxima go to the record appearing last in `records`; equal minima go
/// to the one appearing first. Returns `None` for an empty group.
pub fn best_and_worst(
    records: &[SecurityReturn],
    metric: Metric,
) -> Option<(&SecurityReturn, &SecurityReturn)> {
    let cmp = |a: &&SecurityReturn, b: &&SecurityReturn| compare_on(metric, a, b);

    // Iterator::max_by keeps the last of equal elements, min_by the first
    let best = records.iter().max_by(cmp)?;
    let worst = records.iter().min_by(cmp)?;
    Some((best, worst))
}

/// Write the best/worst comparison for a group starting at `anchor`.
///
/// Row `anchor.row + i` holds metric `i`: best name, best value, worst name,
/// worst value in four consecutive columns (wrapping past Z).
///
/// # Errors
/// `SummaryError::EmptyGroup` if `records` is empty.
pub fn write_comparison(
    sink: &mut impl CellSink,
    group: &str,
    records: &[SecurityReturn],
    anchor: Placement,
) -> Result<()> {
    for (offset, metric) in Metric::ALL.into_iter().enumerate() {
        let (best, worst) = best_and_worst(records, metric)
            .ok_or_else(|| SummaryError::EmptyGroup(group.to_string()))?;
        let row = anchor.row + offset as u32;

        sink.set_text(CellRef::new(anchor.column, row), &best.name);
        sink.set_number(CellRef::new(anchor.column.offset(1), row), best.get(metric));
        sink.set_text(CellRef::new(anchor.column.offset(2), row), &worst.name);
        sink.set_number(CellRef::new(anchor.column.offset(3), row), worst.get(metric));

        log::debug!(
            "{} {}: best {} ({}), worst {} ({})",
            group,
            metric.label(),
            best.name,
            best.get(metric),
            worst.name,
            worst.get(metric)
        );
    }

    Ok(())
}

/// Total order of two records on one metric.
pub fn compare_on(metric: Metric, a: &SecurityReturn, b: &SecurityReturn) -> Ordering {
    a.get(metric).total_cmp(&b.get(metric))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(row: u32, column: &str) -> Placement {
        Placement {
            row,
            column: column.parse().unwrap(),
        }
    }

    fn num(v: f64) -> Option<Written> {
        Some(Written::Number(v))
    }

    fn txt(s: &str) -> Option<Written> {
        Some(Written::Text(s.to_string()))
    }

    fn aaa_bbb() -> Vec<SecurityReturn> {
        vec![
            SecurityReturn::new("AAA", [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
            SecurityReturn::new("BBB", [9.0, 8.0, 7.0, 6.0, 5.5, 4.0]),
        ]
    }

    #[test]
    fn test_write_individual_vertical_layout() {
        let mut sink = RecordingSink::new();
        let records = aaa_bbb();

        write_individual(&mut sink, "total returns", &records, &[at(10, "C"), at(20, "d")])
            .unwrap();

        assert_eq!(sink.cells.len(), 12);
        assert_eq!(sink.get("C10").cloned(), num(1.0));
        assert_eq!(sink.get("C12").cloned(), num(3.0));
        assert_eq!(sink.get("C15").cloned(), num(6.0));
        assert_eq!(sink.get("D20").cloned(), num(9.0));
        assert_eq!(sink.get("D25").cloned(), num(4.0));
    }

    #[test]
    fn test_write_individual_pairs_duplicates_by_index() {
        let mut sink = RecordingSink::new();
        let records = vec![
            SecurityReturn::new("AAA", [1.0; 6]),
            SecurityReturn::new("AAA", [1.0; 6]),
        ];

        write_individual(&mut sink, "indexes", &records, &[at(1, "A"), at(1, "B")]).unwrap();

        assert_eq!(sink.get("A1").cloned(), num(1.0));
        assert_eq!(sink.get("B1").cloned(), num(1.0));
    }

    #[test]
    fn test_write_individual_length_mismatch() {
        let mut sink = RecordingSink::new();

        let err = write_individual(&mut sink, "indexes", &aaa_bbb(), &[at(1, "A")]).unwrap_err();

        assert_eq!(
            err,
            SummaryError::LengthMismatch {
                group: "indexes".to_string(),
                records: 2,
                positions: 1,
            }
        );
        assert!(sink.cells.is_empty());
    }

    #[test]
    fn test_write_comparison_best_and_worst() {
        let mut sink = RecordingSink::new();

        write_comparison(&mut sink, "bonds", &aaa_bbb(), at(5, "B")).unwrap();

        // YTD: 1 vs 9
        assert_eq!(sink.get("B5").cloned(), txt("BBB"));
        assert_eq!(sink.get("C5").cloned(), num(9.0));
        assert_eq!(sink.get("D5").cloned(), txt("AAA"));
        assert_eq!(sink.get("E5").cloned(), num(1.0));
        // 1Y: 4 vs 6
        assert_eq!(sink.get("B8").cloned(), txt("BBB"));
        assert_eq!(sink.get("E8").cloned(), num(4.0));
        // 3Y: 5 vs 5.5
        assert_eq!(sink.get("B9").cloned(), txt("BBB"));
        assert_eq!(sink.get("C9").cloned(), num(5.5));
        // 5Y: 6 vs 4, AAA wins
        assert_eq!(sink.get("B10").cloned(), txt("AAA"));
        assert_eq!(sink.get("C10").cloned(), num(6.0));
        assert_eq!(sink.get("D10").cloned(), txt("BBB"));
        assert_eq!(sink.get("E10").cloned(), num(4.0));
        assert_eq!(sink.cells.len(), 24);
    }

    #[test]
    fn test_write_comparison_wraps_columns() {
        let mut sink = RecordingSink::new();

        write_comparison(&mut sink, "domestic", &aaa_bbb(), at(1, "Y")).unwrap();

        assert_eq!(sink.get("Y1").cloned(), txt("BBB"));
        assert_eq!(sink.get("Z1").cloned(), num(9.0));
        assert_eq!(sink.get("A1").cloned(), txt("AAA"));
        assert_eq!(sink.get("B1").cloned(), num(1.0));
    }

    #[test]
    fn test_write_comparison_empty_group() {
        let mut sink = RecordingSink::new();

        let err = write_comparison(&mut sink, "bonds", &[], at(1, "A")).unwrap_err();

        assert_eq!(err, SummaryError::EmptyGroup("bonds".to_string()));
    }

    #[test]
    fn test_best_and_worst_tie_break() {
        let records = vec![
            SecurityReturn::new("FIRST", [2.0; 6]),
            SecurityReturn::new("MIDDLE", [5.0; 6]),
            SecurityReturn::new("SECOND", [2.0; 6]),
            SecurityReturn::new("LAST", [5.0; 6]),
        ];

        let (best, worst) = best_and_worst(&records, Metric::OneYear).unwrap();

        assert_eq!(best.name, "LAST");
        assert_eq!(worst.name, "FIRST");
    }

    #[test]
    fn test_best_and_worst_single_record() {
        let records = vec![SecurityReturn::new("ONLY", [-1.0; 6])];

        let (best, worst) = best_and_worst(&records, Metric::FiveYear).unwrap();

        assert_eq!(best.name, "ONLY");
        assert_eq!(worst.name, "ONLY");
        assert!(best_and_worst(&[], Metric::FiveYear).is_none());
    }

    #[test]
    fn test_compare_on() {
        let records = aaa_bbb();
        assert_eq!(
            compare_on(Metric::YearToDate, &records[0], &records[1]),
            Ordering::Less
        );
        assert_eq!(
            compare_on(Metric::FiveYear, &records[0], &records[1]),
            Ordering::Greater
        );
    }
}
