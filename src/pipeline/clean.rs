use crate::domain::{parse_date, CleanRecord, SalesRecord};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// Rows excluded by each cleaning step, kept for display alongside the
/// counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RemovedRows {
    pub duplicates: Vec<SalesRecord>,
    pub invalid_numeric: Vec<SalesRecord>,
    pub invalid_date: Vec<SalesRecord>,
}

/// Number of rows excluded per cleaning step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemovalCounts {
    pub duplicates: usize,
    pub invalid_numeric: usize,
    pub invalid_date: usize,
}

/// Result of one cleaning run: the surviving table plus what was removed.
#[derive(Debug, Clone, Serialize)]
pub struct CleanOutcome {
    pub table: Vec<CleanRecord>,
    pub removed: RemovedRows,
}

impl CleanOutcome {
    pub fn counts(&self) -> RemovalCounts {
        RemovalCounts {
            duplicates: self.removed.duplicates.len(),
            invalid_numeric: self.removed.invalid_numeric.len(),
            invalid_date: self.removed.invalid_date.len(),
        }
    }
}

/// Run the cleaning pipeline over the raw table.
///
/// Steps run in a fixed order, each on the survivors of the previous one,
/// and counts are reported per step against that step's input:
/// 1. exact duplicates (all logical columns equal) — first occurrence kept;
/// 2. rows whose quantity or unit price is not a positive number;
/// 3. rows whose date does not parse; survivors carry the parsed date and
///    the derived total.
///
/// Malformed rows are excluded and counted, never fatal. An all-removed
/// result is a valid outcome.
pub fn clean(raw: &[SalesRecord]) -> CleanOutcome {
    let mut removed = RemovedRows::default();

    // Step 1: duplicate removal
    let mut seen = HashSet::new();
    let mut deduped: Vec<&SalesRecord> = Vec::with_capacity(raw.len());
    for record in raw {
        if seen.insert(record.cells()) {
            deduped.push(record);
        } else {
            removed.duplicates.push(record.clone());
        }
    }

    // Step 2: positive quantity and unit price, on the duplicate-free table
    let mut numeric_ok: Vec<(&SalesRecord, i64, f64)> = Vec::with_capacity(deduped.len());
    for record in deduped {
        match (parse_quantity(&record.quantity), parse_price(&record.unit_price)) {
            (Some(quantity), Some(unit_price)) if quantity > 0 && unit_price > 0.0 => {
                numeric_ok.push((record, quantity, unit_price));
            }
            _ => removed.invalid_numeric.push(record.clone()),
        }
    }

    // Step 3: date validity; surviving dates are replaced by their parsed form
    let mut table = Vec::with_capacity(numeric_ok.len());
    for (record, quantity, unit_price) in numeric_ok {
        match parse_date(&record.date) {
            Some(date) => table.push(CleanRecord::from_raw(record, date, quantity, unit_price)),
            None => removed.invalid_date.push(record.clone()),
        }
    }

    info!(
        input = raw.len(),
        kept = table.len(),
        duplicates = removed.duplicates.len(),
        invalid_numeric = removed.invalid_numeric.len(),
        invalid_date = removed.invalid_date.len(),
        "Cleaning run finished"
    );

    CleanOutcome { table, removed }
}

fn parse_quantity(cell: &str) -> Option<i64> {
    cell.trim().parse::<i64>().ok()
}

fn parse_price(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|price| price.is_finite())
}
