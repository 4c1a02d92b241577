use crate::domain::{ColumnType, SalesRecord, COLUMN_SCHEMA};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

/// One cell whose content does not satisfy its column's declared type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeMismatch {
    pub record_id: Uuid,
    pub column: &'static str,
    pub expected: ColumnType,
    pub value: String,
}

/// Outcome of the read-only data-quality checks.
///
/// `duplicate_rows` holds every row that has at least one twin (for
/// display); `duplicate_extras` counts only the removable copies beyond
/// each first occurrence. The two answer different questions and are both
/// kept.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub missing_rows: Vec<SalesRecord>,
    pub duplicate_rows: Vec<SalesRecord>,
    pub duplicate_extras: usize,
    pub type_mismatches: Vec<TypeMismatch>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.missing_rows.is_empty()
            && self.duplicate_rows.is_empty()
            && self.type_mismatches.is_empty()
    }
}

/// Inspect the raw table without mutating it.
pub fn check(raw: &[SalesRecord]) -> QualityReport {
    let missing_rows: Vec<SalesRecord> = raw
        .iter()
        .filter(|record| record.has_missing_cells())
        .cloned()
        .collect();

    // Count occurrences of each full-row key, then collect every row whose
    // key occurs more than once. Extras are the copies beyond first.
    let mut occurrences: HashMap<[&str; 7], usize> = HashMap::new();
    for record in raw {
        *occurrences.entry(record.cells()).or_insert(0) += 1;
    }
    let duplicate_rows: Vec<SalesRecord> = raw
        .iter()
        .filter(|record| occurrences[&record.cells()] > 1)
        .cloned()
        .collect();
    let duplicate_extras = occurrences
        .values()
        .filter(|&&count| count > 1)
        .map(|&count| count - 1)
        .sum();

    let mut type_mismatches = Vec::new();
    for record in raw {
        for (column, cell) in COLUMN_SCHEMA.iter().zip(record.cells()) {
            // Empty cells are reported as missing, not as the wrong type
            if cell.trim().is_empty() {
                continue;
            }
            if !column.ty.matches(cell) {
                type_mismatches.push(TypeMismatch {
                    record_id: record.id,
                    column: column.name,
                    expected: column.ty,
                    value: cell.to_string(),
                });
            }
        }
    }

    info!(
        rows = raw.len(),
        missing = missing_rows.len(),
        duplicates = duplicate_extras,
        mismatches = type_mismatches.len(),
        "Quality check finished"
    );

    QualityReport {
        missing_rows,
        duplicate_rows,
        duplicate_extras,
        type_mismatches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesRecord;

    fn record(date: &str, name: &str, quantity: &str, price: &str) -> SalesRecord {
        SalesRecord {
            id: Uuid::new_v4(),
            date: date.to_string(),
            product_id: "P001".to_string(),
            product_name: name.to_string(),
            category: "IT".to_string(),
            quantity: quantity.to_string(),
            unit_price: price.to_string(),
            region: "North".to_string(),
        }
    }

    #[test]
    fn clean_table_reports_nothing() {
        let raw = vec![
            record("2023-01-15", "Laptop", "10", "25000"),
            record("2023-01-20", "Mouse", "50", "500"),
        ];
        let report = check(&raw);
        assert!(report.is_clean());
        assert_eq!(report.duplicate_extras, 0);
    }

    #[test]
    fn missing_cells_are_listed() {
        let mut incomplete = record("2023-01-15", "Laptop", "10", "25000");
        incomplete.region = String::new();
        let raw = vec![incomplete, record("2023-01-20", "Mouse", "50", "500")];

        let report = check(&raw);
        assert_eq!(report.missing_rows.len(), 1);
        assert_eq!(report.missing_rows[0].product_name, "Laptop");
    }

    #[test]
    fn duplicate_set_and_extras_are_reported_separately() {
        let a = record("2023-01-15", "Laptop", "10", "25000");
        let mut a_twin = a.clone();
        a_twin.id = Uuid::new_v4(); // same cells, different surrogate id
        let b = record("2023-01-20", "Mouse", "50", "500");
        let raw = vec![a, a_twin, b];

        let report = check(&raw);
        // Both copies are shown, but only one is removable
        assert_eq!(report.duplicate_rows.len(), 2);
        assert_eq!(report.duplicate_extras, 1);
    }

    #[test]
    fn type_mismatches_name_column_and_value() {
        let raw = vec![
            record("someday", "Laptop", "ten", "25000"),
            record("2023-01-20", "Mouse", "50", "cheap"),
        ];
        let report = check(&raw);

        assert_eq!(report.type_mismatches.len(), 3);
        let columns: Vec<&str> = report.type_mismatches.iter().map(|m| m.column).collect();
        assert!(columns.contains(&"Date"));
        assert!(columns.contains(&"Quantity"));
        assert!(columns.contains(&"Unit Price"));
    }

    #[test]
    fn empty_table_is_clean() {
        let report = check(&[]);
        assert!(report.is_clean());
        assert_eq!(report.duplicate_extras, 0);
    }
}
