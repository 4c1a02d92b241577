use crate::domain::{CleanRecord, SalesRecord};
use crate::error::{DashboardError, Result};
use crate::pipeline::clean::{clean, CleanOutcome};
use tracing::info;

/// Per-session owner of the cleaned snapshot.
///
/// The snapshot is created by [`Session::run_cleaning`], replaced wholesale
/// each time cleaning is re-run, and read-only to aggregation and
/// reporting. Until cleaning has run once, anything that needs the snapshot
/// is rejected so the shell can show a "run cleaning first" notice instead
/// of computing over nothing.
#[derive(Debug, Default)]
pub struct Session {
    cleaned: Option<Vec<CleanRecord>>,
}

impl Session {
    pub fn new() -> Self {
        Self { cleaned: None }
    }

    /// Run the cleaning pipeline and install the result as this session's
    /// snapshot, dropping any previous one.
    pub fn run_cleaning(&mut self, raw: &[SalesRecord]) -> CleanOutcome {
        let outcome = clean(raw);
        info!(rows = outcome.table.len(), "Installed cleaned snapshot");
        self.cleaned = Some(outcome.table.clone());
        outcome
    }

    pub fn has_snapshot(&self) -> bool {
        self.cleaned.is_some()
    }

    /// The current cleaned snapshot. Fails until cleaning has run once.
    pub fn cleaned(&self) -> Result<&[CleanRecord]> {
        self.cleaned
            .as_deref()
            .ok_or(DashboardError::CleaningRequired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesRecord;

    #[test]
    fn snapshot_is_gated_until_cleaning_runs() {
        let session = Session::new();
        assert!(!session.has_snapshot());
        assert!(matches!(
            session.cleaned(),
            Err(DashboardError::CleaningRequired)
        ));
    }

    #[test]
    fn rerunning_cleaning_replaces_the_snapshot_wholesale() {
        let mut session = Session::new();

        let first = vec![SalesRecord::new(
            "2023-01-15", "P001", "Laptop", "IT", 10, 25000.0, "North",
        )];
        session.run_cleaning(&first);
        assert_eq!(session.cleaned().unwrap().len(), 1);

        let second = vec![
            SalesRecord::new("2023-02-01", "P002", "Mouse", "IT", 50, 500.0, "South"),
            SalesRecord::new("2023-02-02", "P003", "Desk", "Furniture", 2, 4500.0, "East"),
        ];
        session.run_cleaning(&second);

        let snapshot = session.cleaned().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.iter().all(|r| r.product_name != "Laptop"));
    }

    #[test]
    fn cleaning_an_empty_table_still_counts_as_a_run() {
        let mut session = Session::new();
        let outcome = session.run_cleaning(&[]);
        assert!(outcome.table.is_empty());
        assert!(session.has_snapshot());
        assert_eq!(session.cleaned().unwrap().len(), 0);
    }
}
