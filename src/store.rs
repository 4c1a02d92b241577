use crate::constants;
use crate::domain::SalesRecord;
use crate::error::{DashboardError, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Storage abstraction over the sales table.
///
/// The table is read and written whole; there is no locking or versioning,
/// so the last writer wins. Deletion is by surrogate id, never by position.
pub trait TableStore: Send + Sync {
    /// Read the full table, initializing it with seed rows if absent.
    fn load(&self) -> Result<Vec<SalesRecord>>;

    /// Replace the full table.
    fn overwrite(&self, records: &[SalesRecord]) -> Result<()>;

    /// Append one record to the end of the table.
    fn append(&self, record: SalesRecord) -> Result<()>;

    /// Remove the record with the given id, returning it.
    /// An unknown id is a precondition violation.
    fn delete(&self, id: Uuid) -> Result<SalesRecord>;
}

/// The two rows a fresh table file starts with.
pub fn seed_records() -> Vec<SalesRecord> {
    vec![
        SalesRecord::new("2023-01-15", "P001", "Laptop", "IT", 10, 25000.0, "North"),
        SalesRecord::new("2023-01-20", "P002", "Mouse", "IT", 50, 500.0, "South"),
    ]
}

/// CSV-backed table store.
///
/// Every mutation rewrites the whole file. The write goes to a sibling
/// temp file first and is renamed over the target, so an interrupted write
/// leaves the previous table intact.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl TableStore for CsvStore {
    fn load(&self) -> Result<Vec<SalesRecord>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "Table file missing, initializing with seed rows");
            self.overwrite(&seed_records())?;
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<SalesRecord>() {
            records.push(row?);
        }
        debug!(rows = records.len(), "Loaded table");
        Ok(records)
    }

    fn overwrite(&self, records: &[SalesRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp_path)?;
            writer.write_record(constants::HEADER)?;
            for record in records {
                let id = record.id.to_string();
                let cells = record.cells();
                writer.write_record([
                    id.as_str(),
                    cells[0],
                    cells[1],
                    cells[2],
                    cells[3],
                    cells[4],
                    cells[5],
                    cells[6],
                ])?;
            }
            writer.flush()?;
        }
        // Atomic replace: a crash before this point leaves the old file
        fs::rename(&tmp_path, &self.path)?;
        debug!(rows = records.len(), "Wrote table");
        Ok(())
    }

    fn append(&self, record: SalesRecord) -> Result<()> {
        let mut records = self.load()?;
        debug!(id = %record.id, product = %record.product_name, "Appending record");
        records.push(record);
        self.overwrite(&records)
    }

    fn delete(&self, id: Uuid) -> Result<SalesRecord> {
        let mut records = self.load()?;
        let position = records
            .iter()
            .position(|record| record.id == id)
            .ok_or(DashboardError::RecordNotFound(id))?;
        let removed = records.remove(position);
        self.overwrite(&records)?;
        debug!(id = %id, "Deleted record");
        Ok(removed)
    }
}

/// In-memory table store for tests and demos.
pub struct InMemoryStore {
    records: Mutex<Vec<SalesRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(seed_records()),
        }
    }

    pub fn with_records(records: Vec<SalesRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore for InMemoryStore {
    fn load(&self) -> Result<Vec<SalesRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    fn overwrite(&self, records: &[SalesRecord]) -> Result<()> {
        *self.records.lock().unwrap() = records.to_vec();
        Ok(())
    }

    fn append(&self, record: SalesRecord) -> Result<()> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<SalesRecord> {
        let mut records = self.records.lock().unwrap();
        let position = records
            .iter()
            .position(|record| record.id == id)
            .ok_or(DashboardError::RecordNotFound(id))?;
        Ok(records.remove(position))
    }
}
