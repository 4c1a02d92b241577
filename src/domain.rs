use crate::constants;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One sales transaction as stored in the table file.
///
/// All cells except the surrogate id are carried as raw text until the
/// cleaning pipeline has validated them; the quality checks report on the
/// raw cells without mutating them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Record_ID")]
    pub id: Uuid,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "Unit Price")]
    pub unit_price: String,
    #[serde(rename = "Region")]
    pub region: String,
}

impl SalesRecord {
    /// Build a record from the typed values the entry form collects.
    /// Numeric fields are coerced to text at this boundary; no further
    /// validation happens until the quality checks or the cleaning run.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: &str,
        product_id: &str,
        product_name: &str,
        category: &str,
        quantity: i64,
        unit_price: f64,
        region: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: date.to_string(),
            product_id: product_id.to_string(),
            product_name: product_name.to_string(),
            category: category.to_string(),
            quantity: quantity.to_string(),
            unit_price: unit_price.to_string(),
            region: region.to_string(),
        }
    }

    /// The seven logical cells in column order, excluding the surrogate id.
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.date,
            &self.product_id,
            &self.product_name,
            &self.category,
            &self.quantity,
            &self.unit_price,
            &self.region,
        ]
    }

    /// True when any logical cell is empty or whitespace-only.
    pub fn has_missing_cells(&self) -> bool {
        self.cells().iter().any(|cell| cell.trim().is_empty())
    }
}

/// One sales transaction after the cleaning pipeline. Dates are parsed,
/// numeric fields are typed, and `total_sales` is derived at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub product_id: String,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_sales: f64,
    pub region: String,
}

impl CleanRecord {
    pub fn from_raw(raw: &SalesRecord, date: NaiveDate, quantity: i64, unit_price: f64) -> Self {
        Self {
            id: raw.id,
            date,
            product_id: raw.product_id.clone(),
            product_name: raw.product_name.clone(),
            category: raw.category.clone(),
            quantity,
            unit_price,
            total_sales: quantity as f64 * unit_price,
            region: raw.region.clone(),
        }
    }

    /// Year-month grouping label, e.g. "2023-01". Sorts chronologically.
    pub fn month_label(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Declared cell type for one column of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Date,
    Text,
    Integer,
    Float,
}

impl ColumnType {
    /// Whether a non-empty cell satisfies this declared type. Emptiness is
    /// the missing-value check's concern, not a type mismatch.
    pub fn matches(&self, cell: &str) -> bool {
        let cell = cell.trim();
        match self {
            ColumnType::Date => parse_date(cell).is_some(),
            ColumnType::Text => true,
            ColumnType::Integer => cell.parse::<i64>().is_ok(),
            ColumnType::Float => cell.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false),
        }
    }
}

/// One logical column with its declared type.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
}

/// Expected type per logical column, in the same order as
/// [`SalesRecord::cells`].
pub const COLUMN_SCHEMA: [Column; 7] = [
    Column { name: constants::COL_DATE, ty: ColumnType::Date },
    Column { name: constants::COL_PRODUCT_ID, ty: ColumnType::Text },
    Column { name: constants::COL_PRODUCT_NAME, ty: ColumnType::Text },
    Column { name: constants::COL_CATEGORY, ty: ColumnType::Text },
    Column { name: constants::COL_QUANTITY, ty: ColumnType::Integer },
    Column { name: constants::COL_UNIT_PRICE, ty: ColumnType::Float },
    Column { name: constants::COL_REGION, ty: ColumnType::Text },
];

/// Parse a date cell against the accepted formats, ISO first.
/// Shared by the quality checks and the cleaning pipeline so both agree on
/// what counts as a valid calendar date.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    constants::DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_date_parses() {
        assert_eq!(
            parse_date("2023-01-15"),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
    }

    #[test]
    fn slashed_dates_parse() {
        assert_eq!(
            parse_date("2023/01/15"),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert_eq!(
            parse_date("15/01/2023"),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
    }

    #[test]
    fn garbage_and_impossible_dates_do_not_parse() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2023-13-45"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn repeated_parses_are_equal() {
        assert_eq!(parse_date("2023-01-15"), parse_date("2023-01-15"));
    }

    #[test]
    fn column_types_match_expected_cells() {
        assert!(ColumnType::Integer.matches("10"));
        assert!(!ColumnType::Integer.matches("ten"));
        assert!(ColumnType::Float.matches("0.01"));
        assert!(!ColumnType::Float.matches("cheap"));
        assert!(ColumnType::Date.matches("2023-01-15"));
        assert!(!ColumnType::Date.matches("someday"));
        // Text accepts anything, even digits
        assert!(ColumnType::Text.matches("42"));
    }

    #[test]
    fn total_sales_is_derived_at_construction() {
        let raw = SalesRecord::new("2023-01-15", "P001", "Laptop", "IT", 10, 25000.0, "North");
        let date = parse_date(&raw.date).unwrap();
        let clean = CleanRecord::from_raw(&raw, date, 10, 25000.0);
        assert_eq!(clean.total_sales, 250_000.0);
        assert_eq!(clean.month_label(), "2023-01");
    }

    #[test]
    fn missing_cells_are_detected() {
        let mut record = SalesRecord::new("2023-01-15", "P001", "Laptop", "IT", 10, 25000.0, "North");
        assert!(!record.has_missing_cells());
        record.region = "  ".to_string();
        assert!(record.has_missing_cells());
    }
}
