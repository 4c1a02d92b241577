use crate::domain::CleanRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Summed sales for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub total_sales: f64,
}

/// Summed quantity for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductQuantity {
    pub product_name: String,
    pub quantity: i64,
}

/// Summed sales for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    pub region: String,
    pub total_sales: f64,
}

/// Total sales per calendar month, ascending by month label.
/// The "YYYY-MM" labels sort chronologically by construction, so the map's
/// key order is the output order. Doubles as the trend chart series.
pub fn monthly_totals(records: &[CleanRecord]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.month_label()).or_insert(0.0) += record.total_sales;
    }
    totals
        .into_iter()
        .map(|(month, total_sales)| MonthlyTotal { month, total_sales })
        .collect()
}

/// Products ranked by summed quantity, descending, truncated to `limit`.
/// The sort is stable, so products with equal quantities keep their
/// first-encountered order.
pub fn top_products(records: &[CleanRecord], limit: usize) -> Vec<ProductQuantity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ProductQuantity> = Vec::new();
    for record in records {
        match index.get(record.product_name.as_str()) {
            Some(&at) => groups[at].quantity += record.quantity,
            None => {
                index.insert(&record.product_name, groups.len());
                groups.push(ProductQuantity {
                    product_name: record.product_name.clone(),
                    quantity: record.quantity,
                });
            }
        }
    }
    groups.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    groups.truncate(limit);
    groups
}

/// Total sales per region in first-encountered order, no truncation.
pub fn region_totals(records: &[CleanRecord]) -> Vec<RegionTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<RegionTotal> = Vec::new();
    for record in records {
        match index.get(record.region.as_str()) {
            Some(&at) => groups[at].total_sales += record.total_sales,
            None => {
                index.insert(&record.region, groups.len());
                groups.push(RegionTotal {
                    region: record.region.clone(),
                    total_sales: record.total_sales,
                });
            }
        }
    }
    groups
}

/// Region totals sorted descending by total, for the bar chart and the
/// top-region highlight. Stable, so ties keep first-encountered order.
pub fn region_totals_desc(records: &[CleanRecord]) -> Vec<RegionTotal> {
    let mut totals = region_totals(records);
    totals.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    totals
}

/// Region with the highest summed sales. `None` on an empty table — the
/// arg-max is undefined there and must not be forced.
pub fn best_region(records: &[CleanRecord]) -> Option<RegionTotal> {
    region_totals_desc(records).into_iter().next()
}

/// Best-selling product by summed quantity. `None` on an empty table.
pub fn best_product(records: &[CleanRecord]) -> Option<ProductQuantity> {
    top_products(records, 1).into_iter().next()
}
