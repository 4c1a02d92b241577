// Data processing pipeline: cleaning and the aggregations built on it

pub mod aggregate;
pub mod clean;

// Re-export key types and functions from each stage
pub use aggregate::{best_product, best_region, monthly_totals, region_totals, top_products};
pub use clean::{clean, CleanOutcome, RemovalCounts};
