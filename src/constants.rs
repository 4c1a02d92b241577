/// Column name constants to ensure consistency between the table file,
/// the quality checks, and the report renderers.

// On-disk column order. Record_ID is the surrogate key; the remaining
// seven columns are the logical sales columns.
pub const COL_RECORD_ID: &str = "Record_ID";
pub const COL_DATE: &str = "Date";
pub const COL_PRODUCT_ID: &str = "Product_ID";
pub const COL_PRODUCT_NAME: &str = "Product Name";
pub const COL_CATEGORY: &str = "Category";
pub const COL_QUANTITY: &str = "Quantity";
pub const COL_UNIT_PRICE: &str = "Unit Price";
pub const COL_REGION: &str = "Region";

/// Full header row of the table file, in column order.
pub const HEADER: [&str; 8] = [
    COL_RECORD_ID,
    COL_DATE,
    COL_PRODUCT_ID,
    COL_PRODUCT_NAME,
    COL_CATEGORY,
    COL_QUANTITY,
    COL_UNIT_PRICE,
    COL_REGION,
];

/// Catalog of product categories offered by the entry form.
pub const CATEGORIES: [&str; 3] = ["IT", "Furniture", "Electronics"];

/// Catalog of sales regions offered by the entry form.
pub const REGIONS: [&str; 5] = ["North", "South", "Central", "East", "West"];

/// Date formats accepted by the shared date parser, tried in order.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Default location of the sales table when no config overrides it.
pub const DEFAULT_DATA_FILE: &str = "sales_data.csv";

/// Default number of rows in the top-products ranking.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// Check whether a category is one the entry form offers.
pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.iter().any(|c| *c == category)
}

/// Check whether a region is one the entry form offers.
pub fn is_known_region(region: &str) -> bool {
    REGIONS.iter().any(|r| *r == region)
}
