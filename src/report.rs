use crate::constants;
use crate::domain::{CleanRecord, SalesRecord};
use crate::pipeline::aggregate::{
    best_region, monthly_totals, region_totals, top_products, MonthlyTotal, ProductQuantity,
    RegionTotal,
};
use crate::quality::QualityReport;
use crate::roles::RolePermission;
use serde::Serialize;

/// Everything the analysis screen shows, in one exportable bundle.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub monthly_totals: Vec<MonthlyTotal>,
    pub top_products: Vec<ProductQuantity>,
    pub region_totals: Vec<RegionTotal>,
    pub best_product: Option<ProductQuantity>,
    pub best_region: Option<RegionTotal>,
    pub recommendation: Option<String>,
}

/// Compute the three aggregate tables and the derived recommendations from
/// a cleaned snapshot.
pub fn analyze(records: &[CleanRecord], top_limit: usize) -> AnalysisReport {
    let top = top_products(records, top_limit);
    // The ranking is sorted before truncation, so its head is the global best
    let best_product = top.first().cloned();
    let best_region = best_region(records);
    let recommendation = recommendation(best_product.as_ref(), best_region.as_ref());

    AnalysisReport {
        monthly_totals: monthly_totals(records),
        top_products: top,
        region_totals: region_totals(records),
        best_product,
        best_region,
        recommendation,
    }
}

/// Build the business recommendation sentences from the two arg-max
/// results. Absent whenever the aggregates are empty.
pub fn recommendation(
    best_product: Option<&ProductQuantity>,
    best_region: Option<&RegionTotal>,
) -> Option<String> {
    let product = best_product?;
    let region = best_region?;
    Some(format!(
        "- Run a bundle promotion for {product} (best-selling product)\n\
         - Focus the advertising budget on the {region} region (highest sales)\n\
         - Stock up one month ahead based on the monthly trend",
        product = product.product_name,
        region = region.region,
    ))
}

/// Format an amount with thousands separators and no decimals.
/// Display-only; the underlying aggregates keep full precision.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Render a padded text table with a header rule.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        out.push_str(&format!("{:<width$}  ", header, width = widths[i]));
    }
    out.push('\n');
    for width in &widths {
        out.push_str(&"-".repeat(*width));
        out.push_str("  ");
    }
    out.push('\n');
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            out.push_str(&format!("{:<width$}  ", cell, width = widths[i]));
        }
        out.push('\n');
    }
    out
}

pub fn render_raw_table(records: &[SalesRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let mut row = vec![record.id.to_string()];
            row.extend(record.cells().iter().map(|cell| cell.to_string()));
            row
        })
        .collect();
    render_table(&constants::HEADER, &rows)
}

pub fn render_clean_table(records: &[CleanRecord]) -> String {
    let headers = [
        constants::COL_RECORD_ID,
        constants::COL_DATE,
        constants::COL_PRODUCT_ID,
        constants::COL_PRODUCT_NAME,
        constants::COL_CATEGORY,
        constants::COL_QUANTITY,
        constants::COL_UNIT_PRICE,
        "Total_Sales",
        constants::COL_REGION,
    ];
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.id.to_string(),
                record.date.format("%Y-%m-%d").to_string(),
                record.product_id.clone(),
                record.product_name.clone(),
                record.category.clone(),
                record.quantity.to_string(),
                record.unit_price.to_string(),
                format_amount(record.total_sales),
                record.region.clone(),
            ]
        })
        .collect();
    render_table(&headers, &rows)
}

pub fn render_monthly(totals: &[MonthlyTotal]) -> String {
    let rows: Vec<Vec<String>> = totals
        .iter()
        .map(|m| vec![m.month.clone(), format_amount(m.total_sales)])
        .collect();
    render_table(&["Month", "Total_Sales"], &rows)
}

pub fn render_products(products: &[ProductQuantity]) -> String {
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| vec![p.product_name.clone(), p.quantity.to_string()])
        .collect();
    render_table(&[constants::COL_PRODUCT_NAME, constants::COL_QUANTITY], &rows)
}

pub fn render_regions(regions: &[RegionTotal]) -> String {
    let rows: Vec<Vec<String>> = regions
        .iter()
        .map(|r| vec![r.region.clone(), format_amount(r.total_sales)])
        .collect();
    render_table(&[constants::COL_REGION, "Total_Sales"], &rows)
}

pub fn render_quality(report: &QualityReport) -> String {
    let mut out = String::new();

    if report.missing_rows.is_empty() {
        out.push_str("Missing values: none\n");
    } else {
        out.push_str(&format!(
            "Missing values: {} row(s)\n{}",
            report.missing_rows.len(),
            render_raw_table(&report.missing_rows)
        ));
    }
    out.push('\n');

    if report.duplicate_rows.is_empty() {
        out.push_str("Duplicates: none\n");
    } else {
        out.push_str(&format!(
            "Duplicates: {} removable row(s), full set below\n{}",
            report.duplicate_extras,
            render_raw_table(&report.duplicate_rows)
        ));
    }
    out.push('\n');

    if report.type_mismatches.is_empty() {
        out.push_str("Cell types: all cells match the declared column types\n");
    } else {
        let rows: Vec<Vec<String>> = report
            .type_mismatches
            .iter()
            .map(|m| {
                vec![
                    m.record_id.to_string(),
                    m.column.to_string(),
                    format!("{:?}", m.expected),
                    m.value.clone(),
                ]
            })
            .collect();
        out.push_str(&format!(
            "Cell types: {} mismatch(es)\n{}",
            report.type_mismatches.len(),
            render_table(&["Record_ID", "Column", "Expected", "Value"], &rows)
        ));
    }

    out
}

pub fn render_roles(matrix: &[RolePermission]) -> String {
    let rows: Vec<Vec<String>> = matrix
        .iter()
        .map(|r| {
            vec![
                r.role.to_string(),
                r.permissions.to_string(),
                r.level.to_string(),
            ]
        })
        .collect();
    render_table(&["Role", "Permissions", "Access Level"], &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_thousands_separators_and_no_decimals() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(275_000.0), "275,000");
        assert_eq!(format_amount(1_234_567.89), "1,234,568");
        assert_eq!(format_amount(-1234.56), "-1,235");
    }

    #[test]
    fn recommendation_is_absent_without_aggregates() {
        assert!(recommendation(None, None).is_none());

        let product = ProductQuantity {
            product_name: "Mouse".to_string(),
            quantity: 50,
        };
        // Both arg-max results are required
        assert!(recommendation(Some(&product), None).is_none());
    }

    #[test]
    fn recommendation_names_product_and_region() {
        let product = ProductQuantity {
            product_name: "Mouse".to_string(),
            quantity: 50,
        };
        let region = RegionTotal {
            region: "North".to_string(),
            total_sales: 250_000.0,
        };
        let text = recommendation(Some(&product), Some(&region)).unwrap();
        assert!(text.contains("Mouse"));
        assert!(text.contains("North"));
    }

    #[test]
    fn analysis_of_empty_snapshot_is_empty_but_present() {
        let report = analyze(&[], 5);
        assert!(report.monthly_totals.is_empty());
        assert!(report.top_products.is_empty());
        assert!(report.region_totals.is_empty());
        assert!(report.best_product.is_none());
        assert!(report.best_region.is_none());
        assert!(report.recommendation.is_none());
    }

    #[test]
    fn tables_pad_columns_to_content_width() {
        let out = render_table(
            &["A", "Long Header"],
            &[vec!["wide cell".to_string(), "x".to_string()]],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("A          Long Header"));
        assert!(lines[2].starts_with("wide cell  x"));
    }
}
