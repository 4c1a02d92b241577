use anyhow::Result;
use sales_dashboard::domain::SalesRecord;
use sales_dashboard::pipeline::aggregate::{best_region, monthly_totals, region_totals, top_products};
use sales_dashboard::quality;
use sales_dashboard::report;
use sales_dashboard::session::Session;
use sales_dashboard::store::{CsvStore, TableStore};
use tempfile::tempdir;
use uuid::Uuid;

fn raw_record(date: &str, name: &str, quantity: &str, price: &str, region: &str) -> SalesRecord {
    SalesRecord {
        id: Uuid::new_v4(),
        date: date.to_string(),
        product_id: "P500".to_string(),
        product_name: name.to_string(),
        category: "Electronics".to_string(),
        quantity: quantity.to_string(),
        unit_price: price.to_string(),
        region: region.to_string(),
    }
}

#[test]
fn full_flow_from_seeded_file_to_recommendation() -> Result<()> {
    let dir = tempdir()?;
    let store = CsvStore::new(dir.path().join("sales_data.csv"));

    // First load seeds the two starter rows
    let records = store.load()?;
    assert_eq!(records.len(), 2);

    // Mutations: a duplicate of the first row, a non-positive quantity,
    // and an unparseable date
    let mut duplicate = records[0].clone();
    duplicate.id = Uuid::new_v4();
    store.append(duplicate)?;
    store.append(raw_record("2023-03-01", "Webcam", "0", "1500", "East"))?;
    store.append(raw_record("someday", "Headset", "5", "700", "West"))?;

    let records = store.load()?;
    assert_eq!(records.len(), 5);

    // Quality check sees all three problems without touching the table
    let quality_report = quality::check(&records);
    assert_eq!(quality_report.duplicate_rows.len(), 2);
    assert_eq!(quality_report.duplicate_extras, 1);
    assert!(!quality_report.type_mismatches.is_empty());
    assert_eq!(store.load()?.len(), 5);

    // Cleaning removes one row per problem
    let mut session = Session::new();
    let outcome = session.run_cleaning(&records);
    let counts = outcome.counts();
    assert_eq!(counts.duplicates, 1);
    assert_eq!(counts.invalid_numeric, 1);
    assert_eq!(counts.invalid_date, 1);

    let cleaned = session.cleaned()?;
    assert_eq!(cleaned.len(), 2);

    // Aggregates over the seed rows: Laptop 10 × 25 000 in the North,
    // Mouse 50 × 500 in the South, both in January 2023
    let monthly = monthly_totals(cleaned);
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].month, "2023-01");
    assert_eq!(monthly[0].total_sales, 275_000.0);

    let top = top_products(cleaned, 5);
    assert_eq!(top[0].product_name, "Mouse");

    let regions = region_totals(cleaned);
    assert_eq!(regions.len(), 2);

    let best = best_region(cleaned).unwrap();
    assert_eq!(best.region, "North");
    assert_eq!(best.total_sales, 250_000.0);

    let analysis = report::analyze(cleaned, 5);
    let recommendation = analysis.recommendation.unwrap();
    assert!(recommendation.contains("Mouse"));
    assert!(recommendation.contains("North"));

    Ok(())
}

#[test]
fn deleting_by_id_survives_a_reload() -> Result<()> {
    let dir = tempdir()?;
    let store = CsvStore::new(dir.path().join("sales_data.csv"));
    let records = store.load()?;
    let mouse_id = records[1].id;

    // A second handle to the same file sees the same ids, so ids are
    // stable identities rather than transient positions
    let second_handle = CsvStore::new(dir.path().join("sales_data.csv"));
    second_handle.delete(mouse_id)?;

    let remaining = store.load()?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].product_name, "Laptop");
    Ok(())
}

#[test]
fn cleaning_an_empty_table_flows_through_to_empty_reports() -> Result<()> {
    let dir = tempdir()?;
    let store = CsvStore::new(dir.path().join("sales_data.csv"));
    store.load()?;

    // Delete everything
    for record in store.load()? {
        store.delete(record.id)?;
    }
    let records = store.load()?;
    assert!(records.is_empty());

    let mut session = Session::new();
    let outcome = session.run_cleaning(&records);
    assert!(outcome.table.is_empty());
    assert_eq!(outcome.counts().duplicates, 0);

    let analysis = report::analyze(session.cleaned()?, 5);
    assert!(analysis.monthly_totals.is_empty());
    assert!(analysis.best_region.is_none());
    assert!(analysis.recommendation.is_none());
    Ok(())
}
