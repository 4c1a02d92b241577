/// Demo: Run the complete dashboard flow against an in-memory table
/// Quality check → Cleaning → Aggregation → Recommendations
use sales_dashboard::{
    constants, logging,
    domain::SalesRecord,
    quality,
    report,
    session::Session,
    store::{InMemoryStore, TableStore},
};
use uuid::Uuid;

fn dirty_record(date: &str, name: &str, quantity: &str, price: &str, region: &str) -> SalesRecord {
    SalesRecord {
        id: Uuid::new_v4(),
        date: date.to_string(),
        product_id: "P900".to_string(),
        product_name: name.to_string(),
        category: "IT".to_string(),
        quantity: quantity.to_string(),
        unit_price: price.to_string(),
        region: region.to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    println!("\n🚀 DASHBOARD PIPELINE DEMO");
    println!("{}", "=".repeat(60));

    // Seed rows plus a handful of rows the pipeline should reject
    let store = InMemoryStore::new();
    store.append(SalesRecord::new(
        "2023-02-10", "P003", "Keyboard", "IT", 20, 900.0, "Central",
    ))?;
    let duplicate = {
        let records = store.load()?;
        let mut copy = records[0].clone();
        copy.id = Uuid::new_v4();
        copy
    };
    store.append(duplicate)?;
    store.append(dirty_record("2023-02-12", "Webcam", "0", "1500", "East"))?;
    store.append(dirty_record("someday", "Headset", "5", "700", "West"))?;
    store.append(dirty_record("2023-02-15", "Monitor", "three", "5200", "North"))?;

    let records = store.load()?;
    println!("Input table: {} rows", records.len());

    // Step 1: quality check
    println!("\n🔎 Step 1: Quality check");
    let quality_report = quality::check(&records);
    print!("{}", report::render_quality(&quality_report));

    // Step 2: cleaning
    println!("\n🧹 Step 2: Cleaning");
    let mut session = Session::new();
    let outcome = session.run_cleaning(&records);
    let counts = outcome.counts();
    println!("   Duplicates removed:      {}", counts.duplicates);
    println!("   Invalid numbers removed: {}", counts.invalid_numeric);
    println!("   Invalid dates removed:   {}", counts.invalid_date);
    println!("   Surviving rows:          {}", outcome.table.len());

    // Step 3: aggregation and recommendations
    println!("\n📊 Step 3: Analysis");
    let analysis = report::analyze(session.cleaned()?, constants::DEFAULT_TOP_PRODUCTS);
    print!("{}", report::render_monthly(&analysis.monthly_totals));
    println!();
    print!("{}", report::render_products(&analysis.top_products));
    println!();
    print!("{}", report::render_regions(&analysis.region_totals));

    if let Some(text) = &analysis.recommendation {
        println!("\n💡 Business recommendations:\n{}", text);
    }

    println!("\n✅ Demo finished");
    Ok(())
}
