use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use sales_dashboard::chart;
use sales_dashboard::config::Config;
use sales_dashboard::constants;
use sales_dashboard::domain::{CleanRecord, SalesRecord};
use sales_dashboard::error::DashboardError;
use sales_dashboard::logging;
use sales_dashboard::pipeline::aggregate::{monthly_totals, region_totals_desc};
use sales_dashboard::pipeline::clean::CleanOutcome;
use sales_dashboard::quality;
use sales_dashboard::report;
use sales_dashboard::roles;
use sales_dashboard::session::Session;
use sales_dashboard::store::{CsvStore, TableStore};

#[derive(Parser)]
#[command(name = "sales_dashboard")]
#[command(about = "Sales analytics dashboard over a flat CSV transaction table")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path of the sales table file (overrides config.toml)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current sales table
    List,
    /// Append one sales record
    Add {
        /// Sale date, e.g. 2023-01-15
        #[arg(long)]
        date: String,
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        product_name: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        quantity: i64,
        #[arg(long)]
        unit_price: f64,
        #[arg(long)]
        region: String,
    },
    /// Delete a record by its id
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Run the data-quality checks
    Quality {
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Run the cleaning pipeline and report what was removed
    Clean {
        #[arg(long)]
        json: bool,
    },
    /// Clean the table, compute the aggregates, and print the summary
    Analyze {
        #[arg(long)]
        json: bool,
    },
    /// Render the monthly trend and regional bar charts as PNGs
    Charts,
    /// Show the role/permission reference matrix
    Roles,
    /// Interactive menu holding one session across actions
    Dashboard,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load_or_default()?;

    let data_file = cli
        .data_file
        .unwrap_or_else(|| config.storage.data_file.clone());
    let store: Arc<dyn TableStore> = Arc::new(CsvStore::new(data_file));

    match cli.command {
        Commands::List => {
            let records = store.load()?;
            println!("📄 Sales table ({} rows):\n", records.len());
            print!("{}", report::render_raw_table(&records));
        }
        Commands::Add {
            date,
            product_id,
            product_name,
            category,
            quantity,
            unit_price,
            region,
        } => {
            if !constants::is_known_category(&category) {
                warn!(category = %category, "Category is not in the entry-form catalog");
                println!("⚠️  Unknown category '{}' (known: {})", category, constants::CATEGORIES.join(", "));
            }
            if !constants::is_known_region(&region) {
                warn!(region = %region, "Region is not in the entry-form catalog");
                println!("⚠️  Unknown region '{}' (known: {})", region, constants::REGIONS.join(", "));
            }

            let record = SalesRecord::new(
                &date,
                &product_id,
                &product_name,
                &category,
                quantity,
                unit_price,
                &region,
            );
            let id = record.id;
            store.append(record)?;
            info!(%id, "Record appended");
            println!("✅ Record saved with id {}", id);
        }
        Commands::Delete { id } => match store.delete(id) {
            Ok(removed) => {
                println!("🗑️  Deleted record {} ({})", id, removed.product_name);
            }
            Err(e) => {
                error!("Delete failed: {}", e);
                println!("❌ Delete failed: {}", e);
            }
        },
        Commands::Quality { json } => {
            let records = store.load()?;
            let quality_report = quality::check(&records);
            if json {
                println!("{}", serde_json::to_string_pretty(&quality_report)?);
            } else {
                println!("🔎 Data quality check over {} rows:\n", records.len());
                print!("{}", report::render_quality(&quality_report));
            }
        }
        Commands::Clean { json } => {
            let records = store.load()?;
            let mut session = Session::new();
            let outcome = session.run_cleaning(&records);
            if json {
                print_clean_json(&outcome)?;
            } else {
                print_clean_outcome(&outcome);
            }
        }
        Commands::Analyze { json } => {
            let records = store.load()?;
            let mut session = Session::new();
            session.run_cleaning(&records);
            let analysis = report::analyze(session.cleaned()?, config.analytics.top_products);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
        }
        Commands::Charts => {
            let records = store.load()?;
            let mut session = Session::new();
            session.run_cleaning(&records);
            render_charts(&config, session.cleaned()?)?;
        }
        Commands::Roles => {
            print_roles();
        }
        Commands::Dashboard => {
            run_dashboard(store.as_ref(), &config)?;
        }
    }
    Ok(())
}

fn print_clean_outcome(outcome: &CleanOutcome) {
    let counts = outcome.counts();
    println!("🧹 Cleaning finished");
    println!("   Duplicates removed:      {}", counts.duplicates);
    println!("   Invalid numbers removed: {}", counts.invalid_numeric);
    println!("   Invalid dates removed:   {}", counts.invalid_date);

    if !outcome.removed.duplicates.is_empty() {
        println!("\nDuplicate rows removed:");
        print!("{}", report::render_raw_table(&outcome.removed.duplicates));
    }
    if !outcome.removed.invalid_numeric.is_empty() {
        println!("\nRows with non-positive or unparseable numbers:");
        print!("{}", report::render_raw_table(&outcome.removed.invalid_numeric));
    }
    if !outcome.removed.invalid_date.is_empty() {
        println!("\nRows with invalid dates:");
        print!("{}", report::render_raw_table(&outcome.removed.invalid_date));
    }

    println!("\nCleaned table ({} rows):", outcome.table.len());
    print!("{}", report::render_clean_table(&outcome.table));
}

fn print_clean_json(outcome: &CleanOutcome) -> Result<(), DashboardError> {
    let payload = serde_json::json!({
        "counts": outcome.counts(),
        "removed": outcome.removed,
        "table": outcome.table,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn print_analysis(analysis: &report::AnalysisReport) {
    println!("📊 Monthly sales totals:\n");
    print!("{}", report::render_monthly(&analysis.monthly_totals));

    println!("\n🏆 Top products by quantity:\n");
    print!("{}", report::render_products(&analysis.top_products));

    println!("\n🗺️  Sales by region:\n");
    print!("{}", report::render_regions(&analysis.region_totals));

    match &analysis.recommendation {
        Some(text) => println!("\n💡 Business recommendations:\n{}", text),
        None => println!("\nℹ️  No data after cleaning, nothing to recommend"),
    }
}

fn print_roles() {
    println!("🔐 Role-based access reference:\n");
    print!("{}", report::render_roles(&roles::ROLE_MATRIX));
    println!("\nTechnical safeguards:");
    for item in roles::TECHNICAL_SAFEGUARDS {
        println!("  - {}", item);
    }
    println!("Administrative safeguards:");
    for item in roles::ADMINISTRATIVE_SAFEGUARDS {
        println!("  - {}", item);
    }
}

fn render_charts(config: &Config, cleaned: &[CleanRecord]) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(&config.charts.output_dir)?;

    let trend_path = config.charts.output_dir.join("monthly_trend.png");
    let bars_path = config.charts.output_dir.join("region_totals.png");

    let monthly = monthly_totals(cleaned);
    let regions = region_totals_desc(cleaned);

    if monthly.is_empty() && regions.is_empty() {
        println!("ℹ️  No data after cleaning, nothing to chart");
        return Ok(());
    }

    chart::render_monthly_trend(&monthly, &trend_path, config.charts.width, config.charts.height)?;
    chart::render_region_bars(&regions, &bars_path, config.charts.width, config.charts.height)?;

    println!("📈 Wrote {}", trend_path.display());
    println!("📊 Wrote {}", bars_path.display());
    Ok(())
}

// Interactive dashboard shell

fn prompt(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Menu loop mirroring the dashboard screens. One `Session` lives for the
/// whole loop, so analysis and visualization are gated on a cleaning run.
fn run_dashboard(store: &dyn TableStore, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();

    loop {
        println!("\n════ Sales Analytics Dashboard ════");
        println!("  0. Manage data (add/delete)");
        println!("  1. Data quality check");
        println!("  2. Clean data");
        println!("  3. Analyze data");
        println!("  4. Data security");
        println!("  5. Visualization");
        println!("  q. Quit");

        match prompt("Select")?.as_str() {
            "0" => manage_data(store)?,
            "1" => {
                let records = store.load()?;
                let quality_report = quality::check(&records);
                print!("{}", report::render_quality(&quality_report));
            }
            "2" => {
                let records = store.load()?;
                let outcome = session.run_cleaning(&records);
                print_clean_outcome(&outcome);
            }
            "3" => match session.cleaned() {
                Ok(cleaned) => {
                    let analysis = report::analyze(cleaned, config.analytics.top_products);
                    print_analysis(&analysis);
                }
                Err(DashboardError::CleaningRequired) => {
                    println!("⚠️  Run cleaning (menu 2) first");
                }
                Err(e) => return Err(e.into()),
            },
            "4" => print_roles(),
            "5" => match session.cleaned() {
                Ok(cleaned) => render_charts(config, cleaned)?,
                Err(DashboardError::CleaningRequired) => {
                    println!("⚠️  Run cleaning (menu 2) first");
                }
                Err(e) => return Err(e.into()),
            },
            "q" | "Q" => break,
            other => println!("Unknown choice: {}", other),
        }
    }

    Ok(())
}

fn manage_data(store: &dyn TableStore) -> Result<(), Box<dyn std::error::Error>> {
    let records = store.load()?;
    print!("{}", report::render_raw_table(&records));

    match prompt("(a)dd, (d)elete, or (b)ack")?.as_str() {
        "a" => {
            let date = prompt("Sale date (e.g. 2023-01-15)")?;
            let product_id = prompt("Product id")?;
            let product_name = prompt("Product name")?;
            let category = prompt(&format!("Category [{}]", constants::CATEGORIES.join("/")))?;
            let quantity: i64 = match prompt("Quantity")?.parse() {
                Ok(quantity) => quantity,
                Err(_) => {
                    println!("⚠️  Quantity must be an integer, aborting");
                    return Ok(());
                }
            };
            let unit_price: f64 = match prompt("Unit price")?.parse() {
                Ok(unit_price) => unit_price,
                Err(_) => {
                    println!("⚠️  Unit price must be a number, aborting");
                    return Ok(());
                }
            };
            let region = prompt(&format!("Region [{}]", constants::REGIONS.join("/")))?;

            let record = SalesRecord::new(
                &date,
                &product_id,
                &product_name,
                &category,
                quantity,
                unit_price,
                &region,
            );
            let id = record.id;
            store.append(record)?;
            println!("✅ Record saved with id {}", id);
        }
        "d" => {
            let id: Uuid = match prompt("Record id")?.parse() {
                Ok(id) => id,
                Err(_) => {
                    println!("⚠️  Not a valid id, aborting");
                    return Ok(());
                }
            };
            match store.delete(id) {
                Ok(removed) => println!("🗑️  Deleted record {} ({})", id, removed.product_name),
                Err(e) => println!("❌ Delete failed: {}", e),
            }
        }
        _ => {}
    }

    Ok(())
}
