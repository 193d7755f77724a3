mod db;
mod error;
mod fetch;
mod html;
mod parser;
mod report;

use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pm_scraper", about = "Australian Prime Ministers lifespan scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the Wikipedia page and cache it
    Fetch,
    /// Parse the cached page into records
    Process {
        /// Abort the run on the first bad row instead of skipping it
        #[arg(long)]
        strict: bool,
    },
    /// Fetch + process in one pipeline
    Run {
        /// Abort the run on the first bad row instead of skipping it
        #[arg(long)]
        strict: bool,
    },
    /// Report table (Name, Born, Died, Age)
    Table,
    /// Lifespan timeline chart
    Chart {
        /// Chart width in columns
        #[arg(short, long, default_value = "60")]
        width: usize,
    },
    /// Records as JSON
    Export,
    /// Cache and parsing statistics
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let page = fetch::fetch_page(fetch::PM_LIST_URL).await?;
            db::save_page(&conn, &page)?;
            println!("Cached {} ({} bytes)", page.url, page.html.len());
            Ok(())
        }
        Commands::Process { strict } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let Some(page_html) = db::load_page(&conn, fetch::PM_LIST_URL)? else {
                println!("No cached page. Run 'fetch' first.");
                return Ok(());
            };
            process_and_save(&conn, &page_html, strict)?;
            Ok(())
        }
        Commands::Run { strict } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let page = fetch::fetch_page(fetch::PM_LIST_URL).await?;
            db::save_page(&conn, &page)?;
            process_and_save(&conn, &page.html, strict)?;
            Ok(())
        }
        Commands::Table => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let records = db::fetch_records(&conn)?;
            report::print_table(&records);
            Ok(())
        }
        Commands::Chart { width } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let records = db::fetch_records(&conn)?;
            report::print_chart(&records, width);
            Ok(())
        }
        Commands::Export => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let records = db::fetch_records(&conn)?;
            println!("{}", report::to_json(&records)?);
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Pages cached: {}", s.pages);
            println!("Records:      {}", s.records);
            println!("Living:       {}", s.living);
            println!("Skipped:      {}", s.skipped);
            for row in db::fetch_skipped(&conn)? {
                println!("  skipped {:?}: {}", report::truncate(&row.text, 48), row.reason);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn process_and_save(
    conn: &rusqlite::Connection,
    page_html: &str,
    strict: bool,
) -> anyhow::Result<()> {
    let outcome = parser::process_page(page_html, strict)?;
    db::replace_records(conn, &outcome.records, &outcome.skipped)?;
    println!(
        "Saved {} records ({} rows skipped).",
        outcome.records.len(),
        outcome.skipped.len()
    );
    for s in &outcome.skipped {
        println!("  skipped {:?}: {}", report::truncate(&s.text, 48), s.reason);
    }
    Ok(())
}
