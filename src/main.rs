mod crawler;
mod db;
mod fetch;
mod pagination;
mod parser;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "transparenta_scraper",
    about = "Public consultation notices scraper (acte normative in transparenta)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the listing page by page and upsert every publication
    Crawl {
        /// First listing page
        #[arg(long, default_value = crawler::INDEX_URL)]
        url: String,
        /// Institution tag stored on every record
        #[arg(long, default_value = crawler::DEFAULT_INSTITUTION)]
        institution: String,
        /// Stop after this many pages (default: follow pagination to the end)
        #[arg(short = 'n', long)]
        max_pages: Option<usize>,
        /// Pause between page requests
        #[arg(long, default_value = "0")]
        delay_ms: u64,
        #[arg(long, default_value = db::DB_PATH)]
        db: PathBuf,
    },
    /// Parse a saved listing page and print its publications as JSON
    Parse {
        file: PathBuf,
        /// Url the page was fetched from (used for identifiers and relative links)
        #[arg(long, default_value = crawler::INDEX_URL)]
        url: String,
        #[arg(long, default_value = crawler::DEFAULT_INSTITUTION)]
        institution: String,
    },
    /// Publications overview table
    List {
        /// Filter by type code (LEGE, HG, OG, OUG, OM, OTHER)
        #[arg(short = 't', long = "type")]
        publication_type: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
        #[arg(long, default_value = db::DB_PATH)]
        db: PathBuf,
    },
    /// Show stored publication statistics
    Stats {
        #[arg(long, default_value = db::DB_PATH)]
        db: PathBuf,
    },
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
        Commands::Crawl {
            url,
            institution,
            max_pages,
            delay_ms,
            db,
        } => {
            let conn = db::connect(&db)?;
            db::init_schema(&conn)?;
            let config = crawler::CrawlConfig {
                start_url: url,
                institution,
                max_pages,
                delay: Duration::from_millis(delay_ms),
            };
            let stats = crawler::crawl(&conn, &config).await?;
            println!(
                "Done: {} pages, {} publications saved, {} blocks failed.",
                stats.pages, stats.saved, stats.failed
            );
            Ok(())
        }
        Commands::Parse {
            file,
            url,
            institution,
        } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let page = parser::process_page(&html, &url, &institution);

            let mut ok = Vec::new();
            for (i, result) in page.publications.into_iter().enumerate() {
                match result {
                    Ok(p) => ok.push(p),
                    Err(e) => eprintln!("block {}: {}", i + 1, e),
                }
            }
            println!("{}", serde_json::to_string_pretty(&ok)?);

            if let Some(info) = page.page_info {
                eprintln!("page {}/{}", info.current, info.total);
            }
            Ok(())
        }
        Commands::List {
            publication_type,
            limit,
            db,
        } => {
            let code = match publication_type.as_deref() {
                Some(t) => Some(
                    parser::classify::PublicationType::from_code(t)
                        .with_context(|| format!("Unknown publication type: {}", t))?,
                ),
                None => None,
            };

            let conn = db::connect(&db)?;
            db::init_schema(&conn)?;
            let rows = db::fetch_overview(&conn, code.map(|c| c.as_str()), limit)?;
            if rows.is_empty() {
                println!("No publications found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<5} | {:<10} | {:>4} | {:<10} | {:>4} | {:<48}",
                "#", "Type", "Date", "Days", "Deadline", "Docs", "Title"
            );
            println!("{}", "-".repeat(105));

            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<5} | {:<10} | {:>4} | {:<10} | {:>4} | {:<48}",
                    i + 1,
                    r.publication_type,
                    r.date.as_deref().unwrap_or("-"),
                    r.feedback_days,
                    r.max_feedback_date.as_deref().unwrap_or("-"),
                    r.document_count,
                    truncate(&r.title, 48)
                );
            }

            println!("\n--- Sources ---");
            for (i, r) in rows.iter().enumerate() {
                println!("{:>3}: {}", i + 1, r.identifier);
            }

            println!("\n{} publications", rows.len());
            Ok(())
        }
        Commands::Stats { db } => {
            let conn = db::connect(&db)?;
            db::init_schema(&conn)?;
            let today = chrono::Local::now().date_naive();
            let s = db::get_stats(&conn, today)?;
            println!("Total:     {}", s.total);
            println!("Dated:     {}", s.dated);
            println!("Closed:    {}", s.closed);
            for (kind, count) in &s.by_type {
                println!("  {:<7} {}", kind, count);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_long_titles() {
        assert_eq!(truncate("Ordin", 10), "Ordin");
        assert_eq!(truncate("Hotărâre de guvern", 8), "Hotărâre...");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }

    #[test]
    fn cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
