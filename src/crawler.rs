use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db;
use crate::fetch;
use crate::pagination::{PageInfo, Pagination};
use crate::parser;

pub const INDEX_URL: &str = "http://www.ms.ro/acte-normative-in-transparenta/?vpage=1";
pub const DEFAULT_INSTITUTION: &str = "sanatate";
pub const PAGE_PARAM: &str = "vpage";

pub struct CrawlConfig {
    pub start_url: String,
    pub institution: String,
    pub max_pages: Option<usize>,
    pub delay: Duration,
}

/// Crawl stats returned after completion.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages: usize,
    pub saved: usize,
    pub failed: usize,
}

pub struct PageOutcome {
    pub saved: usize,
    pub failed: usize,
    pub page_info: Option<PageInfo>,
}

/// Follow the listing from `config.start_url` until the last page, saving
/// every publication as soon as its page is parsed.
pub async fn crawl(conn: &Connection, config: &CrawlConfig) -> Result<CrawlStats> {
    let client = fetch::client()?;
    let mut stats = CrawlStats::default();

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} page {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut next = Some(config.start_url.clone());
    while let Some(url) = next.take() {
        if config.max_pages.is_some_and(|max| stats.pages >= max) {
            info!("Page limit reached after {} pages", stats.pages);
            break;
        }

        info!("scraping: {} - {}", config.institution, url);
        let html = fetch::fetch_page(&client, &url).await?;
        let outcome = process_page(conn, &html, &url, &config.institution)?;

        stats.pages += 1;
        stats.saved += outcome.saved;
        stats.failed += outcome.failed;

        let Some(info) = outcome.page_info else {
            warn!("No pagination data on {}, stopping", url);
            break;
        };
        pb.set_length(info.total as u64);
        pb.set_position(info.current as u64);
        pb.set_message(format!("{} saved, {} failed", stats.saved, stats.failed));

        next = match info.step(&url, PAGE_PARAM) {
            Pagination::HasNext { page, url } => {
                debug!("Next page {} of {}: {}", page, info.total, url);
                Some(url)
            }
            Pagination::Done => {
                info!("Reached last page ({}/{})", info.current, info.total);
                None
            }
        };

        if next.is_some() && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    pb.finish_and_clear();
    info!(
        "Crawled {} pages ({} saved, {} failed blocks)",
        stats.pages, stats.saved, stats.failed
    );
    Ok(stats)
}

/// Extract and save one page. Blocks that fail extraction are logged and
/// skipped; the rest of the page is still saved.
pub fn process_page(
    conn: &Connection,
    html: &str,
    url: &str,
    institution: &str,
) -> Result<PageOutcome> {
    let page = parser::process_page(html, url, institution);

    let mut publications = Vec::with_capacity(page.publications.len());
    let mut failed = 0;
    for (i, result) in page.publications.into_iter().enumerate() {
        match result {
            Ok(p) => {
                debug!("Extracted {} ({})", p.identifier, p.publication_type);
                if p.contact.is_empty() {
                    debug!("No contact info in {}", p.identifier);
                }
                publications.push(p);
            }
            Err(e) => {
                warn!("Skipping block {} on {}: {}", i + 1, url, e);
                failed += 1;
            }
        }
    }

    let saved = db::upsert_publications(conn, &publications)?;
    Ok(PageOutcome {
        saved,
        failed,
        page_info: page.page_info,
    })
}
