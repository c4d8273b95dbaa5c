use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;
const TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("transparenta_scraper/", env!("CARGO_PKG_VERSION"));

pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")
}

enum Attempt {
    Done(String),
    Retry(String),
    Fail(anyhow::Error),
}

/// GET a listing page, retrying rate limits, server errors and transport
/// failures with exponential backoff.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let mut last_error = String::new();

    for attempt in 0..=MAX_RETRIES {
        match fetch_once(client, url).await {
            Attempt::Done(body) => return Ok(body),
            Attempt::Fail(e) => return Err(e),
            Attempt::Retry(reason) => last_error = reason,
        }

        if attempt == MAX_RETRIES {
            break;
        }

        let backoff = Duration::from_millis(BASE_BACKOFF_MS * 2u64.pow(attempt));
        warn!(
            "Fetch of {} failed: {} (attempt {}/{}), backing off {:.1}s",
            url,
            last_error,
            attempt + 1,
            MAX_RETRIES,
            backoff.as_secs_f64()
        );
        tokio::time::sleep(backoff).await;
    }

    Err(anyhow!(
        "Giving up on {} after {} retries: {}",
        url,
        MAX_RETRIES,
        last_error
    ))
}

async fn fetch_once(client: &Client, url: &str) -> Attempt {
    let start = Instant::now();
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => return Attempt::Retry(e.to_string()),
    };

    let status = response.status();
    if should_retry(status) {
        return Attempt::Retry(format!("HTTP {}", status));
    }
    if !status.is_success() {
        return Attempt::Fail(anyhow!("HTTP {} for {}", status, url));
    }

    match response.text().await {
        Ok(body) => {
            debug!(
                "Fetched {} ({} bytes, {}ms)",
                url,
                body.len(),
                start.elapsed().as_millis()
            );
            Attempt::Done(body)
        }
        Err(e) => Attempt::Retry(e.to_string()),
    }
}

fn should_retry(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
