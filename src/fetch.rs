use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

/// The single source page. The whole pipeline is built around this one
/// table; other pages are out of scope.
pub const PM_LIST_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_prime_ministers_of_Australia";

const MAX_RETRIES: u32 = 3;
const BASE_BACKOFF_MS: u64 = 2000;

pub struct FetchedPage {
    pub url: String,
    pub html: String,
    pub status: u16,
    pub latency_ms: i64,
}

/// One-shot page download with retry/backoff. Returns the complete
/// in-memory document; the parsing core never touches the network.
pub async fn fetch_page(url: &str) -> Result<FetchedPage> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("pm_scraper/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let mut last_err = None;
    for attempt in 1..=MAX_RETRIES {
        let t0 = Instant::now();
        match try_fetch(&client, url).await {
            Ok((status, html)) => {
                let latency_ms = t0.elapsed().as_millis() as i64;
                info!("Fetched {} ({} bytes) in {}ms", url, html.len(), latency_ms);
                return Ok(FetchedPage {
                    url: url.to_string(),
                    html,
                    status,
                    latency_ms,
                });
            }
            Err(e) => {
                warn!("Fetch attempt {}/{} failed: {}", attempt, MAX_RETRIES, e);
                last_err = Some(e);
                if attempt < MAX_RETRIES {
                    tokio::time::sleep(Duration::from_millis(BASE_BACKOFF_MS * attempt as u64))
                        .await;
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("no attempts made")))
        .context(format!("failed to fetch {} after {} attempts", url, MAX_RETRIES))
}

async fn try_fetch(client: &reqwest::Client, url: &str) -> Result<(u16, String)> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("HTTP {}", status);
    }
    Ok((status.as_u16(), resp.text().await?))
}
