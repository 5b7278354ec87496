use url::Url;
use worker::Fetch;

use html_table_to_sheet::portfolio_table;

use crate::error::ApiError;

/// The portfolio page renders its tables client-side, so a fresh response
/// occasionally arrives before the markup is there. The budget below bounds
/// how often one request retries; the pipeline itself never retries.
pub const FETCH_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceReadiness {
    Ready,
    NotReady,
}

/// Pure readiness check: the page counts as ready once the reader finds a
/// non-empty portfolio table in it.
#[must_use]
pub fn probe(html: &str) -> SourceReadiness {
    if portfolio_table(html).is_empty() {
        SourceReadiness::NotReady
    } else {
        SourceReadiness::Ready
    }
}

pub async fn fetch_portfolio_html(source_url: &str) -> Result<String, ApiError> {
    let parsed = Url::parse(source_url)?;

    for attempt in 1..=FETCH_ATTEMPTS {
        let mut response = Fetch::Url(parsed.clone()).send().await?;
        let status = response.status_code();
        if status >= 400 {
            worker::console_log!(
                "portfolio fetch attempt {attempt}/{FETCH_ATTEMPTS} failed with status {status}"
            );
            continue;
        }

        let html = response.text().await?;
        if probe(&html) == SourceReadiness::Ready {
            return Ok(html);
        }
        worker::console_log!(
            "portfolio table not present on attempt {attempt}/{FETCH_ATTEMPTS}"
        );
    }

    Err(ApiError::Upstream(format!(
        "portfolio table not available at {source_url} after {FETCH_ATTEMPTS} attempts"
    )))
}
