//! Single-page fetch: open a tab, load, capture markup, close.

use crate::browser::{load, Browser, ReadySignal, Tab};
use crate::error::ScraperError;

/// Fetches the rendered markup of `url` in a fresh tab.
///
/// The tab is closed on every exit path; a close failure is logged and does
/// not mask the fetch result.
///
/// # Errors
///
/// Propagates any failure opening the tab, navigating, waiting for `ready`,
/// or reading the page content.
pub async fn fetch_markup<B: Browser>(
    browser: &B,
    url: &str,
    ready: &ReadySignal,
) -> Result<String, ScraperError> {
    let tab = browser.open_tab().await?;
    let result = capture(&tab, url, ready).await;
    if let Err(e) = tab.close().await {
        tracing::debug!(url, error = %e, "failed to close tab");
    }
    result
}

async fn capture<T: Tab>(tab: &T, url: &str, ready: &ReadySignal) -> Result<String, ScraperError> {
    load(tab, url, ready).await?;
    tab.content().await
}
