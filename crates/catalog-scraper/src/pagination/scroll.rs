//! Infinite-scroll pagination: one tab for the whole session, lazy content
//! loaded by scrolling until the page height settles, next page reached by
//! clicking a forward control.

use std::time::Duration;

use super::{Limits, PageRun, StopReason};
use crate::browser::{load, Browser, ControlState, ReadySignal, Tab};
use crate::error::ScraperError;
use crate::extract::ProductExtractor;

/// Upper bound on scroll rounds per page, for pages that keep growing.
pub const MAX_SCROLL_ROUNDS: usize = 50;

/// Selectors driving a scroll+click session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickControls {
    /// Present once a listing page has rendered its products.
    pub list_selector: String,
    /// Forward control clicked to reach the next page.
    pub next_selector: String,
}

impl ClickControls {
    #[must_use]
    pub fn trader_joes() -> Self {
        Self {
            list_selector: crate::extract::TRADER_JOES_CARD.to_owned(),
            next_selector:
                ".Pagination_pagination__arrow__3TJf0.Pagination_pagination__arrow_side_right__9YUGr"
                    .to_owned(),
        }
    }
}

/// Scrolls to the bottom repeatedly until `document.body.scrollHeight` stops
/// changing across a settle interval. Returns the final height.
///
/// # Errors
///
/// Propagates script evaluation failures from the tab.
pub async fn scroll_until_stable<T: Tab>(tab: &T, settle: Duration) -> Result<u64, ScraperError> {
    let mut height = tab.scroll_height().await?;
    for _ in 0..MAX_SCROLL_ROUNDS {
        tab.scroll_to_bottom().await?;
        tokio::time::sleep(settle).await;
        let next = tab.scroll_height().await?;
        if next == height {
            return Ok(height);
        }
        tracing::debug!(from = height, to = next, "page grew after scroll");
        height = next;
    }
    tracing::warn!(
        height,
        rounds = MAX_SCROLL_ROUNDS,
        "page height did not settle; continuing with current content"
    );
    Ok(height)
}

/// Walks a click-paginated listing from `start_url` in a single tab.
///
/// The tab is closed on every exit path. Records from pages already read are
/// kept when a later load, click, or wait fails.
pub async fn scroll_and_click<B: Browser>(
    browser: &B,
    start_url: &str,
    ready: &ReadySignal,
    extractor: &dyn ProductExtractor,
    controls: &ClickControls,
    limits: &Limits,
) -> PageRun {
    let tab = match browser.open_tab().await {
        Ok(tab) => tab,
        Err(e) => {
            tracing::warn!(start_url, error = %e, "failed to open tab");
            return PageRun::failed_before_first_page(StopReason::FetchFailed(e.to_string()));
        }
    };

    let run = session(&tab, start_url, ready, extractor, controls, limits).await;
    if let Err(e) = tab.close().await {
        tracing::debug!(start_url, error = %e, "failed to close tab");
    }
    run
}

async fn session<T: Tab>(
    tab: &T,
    start_url: &str,
    ready: &ReadySignal,
    extractor: &dyn ProductExtractor,
    controls: &ClickControls,
    limits: &Limits,
) -> PageRun {
    if let Err(e) = load(tab, start_url, ready).await {
        tracing::warn!(start_url, error = %e, "start page failed to load");
        return PageRun::failed_before_first_page(StopReason::FetchFailed(e.to_string()));
    }

    let mut records = Vec::new();
    let mut pages = 0usize;

    let stop = loop {
        tracing::info!(start_url, page = pages + 1, "scraping page");
        let markup = match capture(tab, limits.settle_interval).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!(start_url, page = pages + 1, error = %e, "page capture failed; stopping");
                break StopReason::FetchFailed(e.to_string());
            }
        };
        pages += 1;

        let batch = extractor.extract(&markup);
        if batch.is_empty() {
            tracing::info!(start_url, page = pages, "page has no products; stopping");
            break StopReason::EmptyPage;
        }
        records.extend(batch);

        match tab.control_state(&controls.next_selector).await {
            Ok(ControlState::Enabled) => {}
            Ok(ControlState::Missing) => {
                tracing::info!(start_url, page = pages, "no next button; stopping");
                break StopReason::NoNextControl;
            }
            Ok(ControlState::Disabled) => {
                tracing::info!(start_url, page = pages, "next button disabled; stopping");
                break StopReason::EndOfCatalog;
            }
            Err(e) => {
                tracing::warn!(start_url, page = pages, error = %e, "could not inspect next button");
                break StopReason::ControlFailed(e.to_string());
            }
        }

        // Another page exists; stop before clicking if the limit is reached.
        if pages >= limits.max_pages {
            tracing::warn!(start_url, max_pages = limits.max_pages, "page limit reached");
            break StopReason::PageLimit;
        }

        if let Err(e) = advance(tab, controls, limits.selector_timeout).await {
            tracing::warn!(start_url, page = pages, error = %e, "error clicking next button");
            break StopReason::ControlFailed(e.to_string());
        }
    };

    PageRun::new(records, pages, stop)
}

async fn capture<T: Tab>(tab: &T, settle: Duration) -> Result<String, ScraperError> {
    scroll_until_stable(tab, settle).await?;
    tab.content().await
}

async fn advance<T: Tab>(
    tab: &T,
    controls: &ClickControls,
    selector_timeout: Duration,
) -> Result<(), ScraperError> {
    tab.click(&controls.next_selector).await?;
    tab.wait_for_navigation().await?;
    tab.wait_for_selector(&controls.list_selector, selector_timeout)
        .await
}
