use super::{PageRun, StopReason};
use crate::browser::{Browser, ReadySignal};
use crate::extract::ProductExtractor;
use crate::fetch::fetch_markup;

/// Fetches `url` once and extracts it. For sites whose category pages list
/// every product without pagination.
pub async fn single_page<B: Browser>(
    browser: &B,
    url: &str,
    ready: &ReadySignal,
    extractor: &dyn ProductExtractor,
) -> PageRun {
    tracing::info!(url, "scraping page");
    let markup = match fetch_markup(browser, url, ready).await {
        Ok(markup) => markup,
        Err(e) => {
            tracing::warn!(url, error = %e, "page fetch failed");
            return PageRun::failed_before_first_page(StopReason::FetchFailed(e.to_string()));
        }
    };

    let records = extractor.extract(&markup);
    if records.is_empty() {
        tracing::warn!(url, "no products found");
        return PageRun::new(records, 1, StopReason::EmptyPage);
    }
    PageRun::new(records, 1, StopReason::SinglePage)
}
