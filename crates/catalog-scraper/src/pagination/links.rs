//! Link-following pagination: each page is fetched in a fresh tab and the
//! next page's URL is read from the markup's forward control.

use std::collections::HashSet;

use scraper::{Html, Selector};

use super::{Limits, PageRun, StopReason};
use crate::browser::{Browser, ReadySignal};
use crate::error::ScraperError;
use crate::extract::ProductExtractor;
use crate::fetch::fetch_markup;
use crate::markup::{has_class, parent_element, parse_selector};
use crate::normalize::resolve_link;

/// Selectors locating the forward control in a page's pagination bar.
#[derive(Debug, Clone)]
pub struct LinkControls {
    control: Selector,
    forward_marker: Selector,
    disabled_class: String,
    origin: String,
}

impl LinkControls {
    /// Builds controls from raw selectors.
    ///
    /// `control` matches every pagination link; the forward one is the control
    /// containing `forward_marker`. It is disabled when it, or its enclosing
    /// element, carries `disabled_class`. Hrefs resolve against `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if either selector fails to
    /// parse.
    pub fn new(
        control: &str,
        forward_marker: &str,
        disabled_class: &str,
        origin: &str,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            control: parse_selector(control)?,
            forward_marker: parse_selector(forward_marker)?,
            disabled_class: disabled_class.to_owned(),
            origin: origin.to_owned(),
        })
    }

    /// Shopify theme pagination as used by Foreign Fortune.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if a selector fails to parse.
    pub fn foreign_fortune(origin: &str) -> Result<Self, ScraperError> {
        Self::new(
            "ul.pagination li a.btn.btn--secondary.btn--narrow",
            "svg.icon-arrow-right",
            "btn--disabled",
            origin,
        )
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// The forward control found on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLink {
    /// Raw `href` of the enabled forward control.
    Href(String),
    /// Forward control present but disabled, or without an `href`.
    Disabled,
    Missing,
}

/// Finds the forward pagination control in `markup`.
#[must_use]
pub fn locate_next_link(markup: &str, controls: &LinkControls) -> NextLink {
    let doc = Html::parse_document(markup);

    let Some(forward) = doc
        .select(&controls.control)
        .find(|el| el.select(&controls.forward_marker).next().is_some())
    else {
        return NextLink::Missing;
    };

    let disabled = has_class(forward, &controls.disabled_class)
        || parent_element(forward).is_some_and(|p| has_class(p, &controls.disabled_class));
    if disabled {
        return NextLink::Disabled;
    }

    match forward.value().attr("href").map(str::trim) {
        Some(href) if !href.is_empty() => NextLink::Href(href.to_owned()),
        _ => NextLink::Disabled,
    }
}

/// Follows forward links from `start_url` until the catalog ends.
///
/// Each page is opened in its own tab. The walk stops on a disabled or
/// missing forward control, a link back to a visited page, an empty page,
/// the page limit, or a fetch failure. Records from pages already read are
/// kept in every case.
pub async fn follow_links<B: Browser>(
    browser: &B,
    start_url: &str,
    ready: &ReadySignal,
    extractor: &dyn ProductExtractor,
    controls: &LinkControls,
    limits: &Limits,
) -> PageRun {
    let mut visited: HashSet<String> = HashSet::new();
    let mut records = Vec::new();
    let mut pages = 0usize;
    // Same form as resolved next links, so a link back to the start is caught.
    let mut current =
        url::Url::parse(start_url).map_or_else(|_| start_url.to_owned(), String::from);

    let stop = loop {
        if pages >= limits.max_pages {
            tracing::warn!(start_url, max_pages = limits.max_pages, "page limit reached");
            break StopReason::PageLimit;
        }
        visited.insert(current.clone());

        tracing::info!(url = %current, page = pages + 1, "scraping page");
        let markup = match fetch_markup(browser, &current, ready).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!(url = %current, error = %e, "page fetch failed; stopping");
                break StopReason::FetchFailed(e.to_string());
            }
        };
        pages += 1;

        let batch = extractor.extract(&markup);
        if batch.is_empty() {
            tracing::info!(url = %current, "page has no products; stopping");
            break StopReason::EmptyPage;
        }
        records.extend(batch);

        match locate_next_link(&markup, controls) {
            NextLink::Missing => break StopReason::NoNextControl,
            NextLink::Disabled => {
                tracing::info!(url = %current, "no more pages");
                break StopReason::EndOfCatalog;
            }
            NextLink::Href(href) => {
                let Some(next) = resolve_link(controls.origin(), &href) else {
                    tracing::warn!(url = %current, href = %href, "unresolvable next link");
                    break StopReason::NoNextControl;
                };
                if visited.contains(&next) {
                    tracing::warn!(url = %current, next = %next, "next link already visited");
                    break StopReason::CycleDetected;
                }
                current = next;
            }
        }
    };

    PageRun::new(records, pages, stop)
}
