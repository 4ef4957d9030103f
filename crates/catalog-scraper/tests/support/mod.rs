//! In-memory browser used by the pagination and orchestrator tests.
//!
//! Two modes share one fake:
//! - URL pages: `goto(url)` loads the markup registered for `url`. Used by
//!   link-following and single-page drivers.
//! - Click listings: a scripted sequence of pages, each with its own height
//!   progression, next-control state, and click outcome. `click` advances to
//!   the next page in the sequence.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use catalog_scraper::{Browser, ControlState, ScraperError, Tab};

/// One page of a click-paginated listing.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub markup: String,
    /// Successive `scrollHeight` readings; the last one repeats.
    pub heights: Vec<u64>,
    pub next: ControlState,
    pub click_fails: bool,
    /// The click succeeds but the list never shows up on the next page.
    pub wait_fails: bool,
}

impl ListingPage {
    pub fn new(markup: impl Into<String>, next: ControlState) -> Self {
        Self {
            markup: markup.into(),
            heights: vec![1000],
            next,
            click_fails: false,
            wait_fails: false,
        }
    }

    pub fn with_heights(mut self, heights: &[u64]) -> Self {
        self.heights = heights.to_vec();
        self
    }

    pub fn failing_click(mut self) -> Self {
        self.click_fails = true;
        self
    }

    pub fn failing_wait(mut self) -> Self {
        self.wait_fails = true;
        self
    }
}

#[derive(Default)]
struct Inner {
    pages: Mutex<HashMap<String, String>>,
    failing: Mutex<HashSet<String>>,
    missing_selector: Mutex<HashSet<String>>,
    listing: Mutex<Vec<ListingPage>>,
    visits: Mutex<Vec<String>>,
    tabs_opened: AtomicUsize,
    tabs_closed: AtomicUsize,
    scrolls: AtomicUsize,
    clicks: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct FakeBrowser {
    inner: Arc<Inner>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, markup: impl Into<String>) -> Self {
        self.inner
            .pages
            .lock()
            .unwrap()
            .insert(url.to_string(), markup.into());
        self
    }

    /// `goto(url)` fails with a navigation error.
    pub fn with_failing(self, url: &str) -> Self {
        self.inner.failing.lock().unwrap().insert(url.to_string());
        self
    }

    /// `url` loads, but `wait_for_selector` times out on it.
    pub fn with_missing_selector(self, url: &str) -> Self {
        self.inner
            .missing_selector
            .lock()
            .unwrap()
            .insert(url.to_string());
        self
    }

    pub fn with_listing(self, pages: Vec<ListingPage>) -> Self {
        *self.inner.listing.lock().unwrap() = pages;
        self
    }

    pub fn visits(&self) -> Vec<String> {
        self.inner.visits.lock().unwrap().clone()
    }

    pub fn tabs_opened(&self) -> usize {
        self.inner.tabs_opened.load(Ordering::SeqCst)
    }

    pub fn tabs_closed(&self) -> usize {
        self.inner.tabs_closed.load(Ordering::SeqCst)
    }

    pub fn scrolls(&self) -> usize {
        self.inner.scrolls.load(Ordering::SeqCst)
    }

    pub fn clicks(&self) -> usize {
        self.inner.clicks.load(Ordering::SeqCst)
    }
}

impl Browser for FakeBrowser {
    type Tab = FakeTab;

    async fn open_tab(&self) -> Result<FakeTab, ScraperError> {
        self.inner.tabs_opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeTab {
            inner: Arc::clone(&self.inner),
            current: Mutex::new(None),
            listing_index: AtomicUsize::new(0),
            height_reads: AtomicUsize::new(0),
            pending_wait_failure: AtomicBool::new(false),
        })
    }
}

pub struct FakeTab {
    inner: Arc<Inner>,
    current: Mutex<Option<String>>,
    listing_index: AtomicUsize,
    height_reads: AtomicUsize,
    pending_wait_failure: AtomicBool,
}

impl FakeTab {
    fn listing_page(&self) -> Option<ListingPage> {
        let index = self.listing_index.load(Ordering::SeqCst);
        self.inner.listing.lock().unwrap().get(index).cloned()
    }
}

impl Tab for FakeTab {
    async fn goto(&self, url: &str) -> Result<(), ScraperError> {
        self.inner.visits.lock().unwrap().push(url.to_string());
        if self.inner.failing.lock().unwrap().contains(url) {
            return Err(ScraperError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_CONNECTION_RESET".to_string(),
            });
        }
        *self.current.lock().unwrap() = Some(url.to_string());
        self.listing_index.store(0, Ordering::SeqCst);
        self.height_reads.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let current = self.current.lock().unwrap().clone().unwrap_or_default();
        let missing = self.inner.missing_selector.lock().unwrap().contains(&current);
        if missing || self.pending_wait_failure.swap(false, Ordering::SeqCst) {
            return Err(ScraperError::SelectorTimeout {
                selector: selector.to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<(), ScraperError> {
        Ok(())
    }

    async fn content(&self) -> Result<String, ScraperError> {
        if let Some(page) = self.listing_page() {
            return Ok(page.markup);
        }
        let current = self.current.lock().unwrap().clone().unwrap_or_default();
        self.inner
            .pages
            .lock()
            .unwrap()
            .get(&current)
            .cloned()
            .ok_or(ScraperError::Navigation {
                url: current,
                reason: "404".to_string(),
            })
    }

    async fn scroll_height(&self) -> Result<u64, ScraperError> {
        let read = self.height_reads.fetch_add(1, Ordering::SeqCst);
        let heights = self
            .listing_page()
            .map(|p| p.heights)
            .unwrap_or_else(|| vec![1000]);
        Ok(heights[read.min(heights.len() - 1)])
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        self.inner.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn control_state(&self, _selector: &str) -> Result<ControlState, ScraperError> {
        Ok(self
            .listing_page()
            .map_or(ControlState::Missing, |p| p.next))
    }

    async fn click(&self, selector: &str) -> Result<(), ScraperError> {
        self.inner.clicks.fetch_add(1, Ordering::SeqCst);
        let page = self.listing_page();
        if page.as_ref().is_some_and(|p| p.click_fails) {
            return Err(ScraperError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        if page.is_some_and(|p| p.wait_fails) {
            self.pending_wait_failure.store(true, Ordering::SeqCst);
        }
        self.listing_index.fetch_add(1, Ordering::SeqCst);
        self.height_reads.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.inner.tabs_closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Markup fixtures
// ---------------------------------------------------------------------------

/// A Foreign Fortune collection page with one card per title and a
/// pagination bar whose forward control points at `next_href`.
pub fn foreign_fortune_page(titles: &[&str], next_href: Option<&str>, next_disabled: bool) -> String {
    let cards: String = titles
        .iter()
        .map(|t| {
            format!(
                r#"<div class="grid__item grid__item--collection-template small--one-half medium-up--one-quarter">
                     <a class="grid-view-item__link" href="/products/{t}">
                       <img class="grid-view-item__image" src="//cdn.shopify.com/{t}.jpg">
                       <span class="visually-hidden">{t}</span>
                     </a>
                     <span class="product-price__price">$20.00</span>
                   </div>"#
            )
        })
        .collect();

    let pagination = next_href.map_or_else(String::new, |href| {
        let li_class = if next_disabled { "btn--disabled" } else { "" };
        format!(
            r#"<ul class="pagination">
                 <li><a class="btn btn--secondary btn--narrow" href="/collections/shoes"><svg class="icon icon-arrow-left"></svg></a></li>
                 <li class="{li_class}"><a class="btn btn--secondary btn--narrow" href="{href}"><svg class="icon icon-arrow-right"></svg></a></li>
               </ul>"#
        )
    });

    format!("<html><body><div class=\"grid\">{cards}</div>{pagination}</body></html>")
}

/// A Trader Joe's product list with one item per title.
pub fn trader_joes_page(titles: &[&str]) -> String {
    let items: String = titles
        .iter()
        .map(|t| {
            format!(
                r#"<li class="ProductList_productList__item__1EIvq">
                     <img class="ProductCard_card__cover__19-g3" src="/content/{t}.png">
                     <a class="ProductCard_card__title__301JH" href="/p/{t}">{t}</a>
                     <span class="ProductPrice_productPrice__price__3-50j">$3.49</span>
                     <span class="ProductPrice_productPrice__unit__2jvkA">/1 Each</span>
                   </li>"#
            )
        })
        .collect();
    format!("<html><body><ul>{items}</ul></body></html>")
}

/// A Le Chocolat category page with one miniature per title.
pub fn le_chocolat_page(titles: &[&str]) -> String {
    let cards: String = titles
        .iter()
        .map(|t| {
            format!(
                r#"<article class="productMiniature">
                     <img src="/img/{t}.jpg">
                     <h2 class="productMiniature__title">{t}</h2>
                     <span class="productMiniature__weight">100g</span>
                     <span class="productMiniature__price">£10.00</span>
                   </article>"#
            )
        })
        .collect();
    format!("<html><body>{cards}</body></html>")
}

pub fn titles(records: &[catalog_core::ProductRecord]) -> Vec<&str> {
    records.iter().filter_map(|r| r.title.as_deref()).collect()
}
