//! Pagination drivers.
//!
//! A driver walks one start URL to the end of its catalog and returns a
//! [`PageRun`]. Drivers never fail: every stop condition, including fetch and
//! click failures, is reported as a [`StopReason`] alongside the records
//! gathered up to that point.

mod links;
mod scroll;
mod single;

use std::fmt;
use std::time::Duration;

use catalog_core::{AppConfig, ProductRecord};

pub use links::{follow_links, locate_next_link, LinkControls, NextLink};
pub use scroll::{scroll_and_click, scroll_until_stable, ClickControls, MAX_SCROLL_ROUNDS};
pub use single::single_page;

/// Why a driver stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The site has no pagination; the start URL was fetched once.
    SinglePage,
    /// The forward control was present but disabled.
    EndOfCatalog,
    /// No forward control was found on the last page.
    NoNextControl,
    /// The next link points at a page already visited.
    CycleDetected,
    /// The last page yielded no product cards.
    EmptyPage,
    /// `max_pages` pages were read and another was available.
    PageLimit,
    FetchFailed(String),
    ControlFailed(String),
}

impl StopReason {
    /// `true` when the run ended on an error rather than a clean end of data.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, StopReason::FetchFailed(_) | StopReason::ControlFailed(_))
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::SinglePage => f.write_str("single page"),
            StopReason::EndOfCatalog => f.write_str("end of catalog"),
            StopReason::NoNextControl => f.write_str("no next control"),
            StopReason::CycleDetected => f.write_str("cycle detected"),
            StopReason::EmptyPage => f.write_str("empty page"),
            StopReason::PageLimit => f.write_str("page limit reached"),
            StopReason::FetchFailed(reason) => write!(f, "fetch failed: {reason}"),
            StopReason::ControlFailed(reason) => write!(f, "pagination control failed: {reason}"),
        }
    }
}

/// Outcome of walking one start URL.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRun {
    pub records: Vec<ProductRecord>,
    /// Pages whose markup was captured and extracted.
    pub pages: usize,
    pub stop: StopReason,
}

impl PageRun {
    pub(crate) fn new(records: Vec<ProductRecord>, pages: usize, stop: StopReason) -> Self {
        Self {
            records,
            pages,
            stop,
        }
    }

    pub(crate) fn failed_before_first_page(stop: StopReason) -> Self {
        Self::new(Vec::new(), 0, stop)
    }
}

/// Bounds shared by every driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_pages: usize,
    /// Wait between scrolling and re-measuring the page height.
    pub settle_interval: Duration,
    pub selector_timeout: Duration,
}

impl Limits {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            settle_interval: Duration::from_millis(config.settle_interval_ms),
            selector_timeout: Duration::from_millis(config.selector_timeout_ms),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_pages: 200,
            settle_interval: Duration::from_secs(3),
            selector_timeout: Duration::from_secs(10),
        }
    }
}

/// How a site moves from one listing page to the next.
#[derive(Debug, Clone)]
pub enum Pagination {
    SinglePage,
    FollowLinks(LinkControls),
    ScrollAndClick(ClickControls),
}
