//! Browser control surface used by the fetcher and pagination drivers.
//!
//! [`Browser`] and [`Tab`] describe only the capabilities the drivers need:
//! open and close tabs, navigate, wait for a selector, read the rendered
//! markup, scroll, inspect and click a pagination control. [`ChromeBrowser`]
//! implements them over the Chrome DevTools Protocol; tests substitute
//! in-memory fakes.

mod chrome;

use std::time::Duration;

pub use chrome::{ChromeBrowser, ChromeTab};

use crate::error::ScraperError;

/// Condition a freshly navigated page must reach before its markup is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadySignal {
    /// Navigation finished and the document stopped loading.
    NetworkIdle,
    /// An element matching `selector` is present, polled until `timeout`.
    Selector { selector: String, timeout: Duration },
}

impl ReadySignal {
    #[must_use]
    pub fn selector(selector: impl Into<String>, timeout: Duration) -> Self {
        ReadySignal::Selector {
            selector: selector.into(),
            timeout,
        }
    }
}

/// State of a clickable pagination control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControlState {
    #[default]
    Missing,
    Disabled,
    Enabled,
}

/// A controlled browser process that hands out tabs.
#[allow(async_fn_in_trait)]
pub trait Browser {
    type Tab: Tab;

    async fn open_tab(&self) -> Result<Self::Tab, ScraperError>;
}

/// One open tab.
#[allow(async_fn_in_trait)]
pub trait Tab {
    /// Navigates and waits for the document to finish loading, bounded by the
    /// browser's navigation timeout.
    async fn goto(&self, url: &str) -> Result<(), ScraperError>;

    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
        -> Result<(), ScraperError>;

    /// Waits for an in-flight navigation (e.g. after a click) to complete.
    async fn wait_for_navigation(&self) -> Result<(), ScraperError>;

    /// Fully rendered markup of the current document.
    async fn content(&self) -> Result<String, ScraperError>;

    async fn scroll_height(&self) -> Result<u64, ScraperError>;

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError>;

    async fn control_state(&self, selector: &str) -> Result<ControlState, ScraperError>;

    async fn click(&self, selector: &str) -> Result<(), ScraperError>;

    async fn close(self) -> Result<(), ScraperError>;
}

/// Navigates `tab` to `url` and waits for `ready`.
///
/// # Errors
///
/// Propagates navigation, timeout, and selector-wait failures from the tab.
pub async fn load<T: Tab>(tab: &T, url: &str, ready: &ReadySignal) -> Result<(), ScraperError> {
    tab.goto(url).await?;
    match ready {
        ReadySignal::NetworkIdle => Ok(()),
        ReadySignal::Selector { selector, timeout } => {
            tab.wait_for_selector(selector, *timeout).await
        }
    }
}
