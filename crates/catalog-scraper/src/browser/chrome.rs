//! Chrome DevTools Protocol implementation of [`Browser`] and [`Tab`].

use std::time::Duration;

use catalog_core::BrowserSettings;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport as CdpViewport;
use chromiumoxide::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use super::{Browser, ControlState, Tab};
use crate::error::ScraperError;

/// Interval between DOM polls while waiting for a selector or load state.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A launched Chrome process bound to a throwaway profile directory.
///
/// Call [`ChromeBrowser::shutdown`] on every exit path; it closes the process
/// and removes the profile directory.
pub struct ChromeBrowser {
    browser: CdpBrowser,
    handler: JoinHandle<()>,
    profile_dir: TempDir,
    navigation_timeout: Duration,
}

impl ChromeBrowser {
    /// Launches Chrome against a fresh temporary profile.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Profile`] if the profile directory cannot be created.
    /// - [`ScraperError::BrowserConfig`] if the launch options are rejected.
    /// - [`ScraperError::Browser`] if the process fails to start.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, ScraperError> {
        let profile_dir = tempfile::Builder::new()
            .prefix("catalog-profile-")
            .tempdir()
            .map_err(ScraperError::Profile)?;
        let navigation_timeout = Duration::from_millis(settings.navigation_timeout_ms);

        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile_dir.path())
            .request_timeout(navigation_timeout)
            .window_size(settings.viewport.width, settings.viewport.height)
            .viewport(Some(CdpViewport {
                width: settings.viewport.width,
                height: settings.viewport.height,
                ..CdpViewport::default()
            }))
            .args(settings.extra_args.iter().map(String::as_str));
        if !settings.headless {
            builder = builder.with_head();
        }
        if let Some(executable) = &settings.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(ScraperError::BrowserConfig)?;

        tracing::info!(
            profile = %profile_dir.path().display(),
            headless = settings.headless,
            viewport = %settings.viewport,
            "launching browser"
        );
        let (browser, mut handler) = CdpBrowser::launch(config).await?;
        let handler = tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(Self {
            browser,
            handler,
            profile_dir,
            navigation_timeout,
        })
    }

    /// Closes the browser process and removes its profile directory.
    ///
    /// Failures are logged rather than returned: shutdown runs on error paths
    /// where the original error is the one worth surfacing.
    pub async fn shutdown(mut self) {
        tracing::info!("closing browser");
        if let Err(e) = self.browser.close().await {
            tracing::warn!(error = %e, "failed to close browser cleanly");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::debug!(error = %e, "failed waiting for browser process exit");
        }
        self.handler.abort();

        let profile = self.profile_dir.path().display().to_string();
        if let Err(e) = self.profile_dir.close() {
            tracing::warn!(profile, error = %e, "failed to remove browser profile directory");
        }
    }
}

impl Browser for ChromeBrowser {
    type Tab = ChromeTab;

    async fn open_tab(&self) -> Result<ChromeTab, ScraperError> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(ChromeTab {
            page,
            navigation_timeout: self.navigation_timeout,
        })
    }
}

pub struct ChromeTab {
    page: Page,
    navigation_timeout: Duration,
}

impl ChromeTab {
    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.navigation_timeout.as_millis()).unwrap_or(u64::MAX)
    }

    async fn ready_state(&self) -> Result<String, ScraperError> {
        self.page
            .evaluate("document.readyState")
            .await?
            .into_value::<String>()
            .map_err(|e| ScraperError::Script {
                context: "document.readyState".to_string(),
                reason: e.to_string(),
            })
    }
}

impl Tab for ChromeTab {
    async fn goto(&self, url: &str) -> Result<(), ScraperError> {
        let navigate = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| ScraperError::Navigation {
                    url: url.to_owned(),
                    reason: e.to_string(),
                })?;
            while self.ready_state().await? != "complete" {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
            Ok::<(), ScraperError>(())
        };

        tokio::time::timeout(self.navigation_timeout, navigate)
            .await
            .map_err(|_| ScraperError::Timeout {
                action: format!("navigating to {url}"),
                timeout_ms: self.timeout_ms(),
            })?
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let poll = async {
            while self.page.find_element(selector).await.is_err() {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, poll)
            .await
            .map_err(|_| ScraperError::SelectorTimeout {
                selector: selector.to_owned(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })
    }

    async fn wait_for_navigation(&self) -> Result<(), ScraperError> {
        tokio::time::timeout(self.navigation_timeout, self.page.wait_for_navigation())
            .await
            .map_err(|_| ScraperError::Timeout {
                action: "waiting for navigation".to_string(),
                timeout_ms: self.timeout_ms(),
            })??;
        Ok(())
    }

    async fn content(&self) -> Result<String, ScraperError> {
        Ok(self.page.content().await?)
    }

    async fn scroll_height(&self) -> Result<u64, ScraperError> {
        self.page
            .evaluate("document.body.scrollHeight")
            .await?
            .into_value::<u64>()
            .map_err(|e| ScraperError::Script {
                context: "document.body.scrollHeight".to_string(),
                reason: e.to_string(),
            })
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        self.page
            .evaluate("window.scrollBy(0, document.body.scrollHeight);")
            .await?;
        Ok(())
    }

    async fn control_state(&self, selector: &str) -> Result<ControlState, ScraperError> {
        let quoted = serde_json::to_string(selector)?;
        let script = format!(
            "(() => {{ const el = document.querySelector({quoted}); \
             if (!el) return 'missing'; \
             return el.disabled === true ? 'disabled' : 'enabled'; }})()"
        );
        let state = self
            .page
            .evaluate(script)
            .await?
            .into_value::<String>()
            .map_err(|e| ScraperError::Script {
                context: format!("control state of {selector}"),
                reason: e.to_string(),
            })?;

        match state.as_str() {
            "missing" => Ok(ControlState::Missing),
            "disabled" => Ok(ControlState::Disabled),
            "enabled" => Ok(ControlState::Enabled),
            other => Err(ScraperError::Script {
                context: format!("control state of {selector}"),
                reason: format!("unexpected value '{other}'"),
            }),
        }
    }

    async fn click(&self, selector: &str) -> Result<(), ScraperError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| ScraperError::ElementNotFound {
                selector: selector.to_owned(),
            })?;
        element.click().await?;
        Ok(())
    }

    async fn close(self) -> Result<(), ScraperError> {
        self.page.close().await?;
        Ok(())
    }
}
