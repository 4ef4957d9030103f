//! Site runs: walk every start URL of a site, accumulate its records in
//! order, and write one output file.

use std::path::{Path, PathBuf};

use catalog_core::{AppConfig, ProductRecord, SiteConfig, SiteId};

use crate::browser::{Browser, ChromeBrowser};
use crate::error::ScraperError;
use crate::output::write_batch;
use crate::pagination::{Limits, StopReason};
use crate::profile::SiteProfile;

/// Result of walking one start URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlReport {
    pub url: String,
    pub records: usize,
    pub pages: usize,
    pub stop: StopReason,
}

/// Result of a full site run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub site: SiteId,
    /// Records written to `output_path`.
    pub records: usize,
    pub per_url: Vec<UrlReport>,
    pub output_path: PathBuf,
}

impl SiteReport {
    /// Start URLs whose walk ended on a fetch or control failure.
    pub fn failed_urls(&self) -> impl Iterator<Item = &UrlReport> {
        self.per_url.iter().filter(|r| r.stop.is_failure())
    }
}

/// Walks each start URL in order with `profile`'s driver.
///
/// A failing start URL keeps whatever it gathered and the run moves on to
/// the next one.
pub async fn scrape_batch<B: Browser>(
    browser: &B,
    profile: &SiteProfile,
    start_urls: &[String],
    limits: &Limits,
) -> (Vec<ProductRecord>, Vec<UrlReport>) {
    let mut batch = Vec::new();
    let mut per_url = Vec::with_capacity(start_urls.len());

    for url in start_urls {
        let run = profile.run(browser, url, limits).await;
        tracing::info!(
            site = %profile.site,
            url = %url,
            records = run.records.len(),
            pages = run.pages,
            stop = %run.stop,
            "finished start url"
        );
        per_url.push(UrlReport {
            url: url.clone(),
            records: run.records.len(),
            pages: run.pages,
            stop: run.stop,
        });
        batch.extend(run.records);
    }

    (batch, per_url)
}

/// Scrapes every start URL of `site` and writes the batch to
/// `output_dir/site.output_file`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] if the site profile cannot be
/// built, or an output error if the batch cannot be written. Per-page
/// failures do not surface here; they are recorded in
/// [`SiteReport::per_url`].
pub async fn scrape_and_write<B: Browser>(
    browser: &B,
    site: &SiteConfig,
    output_dir: &Path,
    limits: &Limits,
) -> Result<SiteReport, ScraperError> {
    let profile = SiteProfile::for_site(site.site, limits)?;
    let (batch, per_url) = scrape_batch(browser, &profile, &site.start_urls, limits).await;

    let output_path = write_batch(output_dir, &site.output_file, &batch).await?;
    tracing::info!(
        site = %site.site,
        records = batch.len(),
        start_urls = per_url.len(),
        path = %output_path.display(),
        "site scrape complete"
    );

    Ok(SiteReport {
        site: site.site,
        records: batch.len(),
        per_url,
        output_path,
    })
}

/// Launches a browser for `site`, scrapes it, writes the output file, and
/// shuts the browser down whether or not the run succeeded.
///
/// # Errors
///
/// Returns [`ScraperError`] if the browser cannot be launched or the run
/// fails as described in [`scrape_and_write`]. The error is also logged.
pub async fn run_site(config: &AppConfig, site: &SiteConfig) -> Result<SiteReport, ScraperError> {
    let limits = Limits::from_config(config);
    tracing::info!(
        site = %site.site,
        start_urls = site.start_urls.len(),
        "starting site scrape"
    );

    let browser = ChromeBrowser::launch(&config.browser).await.inspect_err(|e| {
        tracing::error!(site = %site.site, error = %e, "failed to launch browser");
    })?;
    let result = scrape_and_write(&browser, site, &config.output_dir, &limits).await;
    browser.shutdown().await;

    if let Err(e) = &result {
        tracing::error!(site = %site.site, error = %e, "site scrape failed");
    }
    result
}
