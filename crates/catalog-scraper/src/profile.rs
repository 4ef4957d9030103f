//! Per-site scraping profile: readiness signal, extractor and pagination.

use catalog_core::SiteId;

use crate::browser::{Browser, ReadySignal};
use crate::error::ScraperError;
use crate::extract::{extractor_for, ProductExtractor};
use crate::pagination::{
    follow_links, scroll_and_click, single_page, ClickControls, Limits, LinkControls, PageRun,
    Pagination,
};

pub struct SiteProfile {
    pub site: SiteId,
    /// Condition a listing page must reach before its markup is read.
    pub ready: ReadySignal,
    pub pagination: Pagination,
    pub extractor: Box<dyn ProductExtractor>,
}

impl SiteProfile {
    /// Builds the profile for `site`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if a pagination selector
    /// fails to parse.
    pub fn for_site(site: SiteId, limits: &Limits) -> Result<Self, ScraperError> {
        let (ready, pagination) = match site {
            SiteId::ForeignFortune => (
                ReadySignal::NetworkIdle,
                Pagination::FollowLinks(LinkControls::foreign_fortune(site.origin())?),
            ),
            SiteId::LeChocolat => (ReadySignal::NetworkIdle, Pagination::SinglePage),
            SiteId::TraderJoes => {
                let controls = ClickControls::trader_joes();
                (
                    ReadySignal::selector(controls.list_selector.clone(), limits.selector_timeout),
                    Pagination::ScrollAndClick(controls),
                )
            }
        };

        Ok(Self {
            site,
            ready,
            pagination,
            extractor: extractor_for(site),
        })
    }

    /// Runs this site's pagination driver from `start_url`.
    pub async fn run<B: Browser>(&self, browser: &B, start_url: &str, limits: &Limits) -> PageRun {
        let extractor = self.extractor.as_ref();
        match &self.pagination {
            Pagination::SinglePage => single_page(browser, start_url, &self.ready, extractor).await,
            Pagination::FollowLinks(controls) => {
                follow_links(browser, start_url, &self.ready, extractor, controls, limits).await
            }
            Pagination::ScrollAndClick(controls) => {
                scroll_and_click(browser, start_url, &self.ready, extractor, controls, limits).await
            }
        }
    }
}

impl std::fmt::Debug for SiteProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteProfile")
            .field("site", &self.site)
            .field("ready", &self.ready)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}
