//! Browser-driven product scraping for the supported storefronts.
//!
//! A site run launches one browser, walks each start URL with the site's
//! pagination driver, extracts product cards from the rendered markup, and
//! writes the accumulated batch as JSON.

pub mod browser;
pub mod error;
pub mod extract;
pub mod fetch;
pub(crate) mod markup;
pub mod normalize;
pub mod orchestrator;
pub mod output;
pub mod pagination;
pub mod profile;

pub use browser::{Browser, ChromeBrowser, ControlState, ReadySignal, Tab};
pub use error::ScraperError;
pub use extract::{extractor_for, ProductExtractor};
pub use fetch::fetch_markup;
pub use orchestrator::{run_site, scrape_and_write, scrape_batch, SiteReport, UrlReport};
pub use output::{render_batch, write_batch};
pub use pagination::{Limits, PageRun, Pagination, StopReason};
pub use profile::SiteProfile;
