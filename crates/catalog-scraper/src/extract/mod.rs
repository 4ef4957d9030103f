//! Per-site product extraction from rendered listing markup.
//!
//! Each storefront gets one [`ProductExtractor`] implementation that knows
//! the site's card container and field selectors. Extraction never fails:
//! missing fields become `null`, and a page with no cards yields an empty
//! batch plus a warning.

mod foreign_fortune;
mod le_chocolat;
mod trader_joes;

use catalog_core::{ProductRecord, SiteId};

pub use foreign_fortune::ForeignFortuneExtractor;
pub use le_chocolat::LeChocolatExtractor;
pub use trader_joes::TraderJoesExtractor;
pub(crate) use trader_joes::CARD as TRADER_JOES_CARD;

/// Parses one listing page into product records, in document order.
pub trait ProductExtractor: Send + Sync {
    fn extract(&self, markup: &str) -> Vec<ProductRecord>;
}

/// Returns the extractor for `site`.
#[must_use]
pub fn extractor_for(site: SiteId) -> Box<dyn ProductExtractor> {
    match site {
        SiteId::ForeignFortune => Box::new(ForeignFortuneExtractor),
        SiteId::LeChocolat => Box::new(LeChocolatExtractor),
        SiteId::TraderJoes => Box::new(TraderJoesExtractor),
    }
}

fn warn_no_cards(site: SiteId, container: &str) {
    tracing::warn!(site = %site, container, "no product cards found on page");
}
