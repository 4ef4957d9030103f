use std::sync::LazyLock;

use catalog_core::{Field, ProductRecord, SiteId};
use scraper::{Html, Selector};

use super::{warn_no_cards, ProductExtractor};
use crate::markup::{first_attr, first_text};
use crate::normalize::absolutize_image_url;

const CARD: &str =
    ".grid__item.grid__item--collection-template.small--one-half.medium-up--one-quarter";

static CARD_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(CARD).expect("valid selector"));
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a.grid-view-item__link .visually-hidden").expect("valid selector")
});
static PRICE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".product-price__price").expect("valid selector"));
static IMAGE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img.grid-view-item__image").expect("valid selector"));

/// Shopify collection grid. Cards carry no description, so it is always
/// written as `null`; there is no weight key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForeignFortuneExtractor;

impl ProductExtractor for ForeignFortuneExtractor {
    fn extract(&self, markup: &str) -> Vec<ProductRecord> {
        let doc = Html::parse_document(markup);
        let origin = SiteId::ForeignFortune.origin();

        let records: Vec<ProductRecord> = doc
            .select(&CARD_SEL)
            .map(|card| ProductRecord {
                title: first_text(card, &TITLE_SEL),
                price: first_text(card, &PRICE_SEL),
                description: Field::Null,
                image_url: first_attr(card, &IMAGE_SEL, "src")
                    .map(|src| absolutize_image_url(origin, &src)),
                ..ProductRecord::default()
            })
            .collect();

        if records.is_empty() {
            warn_no_cards(SiteId::ForeignFortune, CARD);
        }
        records
    }
}

#[cfg(test)]
#[path = "foreign_fortune_test.rs"]
mod tests;
