use std::sync::LazyLock;

use catalog_core::{Field, ProductRecord, SiteId};
use scraper::{Html, Selector};

use super::{warn_no_cards, ProductExtractor};
use crate::markup::{first_attr, first_text};
use crate::normalize::absolutize_image_url;

/// Product list item. Also the readiness selector for the scroll driver.
pub(crate) const CARD: &str = "li.ProductList_productList__item__1EIvq";

static CARD_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(CARD).expect("valid selector"));
static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.ProductCard_card__title__301JH").expect("valid selector"));
static PRICE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.ProductPrice_productPrice__price__3-50j").expect("valid selector")
});
static NO_PRICE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.ProductPrice_productPrice__noPriceText__Is9Tc").expect("valid selector")
});
static UNIT_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("span.ProductPrice_productPrice__unit__2jvkA").expect("valid selector")
});
static IMAGE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("img.ProductCard_card__cover__19-g3").expect("valid selector")
});

/// Product list cards. Items without a shelf price show a "not available"
/// style notice instead, which is taken as the price. The unit ("1 Oz",
/// "12 Count") is written as `weight`; there is no description key.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraderJoesExtractor;

impl ProductExtractor for TraderJoesExtractor {
    fn extract(&self, markup: &str) -> Vec<ProductRecord> {
        let doc = Html::parse_document(markup);
        let origin = SiteId::TraderJoes.origin();

        let records: Vec<ProductRecord> = doc
            .select(&CARD_SEL)
            .map(|card| ProductRecord {
                title: first_text(card, &TITLE_SEL),
                price: first_text(card, &PRICE_SEL).or_else(|| first_text(card, &NO_PRICE_SEL)),
                image_url: first_attr(card, &IMAGE_SEL, "src")
                    .map(|src| absolutize_image_url(origin, &src)),
                weight: Field::from_option(first_text(card, &UNIT_SEL)),
                ..ProductRecord::default()
            })
            .collect();

        if records.is_empty() {
            warn_no_cards(SiteId::TraderJoes, CARD);
        }
        records
    }
}

#[cfg(test)]
#[path = "trader_joes_test.rs"]
mod tests;
