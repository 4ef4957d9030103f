use std::sync::LazyLock;

use catalog_core::{Field, ProductRecord, SiteId};
use scraper::{ElementRef, Html, Selector};

use super::{warn_no_cards, ProductExtractor};
use crate::markup::{first_attr, first_text};
use crate::normalize::absolutize_image_url;

const CARD: &str = ".productMiniature";

static CARD_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(CARD).expect("valid selector"));
static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2.productMiniature__title").expect("valid selector"));
static SUBTITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3.productMiniature__subtitle").expect("valid selector"));
static WEIGHT_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".productMiniature__weight").expect("valid selector"));
static PRICE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.productMiniature__price").expect("valid selector"));
static IMAGE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("valid selector"));

/// Category pages are unpaginated. The card's subtitle and net weight are
/// folded into `description`; no separate weight key is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeChocolatExtractor;

impl ProductExtractor for LeChocolatExtractor {
    fn extract(&self, markup: &str) -> Vec<ProductRecord> {
        let doc = Html::parse_document(markup);
        let origin = SiteId::LeChocolat.origin();

        let records: Vec<ProductRecord> = doc
            .select(&CARD_SEL)
            .map(|card| ProductRecord {
                title: first_text(card, &TITLE_SEL),
                price: first_text(card, &PRICE_SEL),
                description: Field::from_option(description(card)),
                image_url: first_attr(card, &IMAGE_SEL, "src")
                    .map(|src| absolutize_image_url(origin, &src)),
                ..ProductRecord::default()
            })
            .collect();

        if records.is_empty() {
            warn_no_cards(SiteId::LeChocolat, CARD);
        }
        records
    }
}

/// `"{subtitle} {weight}"`, skipping whichever part is missing.
fn description(card: ElementRef<'_>) -> Option<String> {
    let parts: Vec<String> = [
        first_text(card, &SUBTITLE_SEL),
        first_text(card, &WEIGHT_SEL),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(" "))
}

#[cfg(test)]
#[path = "le_chocolat_test.rs"]
mod tests;
