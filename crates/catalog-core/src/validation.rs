//! Structural and semantic checks over a scraped batch.
//!
//! [`Validator::validate`] runs six checks in a fixed order and stops at the
//! first failure. Every check is also callable on its own, either as a
//! `validate_*` method returning `bool` (and logging the diagnostic) or as a
//! `*_violation` method returning the [`Violation`] without logging.

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;

use crate::record::ProductRecord;

/// Identifies one of the six validation checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    MandatoryFields,
    PriceFormat,
    ImageUrlFormat,
    UniqueProducts,
    SalePrice,
    ModelImagesAndPrices,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Check::MandatoryFields => write!(f, "mandatory_fields"),
            Check::PriceFormat => write!(f, "price_format"),
            Check::ImageUrlFormat => write!(f, "image_url_format"),
            Check::UniqueProducts => write!(f, "unique_products"),
            Check::SalePrice => write!(f, "sale_price"),
            Check::ModelImagesAndPrices => write!(f, "model_images_and_prices"),
        }
    }
}

/// The first broken invariant found by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub check: Check,
    /// Zero-based position of the offending record in the batch.
    pub index: usize,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed on record {} field '{}': {}",
            self.check, self.index, self.field, self.message
        )
    }
}

/// Read-only validator over a borrowed batch.
pub struct Validator<'a> {
    products: &'a [ProductRecord],
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(products: &'a [ProductRecord]) -> Self {
        Self { products }
    }

    /// Runs all checks in order; `false` on the first failure.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.validate_mandatory_fields()
            && self.validate_price_format()
            && self.validate_image_url_format()
            && self.validate_unique_products()
            && self.validate_sale_price_not_above_original()
            && self.validate_model_images_and_prices()
    }

    /// Returns the first violation in check order, or `None` when the batch
    /// passes every check.
    #[must_use]
    pub fn first_violation(&self) -> Option<Violation> {
        self.mandatory_fields_violation()
            .or_else(|| self.price_format_violation())
            .or_else(|| self.image_url_format_violation())
            .or_else(|| self.unique_products_violation())
            .or_else(|| self.sale_price_violation())
            .or_else(|| self.model_images_and_prices_violation())
    }

    #[must_use]
    pub fn validate_mandatory_fields(&self) -> bool {
        report(self.mandatory_fields_violation())
    }

    #[must_use]
    pub fn validate_price_format(&self) -> bool {
        report(self.price_format_violation())
    }

    #[must_use]
    pub fn validate_image_url_format(&self) -> bool {
        report(self.image_url_format_violation())
    }

    #[must_use]
    pub fn validate_unique_products(&self) -> bool {
        report(self.unique_products_violation())
    }

    #[must_use]
    pub fn validate_sale_price_not_above_original(&self) -> bool {
        report(self.sale_price_violation())
    }

    #[must_use]
    pub fn validate_model_images_and_prices(&self) -> bool {
        report(self.model_images_and_prices_violation())
    }

    /// `title` and `image_url` must be present and non-empty.
    #[must_use]
    pub fn mandatory_fields_violation(&self) -> Option<Violation> {
        self.products.iter().enumerate().find_map(|(index, p)| {
            [("title", &p.title), ("image_url", &p.image_url)]
                .into_iter()
                .find(|(_, value)| value.as_deref().is_none_or(str::is_empty))
                .map(|(field, _)| Violation {
                    check: Check::MandatoryFields,
                    index,
                    field,
                    message: format!("missing or empty field '{field}'"),
                })
        })
    }

    /// `price` is null, "not available", or a decimal once currency
    /// decorations are stripped.
    #[must_use]
    pub fn price_format_violation(&self) -> Option<Violation> {
        self.products.iter().enumerate().find_map(|(index, p)| {
            let price = p.price.as_deref()?;
            if is_valid_price(price) {
                return None;
            }
            Some(Violation {
                check: Check::PriceFormat,
                index,
                field: "price",
                message: format!("price '{price}' is not in a valid format"),
            })
        })
    }

    /// `image_url` must start with `http://` or `https://`.
    #[must_use]
    pub fn image_url_format_violation(&self) -> Option<Violation> {
        self.products.iter().enumerate().find_map(|(index, p)| {
            let url = p.image_url.as_deref().unwrap_or_default();
            if has_http_scheme(url) {
                return None;
            }
            Some(Violation {
                check: Check::ImageUrlFormat,
                index,
                field: "image_url",
                message: format!("image URL '{url}' is not an absolute HTTP(S) URL"),
            })
        })
    }

    /// `(title, weight)` is unique across the batch. A record without a weight
    /// (absent key or `null`) is keyed on its title alone.
    #[must_use]
    pub fn unique_products_violation(&self) -> Option<Violation> {
        let mut seen: HashSet<(Option<&str>, Option<&str>)> = HashSet::new();
        self.products.iter().enumerate().find_map(|(index, p)| {
            let title = p.title.as_deref();
            let weight = p.weight.value().map(String::as_str);
            if seen.insert((title, weight)) {
                return None;
            }
            let title = title.unwrap_or_default();
            let message = match weight {
                Some(w) => format!("duplicate product '{title}' with weight '{w}'"),
                None => format!("duplicate product '{title}'"),
            };
            Some(Violation {
                check: Check::UniqueProducts,
                index,
                field: if weight.is_some() { "weight" } else { "title" },
                message,
            })
        })
    }

    /// When both are set, `sale_price` must not exceed `original_price`.
    #[must_use]
    pub fn sale_price_violation(&self) -> Option<Violation> {
        self.products.iter().enumerate().find_map(|(index, p)| {
            let original = p.original_price.as_deref().filter(|s| !s.is_empty())?;
            let sale = p.sale_price.as_deref().filter(|s| !s.is_empty())?;
            match (parse_plain_price(original), parse_plain_price(sale)) {
                (Some(o), Some(s)) if s <= o => None,
                (Some(_), Some(_)) => Some(Violation {
                    check: Check::SalePrice,
                    index,
                    field: "sale_price",
                    message: format!(
                        "sale price '{sale}' is greater than original price '{original}'"
                    ),
                }),
                (None, _) => Some(Violation {
                    check: Check::SalePrice,
                    index,
                    field: "original_price",
                    message: format!("invalid price format '{original}'"),
                }),
                (_, None) => Some(Violation {
                    check: Check::SalePrice,
                    index,
                    field: "sale_price",
                    message: format!("invalid price format '{sale}'"),
                }),
            }
        })
    }

    /// Every entry of `models` needs a non-empty `image_url` and `price`.
    #[must_use]
    pub fn model_images_and_prices_violation(&self) -> Option<Violation> {
        self.products.iter().enumerate().find_map(|(index, p)| {
            let models = p.models.as_deref()?;
            models.iter().enumerate().find_map(|(model_index, m)| {
                let missing = if m.image_url.as_deref().is_none_or(str::is_empty) {
                    "image_url"
                } else if m.price.as_deref().is_none_or(str::is_empty) {
                    "price"
                } else {
                    return None;
                };
                Some(Violation {
                    check: Check::ModelImagesAndPrices,
                    index,
                    field: missing,
                    message: format!("model {model_index} is missing '{missing}'"),
                })
            })
        })
    }
}

fn report(violation: Option<Violation>) -> bool {
    match violation {
        None => true,
        Some(v) => {
            tracing::warn!(
                check = %v.check,
                record = v.index,
                field = v.field,
                "validation error: {}",
                v.message
            );
            false
        }
    }
}

/// Accepts `"$12.50"`, `"£3,400"`, `"from $9.99"` and `"Not available"`.
#[must_use]
pub fn is_valid_price(price: &str) -> bool {
    if price.eq_ignore_ascii_case("not available") {
        return true;
    }
    let cleaned = price.replace(['$', '£', ','], "");
    let mut cleaned = cleaned.trim();
    if let Some(rest) = strip_prefix_ignore_ascii_case(cleaned, "from") {
        cleaned = rest.trim();
    }
    cleaned.parse::<Decimal>().is_ok()
}

/// Parses a price for the sale/original comparison, stripping `$` and `,`.
fn parse_plain_price(price: &str) -> Option<Decimal> {
    price.replace(['$', ','], "").trim().parse::<Decimal>().ok()
}

fn has_http_scheme(url: &str) -> bool {
    strip_prefix_ignore_ascii_case(url, "http://").is_some()
        || strip_prefix_ignore_ascii_case(url, "https://").is_some()
}

fn strip_prefix_ignore_ascii_case<'s>(s: &'s str, prefix: &str) -> Option<&'s str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
