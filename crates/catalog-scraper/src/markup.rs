//! Small query helpers over parsed markup.

use scraper::{ElementRef, Selector};

use crate::error::ScraperError;

/// Parses a CSS selector, mapping the parser error into [`ScraperError`].
pub(crate) fn parse_selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
        selector: css.to_owned(),
        reason: e.to_string(),
    })
}

/// Direct text children of `el`, concatenated and trimmed. Empty → `None`.
pub(crate) fn own_text(el: ElementRef<'_>) -> Option<String> {
    let mut text = String::new();
    for child in el.children() {
        if let Some(t) = child.value().as_text() {
            text.push_str(t);
        }
    }
    non_empty(&text)
}

/// Own text of the first descendant matching `selector`.
pub(crate) fn first_text(el: ElementRef<'_>, selector: &Selector) -> Option<String> {
    el.select(selector).next().and_then(own_text)
}

/// Trimmed `attr` of the first descendant matching `selector`. Empty → `None`.
pub(crate) fn first_attr(el: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    el.select(selector)
        .next()
        .and_then(|m| m.value().attr(attr))
        .and_then(non_empty)
}

pub(crate) fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub(crate) fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
