//! URL normalization for scraped image sources and pagination links.

use url::Url;

/// Makes an image `src` absolute.
///
/// - `//cdn.example.com/a.jpg` → `https://cdn.example.com/a.jpg`
/// - `/images/a.jpg` → `{origin}/images/a.jpg`
///
/// Anything else is returned unchanged; the validator rejects it if it is
/// still not an HTTP(S) URL.
#[must_use]
pub fn absolutize_image_url(origin: &str, src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else if src.starts_with('/') {
        format!("{}{src}", origin.trim_end_matches('/'))
    } else {
        src.to_owned()
    }
}

/// Resolves a pagination `href` against the site origin.
///
/// Returns `None` when either side cannot be parsed as a URL.
#[must_use]
pub fn resolve_link(origin: &str, href: &str) -> Option<String> {
    let base = match Url::parse(origin) {
        Ok(base) => base,
        Err(e) => {
            tracing::warn!(origin, error = %e, "site origin is not a valid URL");
            return None;
        }
    };
    base.join(href.trim()).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_relative_image_gets_https() {
        assert_eq!(
            absolutize_image_url("https://foreignfortune.com", "//cdn.shopify.com/s/files/a.jpg"),
            "https://cdn.shopify.com/s/files/a.jpg"
        );
    }

    #[test]
    fn root_relative_image_joins_origin() {
        assert_eq!(
            absolutize_image_url("https://www.traderjoes.com/", "/content/dam/tj/products/a.png"),
            "https://www.traderjoes.com/content/dam/tj/products/a.png"
        );
    }

    #[test]
    fn absolute_image_is_unchanged() {
        let src = "https://img.example.com/a.jpg";
        assert_eq!(absolutize_image_url("https://example.com", src), src);
    }

    #[test]
    fn root_relative_link_resolves_against_origin() {
        assert_eq!(
            resolve_link("https://foreignfortune.com", "/collections/shoes?page=2").as_deref(),
            Some("https://foreignfortune.com/collections/shoes?page=2")
        );
    }

    #[test]
    fn bare_relative_link_resolves_against_origin_root() {
        assert_eq!(
            resolve_link("https://foreignfortune.com", "collections/shoes?page=3").as_deref(),
            Some("https://foreignfortune.com/collections/shoes?page=3")
        );
    }

    #[test]
    fn absolute_link_is_kept() {
        assert_eq!(
            resolve_link("https://foreignfortune.com", "https://foreignfortune.com/collections/kids?page=2")
                .as_deref(),
            Some("https://foreignfortune.com/collections/kids?page=2")
        );
    }

    #[test]
    fn invalid_origin_yields_none() {
        assert!(resolve_link("not a url", "/collections/shoes").is_none());
    }
}
