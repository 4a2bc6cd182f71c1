//! Utility functions and helpers.

pub mod document;
pub mod http;

use url::Url;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
///
/// Falls back to `href` unchanged when the base does not parse.
pub fn resolve(base_url: &str, href: &str) -> String {
    match Url::parse(base_url) {
        Ok(base) => resolve_url(&base, href),
        Err(_) => href.to_string(),
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/index.php/journal/issue/archive").unwrap();
        assert_eq!(
            resolve_url(&base, "view/12"),
            "https://example.com/index.php/journal/issue/view/12"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_resolve_with_unparseable_base() {
        assert_eq!(resolve("not a url", "view/1"), "view/1");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Иванов\n\t И.  И. "), "Иванов И. И.");
        assert_eq!(clean_text("\n \t"), "");
    }
}
