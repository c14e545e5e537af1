//! Domain extraction and website-column detection.

/// Header-name fragments that mark a column as website-like.
const WEBSITE_COLUMN_PATTERNS: [&str; 6] = ["website", "site", "sites", "domain", "url", "web"];

/// Extracts a bare registrable-looking domain from a URL-like string.
///
/// Lowercases, strips a leading scheme and `www.`, truncates at the first
/// path/query/fragment delimiter. The result is accepted only if it contains
/// a `.` and is longer than three characters; anything else yields `None`.
pub fn clean_domain(url: &str) -> Option<String> {
    if url.trim().is_empty() {
        return None;
    }

    let lowered = url.to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);
    let domain = without_www.split(['/', '?', '#']).next().unwrap_or("");

    if domain.contains('.') && domain.len() > 3 {
        Some(domain.to_string())
    } else {
        None
    }
}

/// Picks the first header (in original order) whose lowercase form contains
/// any website-like fragment.
pub fn find_website_column(headers: &[String]) -> Option<String> {
    headers
        .iter()
        .find(|header| {
            let lowered = header.to_lowercase();
            WEBSITE_COLUMN_PATTERNS
                .iter()
                .any(|pattern| lowered.contains(pattern))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_www_and_path() {
        assert_eq!(
            clean_domain("https://www.Example.com/path?x=1"),
            Some("example.com".to_string())
        );
        assert_eq!(
            clean_domain("HTTP://Foo.COM#fragment"),
            Some("foo.com".to_string())
        );
        assert_eq!(clean_domain("acme.io/contact"), Some("acme.io".to_string()));
    }

    #[test]
    fn rejects_short_or_undotted_values() {
        assert_eq!(clean_domain(""), None);
        assert_eq!(clean_domain("   "), None);
        assert_eq!(clean_domain("localhost"), None);
        // "x.y" survives the rewrite but is too short to be a domain.
        assert_eq!(clean_domain("x.y"), None);
        assert_eq!(clean_domain("https://www."), None);
    }

    #[test]
    fn finds_first_website_like_header() {
        let headers: Vec<String> = ["name", "Company URL", "website"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_website_column(&headers), Some("Company URL".to_string()));
    }

    #[test]
    fn returns_none_without_website_headers() {
        let headers: Vec<String> = ["name", "email", "phone"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(find_website_column(&headers), None);
    }
}
