//! Backend blog content arrives as raw HTML from the admin editor. It is
//! never interpolated into a template without passing through here.

/// Sanitize untrusted HTML for rendering. Keeps the formatting tags the
/// editor produces (headings, lists, links, images) and drops scripts,
/// event handlers, and other active content.
pub fn clean_html(html: &str) -> String {
    ammonia::clean(html)
}

/// Reduce HTML to text, entity-escaped for safe re-embedding. Used for
/// listing excerpts and word counts.
pub fn strip_tags(html: &str) -> String {
    ammonia::Builder::empty().clean(html).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_removes_scripts() {
        let dirty = r#"<p>Hello</p><script>alert("xss")</script>"#;
        let clean = clean_html(dirty);
        assert!(clean.contains("<p>Hello</p>"));
        assert!(!clean.contains("script"));
        assert!(!clean.contains("alert"));
    }

    #[test]
    fn test_clean_html_removes_event_handlers() {
        let dirty = r#"<img src="a.jpg" onerror="alert(1)">"#;
        let clean = clean_html(dirty);
        assert!(!clean.contains("onerror"));
        assert!(clean.contains("src=\"a.jpg\""));
    }

    #[test]
    fn test_clean_html_keeps_formatting() {
        let input = "<h2>Visas</h2><ul><li>485</li></ul><a href=\"https://example.com\">more</a>";
        let clean = clean_html(input);
        assert!(clean.contains("<h2>Visas</h2>"));
        assert!(clean.contains("<li>485</li>"));
        assert!(clean.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_strip_tags_leaves_text_only() {
        assert_eq!(
            strip_tags("<p>Visa <strong>news</strong></p>"),
            "Visa news"
        );
    }
}
