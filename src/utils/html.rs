/// Sanitises admin-entered free text (descriptions, remarks) before it is stored.
///
/// Whitelist-based: harmless inline markup survives, scripts and event-handler
/// attributes are stripped. The stored result is rendered as markup.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Trims and sanitises an optional free-text field; blank input becomes `None`.
pub fn clean_optional(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(clean_html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_removed() {
        assert_eq!(clean_html("<b>Algebra</b><script>alert(1)</script>"), "<b>Algebra</b>");
    }

    #[test]
    fn blank_optional_text_is_none() {
        assert_eq!(clean_optional(Some("   ")), None);
        assert_eq!(clean_optional(None), None);
        assert_eq!(clean_optional(Some(" Basics ")), Some("Basics".to_string()));
    }
}
