/// Trims surrounding whitespace, collapsing blank input to `None`.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Section names are stored and compared upper-cased: "a1" and "A1" are the
/// same section.
pub fn normalize_section_name(raw: &str) -> Option<String> {
    normalize_name(raw).map(|name| name.to_uppercase())
}
