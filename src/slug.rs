//! Page title slugs.

/// Turn display text into a page slug: alphanumeric runs joined by the
/// separator, everything else collapsed.
pub fn slugify(text: &str, separator: char, lowercase: bool) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(separator);
            }
            pending_separator = false;
            if lowercase {
                slug.extend(c.to_lowercase());
            } else {
                slug.push(c);
            }
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Lowercase slug with `_` separators, the suit/equipment page convention.
pub fn page_slug(text: &str) -> String {
    slugify(text, '_', true)
}

/// Case-preserving slug with `_` separators, the kit page convention.
pub fn title_slug(text: &str) -> String {
    slugify(text, '_', false)
}
