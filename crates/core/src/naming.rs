//! Slug derivation for form titles.

/// Derive a URL-safe slug from a form title.
///
/// Lowercases, keeps ASCII alphanumerics, and collapses every other run of
/// characters into a single hyphen. Leading/trailing hyphens are trimmed.
/// Slugs are stored but not required to be unique.
///
/// # Examples
///
/// ```
/// use formgate_core::naming::slugify;
///
/// assert_eq!(slugify("Contact Us"), "contact-us");
/// assert_eq!(slugify("  Lead Magnet!  2024  "), "lead-magnet-2024");
/// assert_eq!(slugify("Untitled Form (Copy)"), "untitled-form-copy");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
