//! Slug handling for path-tracked entities.
//!
//! A slug is the human-readable last segment of an entity's path. Two kinds
//! of slug values are never turned into path records: external links
//! (absolute `http://` or `https://` URLs) and stubs (values starting with
//! `#`).

/// Attribute name used when an entity does not override [`Sluggable::slug_attribute`].
pub const DEFAULT_SLUG_ATTRIBUTE: &str = "slug";

/// Returns true when `link` points outside the site.
///
/// A missing link counts as external: an entity without a slug cannot
/// contribute a path segment.
///
/// # Examples
///
/// ```
/// use pathhist::slug::is_external_link;
///
/// assert!(is_external_link(Some("https://example.com")));
/// assert!(is_external_link(None));
/// assert!(!is_external_link(Some("boots")));
/// ```
#[must_use]
pub fn is_external_link(link: Option<&str>) -> bool {
    match link {
        None => true,
        Some(link) => link.starts_with("http://") || link.starts_with("https://"),
    }
}

/// Returns true when `link` is a placeholder anchor such as `#dummy`.
#[must_use]
pub fn is_stub_link(link: &str) -> bool {
    link.starts_with('#')
}

/// Converts free text into a URL slug.
///
/// Letters and digits are lowercased and kept, whitespace, `-` and `_`
/// become single dashes, everything else is dropped.
///
/// # Examples
///
/// ```
/// use pathhist::slug::slugify;
///
/// assert_eq!(slugify("New category"), "new-category");
/// assert_eq!(slugify("  Hello,  World!  "), "hello-world");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_dash = true;
        }
    }

    slug
}

/// Normalizes a value about to be stored as a slug.
///
/// External links and stubs are stored verbatim; anything else is slugified.
#[must_use]
pub fn make_slug(value: &str) -> String {
    if is_external_link(Some(value)) || is_stub_link(value) {
        value.to_string()
    } else {
        slugify(value)
    }
}

/// Capability of anything that carries a slug.
pub trait Sluggable {
    /// Name of the attribute holding the slug.
    fn slug_attribute(&self) -> &str {
        DEFAULT_SLUG_ATTRIBUTE
    }

    /// Current slug value, if any.
    fn slug(&self) -> Option<&str>;

    /// True when the slug is missing or an absolute URL.
    fn is_external(&self) -> bool {
        is_external_link(self.slug())
    }

    /// True when the slug is a `#` placeholder.
    fn is_stub(&self) -> bool {
        self.slug().is_some_and(is_stub_link)
    }
}
